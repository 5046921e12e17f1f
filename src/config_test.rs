use super::*;

/// # Safety
/// Tests touching the environment share one lock to avoid races.
unsafe fn clear_cloudbit_env() {
    unsafe {
        std::env::remove_var("CLOUDBIT_API_BASE_URL");
        std::env::remove_var("CLOUDBIT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("CLOUDBIT_CONNECT_TIMEOUT_SECS");
    }
}

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_cloudbit_env() };

    let cfg = AuthClientConfig::from_env().unwrap();
    assert_eq!(cfg, AuthClientConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_env_parses_overrides_and_trims_slash() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_cloudbit_env();
        std::env::set_var("CLOUDBIT_API_BASE_URL", "https://api.cloudbit.test/v2/");
        std::env::set_var("CLOUDBIT_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("CLOUDBIT_CONNECT_TIMEOUT_SECS", "2");
    }

    let cfg = AuthClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://api.cloudbit.test/v2");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.endpoint("/api/users/login"), "https://api.cloudbit.test/v2/api/users/login");

    unsafe { clear_cloudbit_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_cloudbit_env();
        std::env::set_var("CLOUDBIT_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = AuthClientConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("CLOUDBIT_REQUEST_TIMEOUT_SECS"));

    unsafe { clear_cloudbit_env() };
}

#[test]
fn new_rejects_non_http_urls() {
    assert!(AuthClientConfig::new("not a url", Timeouts::default()).is_err());
    let err = AuthClientConfig::new("ftp://files.test", Timeouts::default()).unwrap_err().to_string();
    assert!(err.contains("unsupported scheme"));
}
