use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cloudbit_auth::app::{RouteDecision, resolve_route};
use cloudbit_auth::config::{
    AuthClientConfig, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts,
};
use cloudbit_auth::error::{ConfigError, ErrorCode};
use cloudbit_auth::pages::login::NAVIGATE_DELAY;
use cloudbit_auth::state::toast::ToastKind;
use cloudbit_auth::util::redirect::Location;
use cloudbit_auth::{AuthFormController, AuthFormError, Field, HttpAuthService, Mode, Navigator, ServiceError, SubmitOutcome};
use tokio::sync::Notify;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] ServiceError),
    #[error("{code}: {source}")]
    Rejected { code: &'static str, source: AuthFormError },
    #[error("a request is already in flight")]
    Busy,
    #[error("timed out waiting for redirect")]
    Timeout,
}

#[derive(Parser, Debug)]
#[command(name = "cloudbit", about = "CloudBit login/signup from the terminal")]
struct Cli {
    #[arg(long, env = "CLOUDBIT_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    #[arg(long, env = "CLOUDBIT_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "CLOUDBIT_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    /// Return URL handed over by the page that sent the user to /login.
    #[arg(long)]
    return_url: Option<String>,

    /// Value of the `?redirect=` query parameter.
    #[arg(long)]
    redirect: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Signup(SignupArgs),
    /// Show what a path resolves to for an anonymous or signed-in visitor.
    Route {
        path: String,
        #[arg(long, default_value_t = false)]
        authenticated: bool,
    },
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, env = "CLOUDBIT_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[command(flatten)]
    credentials: LoginArgs,
    /// Defaults to the password when omitted.
    #[arg(long)]
    confirm_password: Option<String>,
}

/// Prints the redirect and wakes `main` so it can exit.
#[derive(Default)]
struct TerminalNavigator {
    arrived: Notify,
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(%path, "navigate");
        println!("-> {path}");
        self.arrived.notify_one();
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let location = Location { return_url: cli.return_url.clone(), query: cli.redirect.as_deref().map(redirect_query) };

    match cli.command {
        Command::Route { path, authenticated } => {
            run_route(&path, authenticated);
            Ok(())
        }
        Command::Login(args) => {
            let config = client_config(&cli.base_url, cli.request_timeout_secs, cli.connect_timeout_secs)?;
            run_submit(config, location, Mode::Login, |ctrl| {
                ctrl.set_field(Field::Email, args.email);
                ctrl.set_field(Field::Password, args.password);
            })
            .await
        }
        Command::Signup(args) => {
            let config = client_config(&cli.base_url, cli.request_timeout_secs, cli.connect_timeout_secs)?;
            run_submit(config, location, Mode::Signup, |ctrl| {
                let confirm = args.confirm_password.unwrap_or_else(|| args.credentials.password.clone());
                ctrl.set_field(Field::FirstName, args.first_name);
                ctrl.set_field(Field::LastName, args.last_name);
                ctrl.set_field(Field::Email, args.credentials.email);
                ctrl.set_field(Field::Password, args.credentials.password);
                ctrl.set_field(Field::ConfirmPassword, confirm);
            })
            .await
        }
    }
}

fn client_config(base_url: &str, request_secs: u64, connect_secs: u64) -> Result<AuthClientConfig, ConfigError> {
    AuthClientConfig::new(base_url, Timeouts { request_secs, connect_secs })
}

fn redirect_query(target: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", target)
        .finish()
}

type Controller = AuthFormController<HttpAuthService, TerminalNavigator>;

async fn run_submit<F>(config: AuthClientConfig, location: Location, mode: Mode, fill: F) -> Result<(), CliError>
where
    F: FnOnce(&Controller),
{
    let service = Arc::new(HttpAuthService::new(config)?);
    let navigator = Arc::new(TerminalNavigator::default());
    let ctrl = AuthFormController::new(Arc::clone(&service), Arc::clone(&navigator))
        .with_mode(mode)
        .with_location(location);
    fill(&ctrl);

    let outcome = ctrl.submit().await;
    print_toast(&ctrl);

    match outcome {
        SubmitOutcome::Busy => Err(CliError::Busy),
        SubmitOutcome::Rejected(source) => {
            print_errors(&ctrl);
            if source.retryable() {
                eprintln!("hint: the user API may be unavailable, try again shortly");
            }
            Err(CliError::Rejected { code: source.error_code(), source })
        }
        SubmitOutcome::Success { redirect_to } => {
            tracing::debug!(%redirect_to, "waiting for redirect");
            let wait = NAVIGATE_DELAY + Duration::from_secs(1);
            tokio::time::timeout(wait, navigator.arrived.notified())
                .await
                .map_err(|_| CliError::Timeout)?;
            Ok(())
        }
    }
}

fn run_route(path: &str, authenticated: bool) {
    match resolve_route(path, authenticated) {
        RouteDecision::Render(route) => println!("render {route:?}"),
        RouteDecision::Redirect(to) => println!("redirect {to}"),
    }
}

fn print_toast(ctrl: &Controller) {
    let toast = ctrl.toast();
    if !toast.visible {
        return;
    }
    let tag = match toast.kind {
        ToastKind::Info => "info",
        ToastKind::Success => "ok",
        ToastKind::Error => "error",
    };
    println!("[{tag}] {}", toast.message);
}

fn print_errors(ctrl: &Controller) {
    for (key, message) in ctrl.errors().iter() {
        println!("  {}: {message}", key.name());
    }
}
