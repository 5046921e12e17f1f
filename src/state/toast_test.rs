use super::*;

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[test]
fn toast_state_default_is_hidden() {
    let state = ToastState::default();
    assert!(!state.visible);
    assert!(state.message.is_empty());
    assert_eq!(state.kind, ToastKind::Info);
}

#[tokio::test(start_paused = true)]
async fn toast_hides_after_ttl() {
    let toaster = Toaster::new();
    toaster.show("Login successful!", ToastKind::Success);
    assert_eq!(
        toaster.current(),
        ToastState { visible: true, message: "Login successful!".into(), kind: ToastKind::Success }
    );

    tokio::time::advance(Duration::from_millis(3999)).await;
    settle().await;
    assert!(toaster.current().visible);

    tokio::time::advance(Duration::from_millis(2)).await;
    settle().await;
    assert_eq!(toaster.current(), ToastState::default());
}

#[tokio::test(start_paused = true)]
async fn newer_toast_replaces_pending_dismiss() {
    let toaster = Toaster::new();
    toaster.show("first", ToastKind::Info);

    tokio::time::advance(Duration::from_millis(3000)).await;
    settle().await;
    toaster.show("second", ToastKind::Error);

    // The first toast's timer would have fired here.
    tokio::time::advance(Duration::from_millis(1500)).await;
    settle().await;
    let state = toaster.current();
    assert!(state.visible);
    assert_eq!(state.message, "second");
    assert_eq!(state.kind, ToastKind::Error);

    tokio::time::advance(Duration::from_millis(2600)).await;
    settle().await;
    assert!(!toaster.current().visible);
}

#[tokio::test(start_paused = true)]
async fn dismiss_hides_immediately() {
    let toaster = Toaster::with_ttl(Duration::from_secs(10));
    toaster.show("bye", ToastKind::Info);
    toaster.dismiss();
    assert_eq!(toaster.current(), ToastState::default());
}
