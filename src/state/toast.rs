//! Single-slot toast notification with auto-dismiss.
//!
//! DESIGN
//! ======
//! One toast at a time. `show` overwrites whatever is visible and replaces the
//! pending dismiss timer (last write wins, nothing is queued). Timers are
//! spawned Tokio tasks, so `show` must be called from inside a runtime.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a toast stays up before it hides itself.
pub const TOAST_TTL: Duration = Duration::from_millis(4000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Mutex<ToasterInner>>,
    ttl: Duration,
}

#[derive(Default)]
struct ToasterInner {
    state: ToastState,
    /// Identifies the toast a dismiss timer belongs to.
    seq: u64,
    dismiss: Option<JoinHandle<()>>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(ToasterInner::default())), ttl }
    }

    /// Show `message`, cancelling the dismiss timer of any previous toast.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let mut inner = self.lock();
        if let Some(prev) = inner.dismiss.take() {
            prev.abort();
        }
        inner.seq = inner.seq.wrapping_add(1);
        inner.state = ToastState { visible: true, message: message.into(), kind };
        tracing::debug!(kind = ?kind, message = %inner.state.message, "toast shown");

        let seq = inner.seq;
        let ttl = self.ttl;
        let shared = Arc::clone(&self.inner);
        inner.dismiss = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if inner.seq == seq {
                inner.state = ToastState::default();
                inner.dismiss = None;
            }
        }));
    }

    /// Hide the current toast now.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if let Some(prev) = inner.dismiss.take() {
            prev.abort();
        }
        inner.seq = inner.seq.wrapping_add(1);
        inner.state = ToastState::default();
    }

    #[must_use]
    pub fn current(&self) -> ToastState {
        self.lock().state.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ToasterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
