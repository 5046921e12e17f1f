//! CloudBit auth form core.
//!
//! ARCHITECTURE
//! ============
//! `pages::login::AuthFormController` drives the login/signup card: field
//! state, two-layer validation, submit orchestration, toasts and the
//! post-auth redirect. It talks to the user API only through
//! `net::api::AuthService` and to the router only through
//! `pages::login::Navigator`.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

pub use config::AuthClientConfig;
pub use error::{AuthFormError, ServiceError};
pub use net::api::{AuthService, HttpAuthService};
pub use pages::login::{AuthFormController, Navigator, SubmitOutcome};
pub use state::form::{Field, Mode};
