//! Networking for the user API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the `AuthService` seam and its HTTP client; `types` defines
//! the JSON wire schema.

pub mod api;
pub mod types;
