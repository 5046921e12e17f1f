//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; presentation is left to the
//! embedding UI.

pub mod login;
