//! Pure helpers shared by the auth page.

pub mod redirect;
pub mod validate;
