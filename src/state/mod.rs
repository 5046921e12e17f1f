//! Client state for the auth card.
//!
//! SYSTEM CONTEXT
//! ==============
//! `form` holds the inputs, errors and submit phase; `toast` holds the single
//! notification slot with its auto-dismiss timer.

pub mod form;
pub mod toast;
