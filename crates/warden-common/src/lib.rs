//! Shared infrastructure for Warden services.

pub mod env;
pub mod logging;
