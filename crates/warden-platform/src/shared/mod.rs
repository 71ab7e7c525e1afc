//! Shared Infrastructure
//!
//! Cross-cutting concerns used by all aggregates.

pub mod api_common;
pub mod error;
pub mod indexes;
pub mod password;
pub mod validation;
