//! User Aggregate
//!
//! Account records and their role memberships.

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{users_router, UsersState};
pub use entity::{User, UserPatch};
pub use repository::{UserRepository, UserStore};
