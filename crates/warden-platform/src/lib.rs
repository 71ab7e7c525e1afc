//! Warden Platform
//!
//! Administrative backend for account management:
//! - Users with role memberships
//! - Roles with permission grants
//! - Categories
//! - First-user bootstrap (super admin registration)
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints

// Core aggregates
pub mod category;
pub mod role;
pub mod user;

// Association edges (user<->role, role<->permission)
pub mod link;

// Shared infrastructure
pub mod shared;

// Re-export common types from shared
pub use shared::error::{AdminError, Result};

// Re-export main entity types for convenience
pub use category::entity::Category;
pub use link::entity::{RolePrivilegeLink, UserRoleLink};
pub use role::entity::Role;
pub use user::entity::User;
