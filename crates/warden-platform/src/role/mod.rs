//! Role Aggregate
//!
//! Role records and their permission grants.

pub mod api;
pub mod entity;
pub mod privileges;
pub mod repository;

// Re-export main types
pub use api::{roles_router, RolesState};
pub use entity::{Role, RolePatch, SUPER_ADMIN_ROLE};
pub use repository::{RoleRepository, RoleStore};
