//! Association Edges
//!
//! Persisted many-to-many links (user<->role, role<->permission) and the
//! reconciliation algorithm that moves an owner's edge set to a requested
//! target set.

pub mod entity;
pub mod reconcile;
pub mod repository;

// Re-export main types
pub use entity::{RolePrivilegeLink, UserRoleLink};
pub use reconcile::{reconcile, Edge, ReconcilePlan};
pub use repository::{
    RolePrivilegeRepository, RolePrivilegeStore, UserRoleRepository, UserRoleStore,
};
