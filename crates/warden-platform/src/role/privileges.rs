//! Permission Catalog
//!
//! Static, code-defined enumeration of the permissions a role can be
//! granted, grouped for UI consumption. Served verbatim by
//! `GET /roles/role_privileges`.

use serde::Serialize;
use utoipa::ToSchema;

/// A UI grouping of related privileges.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrivilegeGroup {
    pub id: &'static str,
    pub name: &'static str,
}

/// A grantable permission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Privilege {
    /// Permission string stored on role_privileges edges,
    /// e.g. "user_view"
    pub key: &'static str,
    pub name: &'static str,
    pub group: &'static str,
    pub description: &'static str,
}

/// The full catalog response shape.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrivilegeCatalog {
    pub privilege_groups: Vec<PrivilegeGroup>,
    pub privileges: Vec<Privilege>,
}

pub fn privilege_groups() -> Vec<PrivilegeGroup> {
    vec![
        PrivilegeGroup { id: "USERS", name: "User Permissions" },
        PrivilegeGroup { id: "ROLES", name: "Role Permissions" },
        PrivilegeGroup { id: "CATEGORIES", name: "Category Permissions" },
    ]
}

pub fn privileges() -> Vec<Privilege> {
    vec![
        priv_def("user_view", "User View", "USERS", "View users"),
        priv_def("user_add", "User Add", "USERS", "Create users"),
        priv_def("user_update", "User Update", "USERS", "Update users"),
        priv_def("user_delete", "User Delete", "USERS", "Delete users"),
        priv_def("role_view", "Role View", "ROLES", "View roles"),
        priv_def("role_add", "Role Add", "ROLES", "Create roles"),
        priv_def("role_update", "Role Update", "ROLES", "Update roles"),
        priv_def("role_delete", "Role Delete", "ROLES", "Delete roles"),
        priv_def("category_view", "Category View", "CATEGORIES", "View categories"),
        priv_def("category_add", "Category Add", "CATEGORIES", "Create categories"),
        priv_def("category_update", "Category Update", "CATEGORIES", "Update categories"),
        priv_def("category_delete", "Category Delete", "CATEGORIES", "Delete categories"),
    ]
}

pub fn catalog() -> PrivilegeCatalog {
    PrivilegeCatalog {
        privilege_groups: privilege_groups(),
        privileges: privileges(),
    }
}

fn priv_def(
    key: &'static str,
    name: &'static str,
    group: &'static str,
    description: &'static str,
) -> Privilege {
    Privilege { key, name, group, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn privilege_keys_are_unique() {
        let privs = privileges();
        let keys: HashSet<&str> = privs.iter().map(|p| p.key).collect();
        assert_eq!(keys.len(), privs.len());
    }

    #[test]
    fn every_privilege_references_a_declared_group() {
        let groups: HashSet<&str> = privilege_groups().iter().map(|g| g.id).collect();
        for privilege in privileges() {
            assert!(
                groups.contains(privilege.group),
                "privilege {} references unknown group {}",
                privilege.key,
                privilege.group
            );
        }
    }

    #[test]
    fn catalog_is_not_empty() {
        let catalog = catalog();
        assert!(!catalog.privilege_groups.is_empty());
        assert!(!catalog.privileges.is_empty());
    }
}
