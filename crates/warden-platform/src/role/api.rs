//! Roles Admin API
//!
//! REST endpoints for role management and the permission catalog.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::link::{reconcile, Edge, RolePrivilegeLink, RolePrivilegeStore};
use crate::role::entity::{Role, RolePatch};
use crate::role::privileges::{self, PrivilegeCatalog};
use crate::role::repository::RoleStore;
use crate::shared::api_common::{Envelope, SuccessResponse};
use crate::shared::error::AdminError;
use crate::shared::validation;

/// Create role request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddRoleRequest {
    pub role_name: Option<String>,
    /// Permission strings granted to the role
    pub permissions: Option<Vec<String>>,
}

/// Update role request. `permissions`, when present, is the complete
/// target grant set (an empty array revokes everything).
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub role_name: Option<String>,
    pub active: Option<bool>,
    pub permissions: Option<Vec<String>>,
}

/// Delete role request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRoleRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Role response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    pub id: String,
    pub role_name: String,
    pub active: bool,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Role> for RoleResponse {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            role_name: r.role_name,
            active: r.active,
            created_by: r.created_by,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Roles service state. Stores are trait objects so tests can wire in
/// in-memory doubles.
#[derive(Clone)]
pub struct RolesState {
    pub role_repo: Arc<dyn RoleStore>,
    pub privilege_repo: Arc<dyn RolePrivilegeStore>,
}

/// List roles
#[utoipa::path(
    get,
    path = "",
    tag = "roles",
    responses(
        (status = 200, description = "List of roles", body = Envelope<Vec<RoleResponse>>)
    )
)]
pub async fn list_roles(
    State(state): State<RolesState>,
) -> Result<Json<Envelope<Vec<RoleResponse>>>, AdminError> {
    let roles = state.role_repo.find_all().await?;
    let roles: Vec<RoleResponse> = roles.into_iter().map(|r| r.into()).collect();
    Ok(Json(Envelope::new(roles)))
}

/// Create a role with its permission grants
#[utoipa::path(
    post,
    path = "/add",
    tag = "roles",
    request_body = AddRoleRequest,
    responses(
        (status = 200, description = "Role created", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_role(
    State(state): State<RolesState>,
    Json(req): Json<AddRoleRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let role_name = validation::required("role_name", req.role_name.as_deref())?;
    let permissions = validation::required_list("permissions", req.permissions.as_ref())?;

    let role = Role::new(role_name);
    state.role_repo.insert(&role).await?;

    for permission in permissions {
        state
            .privilege_repo
            .insert(&RolePrivilegeLink::new(&role.id, permission))
            .await?;
    }

    tracing::info!(role_id = %role.id, grants = permissions.len(), "role created");
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Partially update a role, reconciling permission grants when
/// `permissions` is supplied
#[utoipa::path(
    post,
    path = "/update",
    tag = "roles",
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_role(
    State(state): State<RolesState>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?.to_string();

    // A supplied permissions array is the target grant set; an omitted
    // field leaves grants alone.
    if let Some(requested) = req.permissions.as_ref() {
        let current = state.privilege_repo.find_by_role(&id).await?;
        let edges: Vec<Edge<String>> = current
            .into_iter()
            .map(|link| Edge::new(link.id, link.permission))
            .collect();

        let plan = reconcile(&edges, requested);
        if !plan.remove_edge_ids.is_empty() {
            state.privilege_repo.delete_by_ids(&plan.remove_edge_ids).await?;
        }
        for permission in &plan.add_peers {
            state
                .privilege_repo
                .insert(&RolePrivilegeLink::new(&id, permission))
                .await?;
        }
    }

    let patch = RolePatch {
        role_name: req.role_name,
        active: req.active,
    };
    state.role_repo.apply_patch(&id, patch.into_set_document()).await?;
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Delete a role and cascade its permission grant edges
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "roles",
    request_body = DeleteRoleRequest,
    responses(
        (status = 200, description = "Role deleted", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn delete_role(
    State(state): State<RolesState>,
    Json(req): Json<DeleteRoleRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?;

    state.role_repo.delete(id).await?;
    let revoked = state.privilege_repo.delete_by_role(id).await?;

    tracing::info!(role_id = %id, grants_revoked = revoked, "role deleted");
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Static permission catalog
#[utoipa::path(
    get,
    path = "/role_privileges",
    tag = "roles",
    responses(
        (status = 200, description = "Permission catalog", body = PrivilegeCatalog)
    )
)]
pub async fn role_privileges() -> Json<PrivilegeCatalog> {
    Json(privileges::catalog())
}

/// Create roles router
pub fn roles_router(state: RolesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_roles))
        .routes(routes!(add_role))
        .routes(routes!(update_role))
        .routes(routes!(delete_role))
        .routes(routes!(role_privileges))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use crate::link::repository::InMemoryRolePrivilegeStore;
    use crate::role::repository::InMemoryRoleStore;
    use crate::shared::error::AdminError;

    fn fixture() -> (
        RolesState,
        Arc<InMemoryRoleStore>,
        Arc<InMemoryRolePrivilegeStore>,
    ) {
        let roles = Arc::new(InMemoryRoleStore::new());
        let grants = Arc::new(InMemoryRolePrivilegeStore::new());
        let state = RolesState {
            role_repo: roles.clone(),
            privilege_repo: grants.clone(),
        };
        (state, roles, grants)
    }

    fn add_request(name: &str, permissions: &[&str]) -> AddRoleRequest {
        AddRoleRequest {
            role_name: Some(name.to_string()),
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        }
    }

    fn granted(grants: &InMemoryRolePrivilegeStore) -> HashSet<String> {
        grants
            .links
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.permission.clone())
            .collect()
    }

    #[tokio::test]
    async fn delete_role_cascades_grant_edges() {
        let (state, roles, grants) = fixture();

        add_role(
            State(state.clone()),
            Json(add_request("auditor", &["user_view", "role_view"])),
        )
        .await
        .unwrap();
        let role_id = roles.roles.lock().unwrap()[0].id.clone();
        assert_eq!(grants.links.lock().unwrap().len(), 2);

        delete_role(State(state), Json(DeleteRoleRequest { id: Some(role_id) }))
            .await
            .unwrap();
        assert!(roles.roles.lock().unwrap().is_empty());
        assert!(grants.links.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_role_reconciles_grants_to_requested_set() {
        let (state, roles, grants) = fixture();

        add_role(
            State(state.clone()),
            Json(add_request("auditor", &["user_view", "role_view"])),
        )
        .await
        .unwrap();
        let role_id = roles.roles.lock().unwrap()[0].id.clone();

        update_role(
            State(state),
            Json(UpdateRoleRequest {
                id: Some(role_id),
                role_name: None,
                active: None,
                permissions: Some(vec!["role_view".to_string(), "category_view".to_string()]),
            }),
        )
        .await
        .unwrap();

        let expected: HashSet<String> =
            ["role_view", "category_view"].iter().map(|p| p.to_string()).collect();
        assert_eq!(granted(&grants), expected);
    }

    #[tokio::test]
    async fn add_role_requires_permissions() {
        let (state, roles, _) = fixture();

        let err = add_role(
            State(state),
            Json(AddRoleRequest {
                role_name: Some("empty".to_string()),
                permissions: Some(vec![]),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AdminError::Validation { .. }));
        assert!(roles.roles.lock().unwrap().is_empty());
    }
}
