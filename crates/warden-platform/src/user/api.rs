//! Users Admin API
//!
//! REST endpoints for user management and first-user bootstrap.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::link::{reconcile, Edge, UserRoleLink, UserRoleStore};
use crate::role::entity::SUPER_ADMIN_ROLE;
use crate::role::{Role, RoleStore};
use crate::shared::api_common::{CreatedResponse, Envelope, SuccessResponse};
use crate::shared::error::AdminError;
use crate::shared::{password, validation};
use crate::user::entity::{User, UserPatch};
use crate::user::repository::UserStore;

/// Create user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Role ids the user is a member of
    pub roles: Option<Vec<String>>,
}

/// Update user request. Only supplied fields change; `roles`, when
/// present, is the complete target membership set (an empty array
/// detaches all roles).
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub roles: Option<Vec<String>>,
}

/// Delete user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteUserRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Bootstrap registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// User response DTO; never exposes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            active: u.active,
            first_name: u.first_name,
            last_name: u.last_name,
            phone: u.phone,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

/// Users service state. Stores are trait objects so tests can wire in
/// in-memory doubles.
#[derive(Clone)]
pub struct UsersState {
    pub user_repo: Arc<dyn UserStore>,
    pub role_repo: Arc<dyn RoleStore>,
    pub user_role_repo: Arc<dyn UserRoleStore>,
}

/// List users
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Envelope<Vec<UserResponse>>)
    )
)]
pub async fn list_users(
    State(state): State<UsersState>,
) -> Result<Json<Envelope<Vec<UserResponse>>>, AdminError> {
    let users = state.user_repo.find_all().await?;
    let users: Vec<UserResponse> = users.into_iter().map(|u| u.into()).collect();
    Ok(Json(Envelope::new(users)))
}

/// Create a user and link the requested roles
#[utoipa::path(
    post,
    path = "/add",
    tag = "users",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = Envelope<CreatedResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_user(
    State(state): State<UsersState>,
    Json(req): Json<AddUserRequest>,
) -> Result<(StatusCode, Json<Envelope<CreatedResponse>>), AdminError> {
    let email = validation::required("email", req.email.as_deref())?;
    validation::valid_email(email)?;
    let plaintext = validation::required("password", req.password.as_deref())?;
    validation::valid_password(plaintext)?;
    let role_ids = validation::required_list("roles", req.roles.as_ref())?;

    if state.user_repo.find_by_email(email).await?.is_some() {
        return Err(AdminError::validation("email field must be unique"));
    }

    // Resolve requested role ids; ids without a matching role are
    // dropped, but at least one must resolve.
    let roles = state.role_repo.find_by_ids(role_ids).await?;
    if roles.is_empty() {
        return Err(AdminError::validation(
            "roles field must reference at least one existing role",
        ));
    }

    let user = User::new(email, password::hash_password(plaintext)?)
        .with_name(req.first_name, req.last_name)
        .with_phone(req.phone);
    state.user_repo.insert(&user).await?;

    for role in &roles {
        state
            .user_role_repo
            .insert(&UserRoleLink::new(&user.id, &role.id))
            .await?;
    }

    tracing::info!(user_id = %user.id, roles = roles.len(), "user created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(CreatedResponse::new(user.id))),
    ))
}

/// Partially update a user, reconciling role membership when `roles`
/// is supplied
#[utoipa::path(
    post,
    path = "/update",
    tag = "users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<UsersState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?.to_string();

    let mut patch = UserPatch {
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        active: req.active,
        ..Default::default()
    };
    if let Some(plaintext) = req.password.as_deref() {
        validation::valid_password(plaintext)?;
        patch.password_hash = Some(password::hash_password(plaintext)?);
    }

    // A supplied roles array is the target membership set; an omitted
    // field leaves membership alone.
    if let Some(requested) = req.roles.as_ref() {
        let current = state.user_role_repo.find_by_user(&id).await?;
        let edges: Vec<Edge<String>> = current
            .into_iter()
            .map(|link| Edge::new(link.id, link.role_id))
            .collect();

        let plan = reconcile(&edges, requested);
        if !plan.remove_edge_ids.is_empty() {
            state.user_role_repo.delete_by_ids(&plan.remove_edge_ids).await?;
        }
        for role_id in &plan.add_peers {
            state
                .user_role_repo
                .insert(&UserRoleLink::new(&id, role_id))
                .await?;
        }
    }

    state.user_repo.apply_patch(&id, patch.into_set_document()).await?;
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Delete a user and cascade its role membership edges
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "users",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    Json(req): Json<DeleteUserRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?;

    state.user_repo.delete(id).await?;
    let removed = state.user_role_repo.delete_by_user(id).await?;

    tracing::info!(user_id = %id, links_removed = removed, "user deleted");
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Bootstrap the first user as super admin
///
/// Only available while no user exists; afterwards this endpoint
/// answers 404.
#[utoipa::path(
    post,
    path = "/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "First user registered", body = Envelope<CreatedResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "A user already exists")
    )
)]
pub async fn register(
    State(state): State<UsersState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<CreatedResponse>>), AdminError> {
    if state.user_repo.count().await? > 0 {
        return Err(AdminError::not_found(
            "registration is only available before the first user exists",
        ));
    }

    let email = validation::required("email", req.email.as_deref())?;
    validation::valid_email(email)?;
    let plaintext = validation::required("password", req.password.as_deref())?;
    validation::valid_password(plaintext)?;

    // Three independent writes, no transaction. A crash mid-sequence
    // leaves a user without the super admin role; the record store makes
    // no atomicity guarantee here.
    let user = User::new(email, password::hash_password(plaintext)?)
        .with_name(req.first_name, req.last_name)
        .with_phone(req.phone);
    state.user_repo.insert(&user).await?;

    let role = Role::new(SUPER_ADMIN_ROLE).with_created_by(&user.id);
    state.role_repo.insert(&role).await?;

    state
        .user_role_repo
        .insert(&UserRoleLink::new(&user.id, &role.id))
        .await?;

    tracing::info!(user_id = %user.id, "first user registered as super admin");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(CreatedResponse::new(user.id))),
    ))
}

/// Create users router
pub fn users_router(state: UsersState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(add_user))
        .routes(routes!(update_user))
        .routes(routes!(delete_user))
        .routes(routes!(register))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::link::repository::InMemoryUserRoleStore;
    use crate::role::repository::InMemoryRoleStore;
    use crate::user::repository::InMemoryUserStore;

    fn fixture() -> (
        UsersState,
        Arc<InMemoryUserStore>,
        Arc<InMemoryRoleStore>,
        Arc<InMemoryUserRoleStore>,
    ) {
        let users = Arc::new(InMemoryUserStore::new());
        let roles = Arc::new(InMemoryRoleStore::new());
        let links = Arc::new(InMemoryUserRoleStore::new());
        let state = UsersState {
            user_repo: users.clone(),
            role_repo: roles.clone(),
            user_role_repo: links.clone(),
        };
        (state, users, roles, links)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            password: Some("a-long-password".to_string()),
            first_name: None,
            last_name: None,
            phone: None,
        }
    }

    fn add_request(email: &str, role_ids: Vec<String>) -> AddUserRequest {
        AddUserRequest {
            email: Some(email.to_string()),
            password: Some("a-long-password".to_string()),
            first_name: None,
            last_name: None,
            phone: None,
            roles: Some(role_ids),
        }
    }

    #[tokio::test]
    async fn register_bootstraps_exactly_once() {
        let (state, users, roles, links) = fixture();

        let (status, _) = register(
            State(state.clone()),
            Json(register_request("root@example.com")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(users.users.lock().unwrap().len(), 1);
        assert_eq!(roles.roles.lock().unwrap().len(), 1);
        assert_eq!(roles.roles.lock().unwrap()[0].role_name, SUPER_ADMIN_ROLE);
        assert_eq!(links.links.lock().unwrap().len(), 1);

        // A second call answers 404 and writes nothing.
        let err = register(State(state), Json(register_request("second@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::NotFound { .. }));
        assert_eq!(users.users.lock().unwrap().len(), 1);
        assert_eq!(roles.roles.lock().unwrap().len(), 1);
        assert_eq!(links.links.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_email_persists_nothing() {
        let (state, users, roles, links) = fixture();
        roles.roles.lock().unwrap().push(Role::new("member"));
        let role_id = roles.roles.lock().unwrap()[0].id.clone();

        let err = add_user(State(state), Json(add_request("not-an-email", vec![role_id])))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::Validation { .. }));
        assert!(users.users.lock().unwrap().is_empty());
        assert!(links.links.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (state, users, roles, _) = fixture();
        roles.roles.lock().unwrap().push(Role::new("member"));
        let role_id = roles.roles.lock().unwrap()[0].id.clone();

        add_user(
            State(state.clone()),
            Json(add_request("dup@example.com", vec![role_id.clone()])),
        )
        .await
        .unwrap();
        assert_eq!(users.users.lock().unwrap().len(), 1);

        let err = add_user(State(state), Json(add_request("dup@example.com", vec![role_id])))
            .await
            .unwrap_err();
        let AdminError::Validation { description } = err else {
            panic!("expected validation error");
        };
        assert_eq!(description, "email field must be unique");
        assert_eq!(users.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_user_links_only_resolved_roles() {
        let (state, _, roles, links) = fixture();
        roles.roles.lock().unwrap().push(Role::new("member"));
        let role_id = roles.roles.lock().unwrap()[0].id.clone();

        add_user(
            State(state.clone()),
            Json(add_request(
                "member@example.com",
                vec![role_id.clone(), "no-such-role".to_string()],
            )),
        )
        .await
        .unwrap();

        let linked = links.links.lock().unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].role_id, role_id);
        drop(linked);

        // When no requested role resolves the request fails and no user
        // or edge is written.
        let err = add_user(
            State(state),
            Json(add_request("other@example.com", vec!["missing".to_string()])),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AdminError::Validation { .. }));
        assert_eq!(links.links.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_user_cascades_membership_edges() {
        let (state, users, roles, links) = fixture();
        roles.roles.lock().unwrap().push(Role::new("member"));
        let role_id = roles.roles.lock().unwrap()[0].id.clone();

        add_user(
            State(state.clone()),
            Json(add_request("gone@example.com", vec![role_id])),
        )
        .await
        .unwrap();
        let user_id = users.users.lock().unwrap()[0].id.clone();
        assert_eq!(links.links.lock().unwrap().len(), 1);

        delete_user(
            State(state),
            Json(DeleteUserRequest { id: Some(user_id) }),
        )
        .await
        .unwrap();
        assert!(users.users.lock().unwrap().is_empty());
        assert!(links.links.lock().unwrap().is_empty());
    }
}
