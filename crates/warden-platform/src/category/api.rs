//! Categories Admin API

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::category::entity::{Category, CategoryPatch};
use crate::category::repository::CategoryStore;
use crate::shared::api_common::{Envelope, SuccessResponse};
use crate::shared::error::AdminError;
use crate::shared::validation;

/// Create category request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCategoryRequest {
    pub name: Option<String>,
}

/// Update category request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Delete category request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteCategoryRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Category response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            active: c.active,
            created_by: c.created_by,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Categories service state
#[derive(Clone)]
pub struct CategoriesState {
    pub category_repo: Arc<dyn CategoryStore>,
}

/// List active categories
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    responses(
        (status = 200, description = "List of active categories", body = Envelope<Vec<CategoryResponse>>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoriesState>,
) -> Result<Json<Envelope<Vec<CategoryResponse>>>, AdminError> {
    let categories = state.category_repo.find_active().await?;
    let categories: Vec<CategoryResponse> = categories.into_iter().map(|c| c.into()).collect();
    Ok(Json(Envelope::new(categories)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/add",
    tag = "categories",
    request_body = AddCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_category(
    State(state): State<CategoriesState>,
    Json(req): Json<AddCategoryRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let name = validation::required("name", req.name.as_deref())?;

    let category = Category::new(name);
    state.category_repo.insert(&category).await?;

    tracing::info!(category_id = %category.id, "category created");
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Partially update a category
#[utoipa::path(
    post,
    path = "/update",
    tag = "categories",
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_category(
    State(state): State<CategoriesState>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?.to_string();

    let patch = CategoryPatch {
        name: req.name,
        active: req.active,
    };
    state.category_repo.apply_patch(&id, patch.into_set_document()).await?;
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "categories",
    request_body = DeleteCategoryRequest,
    responses(
        (status = 200, description = "Category deleted", body = Envelope<SuccessResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn delete_category(
    State(state): State<CategoriesState>,
    Json(req): Json<DeleteCategoryRequest>,
) -> Result<Json<Envelope<SuccessResponse>>, AdminError> {
    let id = validation::required("_id", req.id.as_deref())?;

    state.category_repo.delete(id).await?;
    Ok(Json(Envelope::new(SuccessResponse::ok())))
}

/// Create categories router
pub fn categories_router(state: CategoriesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_categories))
        .routes(routes!(add_category))
        .routes(routes!(update_category))
        .routes(routes!(delete_category))
        .with_state(state)
}
