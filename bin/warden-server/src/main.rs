//! Warden Server
//!
//! Production server for the account administration REST APIs:
//! - Users (with role membership and first-user bootstrap)
//! - Roles (with permission grants and the permission catalog)
//! - Categories
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WARDEN_API_PORT` | `8080` | HTTP API port |
//! | `WARDEN_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `WARDEN_MONGO_DB` | `warden` | MongoDB database name |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | text | Set to `json` for JSON logs |

use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use warden_common::env::{env_or, env_or_parse};
use warden_platform::category::{categories_router, CategoriesState, CategoryRepository, CategoryStore};
use warden_platform::link::{
    RolePrivilegeRepository, RolePrivilegeStore, UserRoleRepository, UserRoleStore,
};
use warden_platform::role::{roles_router, RoleRepository, RoleStore, RolesState};
use warden_platform::shared::indexes::initialize_indexes;
use warden_platform::user::{users_router, UserRepository, UserStore, UsersState};

#[tokio::main]
async fn main() -> Result<()> {
    warden_common::logging::init_logging("warden-server");

    info!("Starting Warden Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("WARDEN_API_PORT", 8080);
    let mongo_url = env_or("WARDEN_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("WARDEN_MONGO_DB", "warden");

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    initialize_indexes(&db).await?;

    // Initialize repositories
    let user_repo: Arc<dyn UserStore> = Arc::new(UserRepository::new(&db));
    let role_repo: Arc<dyn RoleStore> = Arc::new(RoleRepository::new(&db));
    let category_repo: Arc<dyn CategoryStore> = Arc::new(CategoryRepository::new(&db));
    let user_role_repo: Arc<dyn UserRoleStore> = Arc::new(UserRoleRepository::new(&db));
    let privilege_repo: Arc<dyn RolePrivilegeStore> = Arc::new(RolePrivilegeRepository::new(&db));
    info!("Repositories initialized");

    let users_state = UsersState {
        user_repo,
        role_repo: role_repo.clone(),
        user_role_repo,
    };
    let roles_state = RolesState {
        role_repo,
        privilege_repo,
    };
    let categories_state = CategoriesState { category_repo };

    // Build API router using OpenApiRouter for auto-collected OpenAPI paths
    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/users", users_router(users_state))
        .nest("/roles", roles_router(roles_state))
        .nest("/categories", categories_router(categories_state))
        .split_for_parts();

    openapi.info.title = "Warden API".to_string();
    openapi.info.version = "1.0.0".to_string();
    openapi.info.description =
        Some("REST APIs for users, roles, and categories".to_string());

    let app = Router::new()
        .merge(router)
        .route("/health", get(health_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let api_listener = TcpListener::bind(&api_addr).await?;
    let api_task = tokio::spawn(async move {
        axum::serve(api_listener, app).await.unwrap();
    });

    info!("Warden Server started");
    info!("Press Ctrl+C to shutdown");

    // Wait for shutdown
    shutdown_signal().await;
    info!("Shutdown signal received...");

    api_task.abort();

    info!("Warden Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
