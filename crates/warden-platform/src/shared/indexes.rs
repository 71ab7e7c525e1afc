//! MongoDB Index Initialization
//!
//! Creates indexes for all collections on application startup.

use mongodb::{bson::doc, options::IndexOptions, Database, IndexModel};
use tracing::info;

/// Initialize all MongoDB indexes
pub async fn initialize_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    info!("Initializing MongoDB indexes...");

    create_user_indexes(db).await?;
    create_link_indexes(db).await?;

    info!("MongoDB indexes initialized successfully");
    Ok(())
}

async fn create_user_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let users = db.collection::<mongodb::bson::Document>("users");

    // Email lookup (unique)
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).background(true).build())
                .build(),
        )
        .await?;

    info!("Created indexes on users");
    Ok(())
}

async fn create_link_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let user_roles = db.collection::<mongodb::bson::Document>("user_roles");

    // Owner lookup for reconciliation and cascade delete
    user_roles
        .create_index(
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder().background(true).build())
                .build(),
        )
        .await?;

    let role_privileges = db.collection::<mongodb::bson::Document>("role_privileges");

    role_privileges
        .create_index(
            IndexModel::builder()
                .keys(doc! { "role_id": 1 })
                .options(IndexOptions::builder().background(true).build())
                .build(),
        )
        .await?;

    info!("Created indexes on link collections");
    Ok(())
}
