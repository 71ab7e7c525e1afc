//! Category Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::Document, Collection, Database};

use crate::category::entity::Category;
use crate::shared::error::Result;

/// Store interface for categories. Handlers receive an
/// `Arc<dyn CategoryStore>` at construction; production wires in
/// [`CategoryRepository`].
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert(&self, category: &Category) -> Result<()>;

    async fn find_active(&self) -> Result<Vec<Category>>;

    /// Apply a `$set` patch to one category by id.
    async fn apply_patch(&self, id: &str, set: Document) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct CategoryRepository {
    collection: Collection<Category>,
}

impl CategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("categories"),
        }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn insert(&self, category: &Category) -> Result<()> {
        self.collection.insert_one(category).await?;
        Ok(())
    }

    async fn find_active(&self) -> Result<Vec<Category>> {
        let cursor = self.collection.find(doc! { "active": true }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn apply_patch(&self, id: &str, set: Document) -> Result<()> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
