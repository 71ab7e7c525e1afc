//! Role Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::Document, Collection, Database};

use crate::role::entity::Role;
use crate::shared::error::Result;

/// Store interface for roles. Handlers receive an `Arc<dyn RoleStore>`
/// at construction; production wires in [`RoleRepository`].
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn insert(&self, role: &Role) -> Result<()>;

    /// Resolve a set of role ids. Ids without a matching role are simply
    /// absent from the result.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Role>>;

    async fn find_all(&self) -> Result<Vec<Role>>;

    /// Apply a `$set` patch to one role by id.
    async fn apply_patch(&self, id: &str, set: Document) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct RoleRepository {
    collection: Collection<Role>,
}

impl RoleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("roles"),
        }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn insert(&self, role: &Role) -> Result<()> {
        self.collection.insert_one(role).await?;
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Role>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_all(&self) -> Result<Vec<Role>> {
        let cursor = self.collection.find(doc! {}).await?;
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

/// In-memory role store for handler tests.
#[cfg(test)]
pub struct InMemoryRoleStore {
    pub roles: std::sync::Mutex<Vec<Role>>,
}

#[cfg(test)]
impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self {
            roles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn insert(&self, role: &Role) -> Result<()> {
        self.roles.lock().unwrap().push(role.clone());
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Role>> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn apply_patch(&self, _id: &str, _set: Document) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.id != id);
        Ok(roles.len() < before)
    }
}
