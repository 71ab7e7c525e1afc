//! Association Edge Repositories

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use crate::link::entity::{RolePrivilegeLink, UserRoleLink};
use crate::shared::error::Result;

/// Store interface for user-role membership edges.
#[async_trait]
pub trait UserRoleStore: Send + Sync {
    async fn insert(&self, link: &UserRoleLink) -> Result<()>;

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<UserRoleLink>>;

    /// Batch delete by edge id, as one operation.
    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64>;

    /// Cascade removal of every edge owned by a user.
    async fn delete_by_user(&self, user_id: &str) -> Result<u64>;
}

/// Store interface for role-permission grant edges.
#[async_trait]
pub trait RolePrivilegeStore: Send + Sync {
    async fn insert(&self, link: &RolePrivilegeLink) -> Result<()>;

    async fn find_by_role(&self, role_id: &str) -> Result<Vec<RolePrivilegeLink>>;

    /// Batch delete by edge id, as one operation.
    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64>;

    /// Cascade removal of every grant owned by a role.
    async fn delete_by_role(&self, role_id: &str) -> Result<u64>;
}

pub struct UserRoleRepository {
    collection: Collection<UserRoleLink>,
}

impl UserRoleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("user_roles"),
        }
    }
}

#[async_trait]
impl UserRoleStore for UserRoleRepository {
    async fn insert(&self, link: &UserRoleLink) -> Result<()> {
        self.collection.insert_one(link).await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<UserRoleLink>> {
        let cursor = self.collection.find(doc! { "user_id": user_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids } })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "user_id": user_id })
            .await?;
        Ok(result.deleted_count)
    }
}

pub struct RolePrivilegeRepository {
    collection: Collection<RolePrivilegeLink>,
}

impl RolePrivilegeRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("role_privileges"),
        }
    }
}

#[async_trait]
impl RolePrivilegeStore for RolePrivilegeRepository {
    async fn insert(&self, link: &RolePrivilegeLink) -> Result<()> {
        self.collection.insert_one(link).await?;
        Ok(())
    }

    async fn find_by_role(&self, role_id: &str) -> Result<Vec<RolePrivilegeLink>> {
        let cursor = self.collection.find(doc! { "role_id": role_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids } })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_by_role(&self, role_id: &str) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "role_id": role_id })
            .await?;
        Ok(result.deleted_count)
    }
}

/// In-memory membership edge store for handler tests.
#[cfg(test)]
pub struct InMemoryUserRoleStore {
    pub links: std::sync::Mutex<Vec<UserRoleLink>>,
}

#[cfg(test)]
impl InMemoryUserRoleStore {
    pub fn new() -> Self {
        Self {
            links: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl UserRoleStore for InMemoryUserRoleStore {
    async fn insert(&self, link: &UserRoleLink) -> Result<()> {
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<UserRoleLink>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !ids.contains(&l.id));
        Ok((before - links.len()) as u64)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.user_id != user_id);
        Ok((before - links.len()) as u64)
    }
}

/// In-memory grant edge store for handler tests.
#[cfg(test)]
pub struct InMemoryRolePrivilegeStore {
    pub links: std::sync::Mutex<Vec<RolePrivilegeLink>>,
}

#[cfg(test)]
impl InMemoryRolePrivilegeStore {
    pub fn new() -> Self {
        Self {
            links: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl RolePrivilegeStore for InMemoryRolePrivilegeStore {
    async fn insert(&self, link: &RolePrivilegeLink) -> Result<()> {
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }

    async fn find_by_role(&self, role_id: &str) -> Result<Vec<RolePrivilegeLink>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !ids.contains(&l.id));
        Ok((before - links.len()) as u64)
    }

    async fn delete_by_role(&self, role_id: &str) -> Result<u64> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.role_id != role_id);
        Ok((before - links.len()) as u64)
    }
}
