//! User Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::Document, Collection, Database};

use crate::shared::error::Result;
use crate::user::entity::User;

/// Store interface for user accounts. Handlers receive an
/// `Arc<dyn UserStore>` at construction; production wires in
/// [`UserRepository`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<()>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_all(&self) -> Result<Vec<User>>;

    async fn count(&self) -> Result<u64>;

    /// Apply a `$set` patch to one user by id.
    async fn apply_patch(&self, id: &str, set: Document) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
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

/// In-memory user store for handler tests.
#[cfg(test)]
pub struct InMemoryUserStore {
    pub users: std::sync::Mutex<Vec<User>>,
}

#[cfg(test)]
impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> Result<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn apply_patch(&self, _id: &str, _set: Document) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}
