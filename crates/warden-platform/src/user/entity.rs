//! User Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

/// User account document.
///
/// `password_hash` is the argon2 PHC string; plaintext passwords are
/// hashed at the API boundary and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 hash of the password
    pub password_hash: String,

    /// Whether the account is active
    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            active: true,
            first_name: None,
            last_name: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }
}

/// Partial update for a user. Only supplied fields land in the `$set`
/// document; everything else is left untouched.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.active.is_none()
    }

    /// Build the `$set` document for this patch. Always touches
    /// `updated_at`.
    pub fn into_set_document(self) -> Document {
        let mut set = doc! { "updated_at": bson::DateTime::now() };
        if let Some(password_hash) = self.password_hash {
            set.insert("password_hash", password_hash);
        }
        if let Some(first_name) = self.first_name {
            set.insert("first_name", first_name);
        }
        if let Some(last_name) = self.last_name {
            set.insert("last_name", last_name);
        }
        if let Some(phone) = self.phone {
            set.insert("phone", phone);
        }
        if let Some(active) = self.active {
            set.insert("active", active);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_active_with_timestamps() {
        let user = User::new("admin@example.com", "$argon2id$stub");
        assert!(user.active);
        assert!(!user.id.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn patch_sets_only_supplied_fields() {
        let patch = UserPatch {
            first_name: Some("Ada".to_string()),
            active: Some(false),
            ..Default::default()
        };
        let set = patch.into_set_document();

        assert_eq!(set.get_str("first_name").unwrap(), "Ada");
        assert!(!set.get_bool("active").unwrap());
        assert!(set.get("last_name").is_none());
        assert!(set.get("phone").is_none());
        assert!(set.get("password_hash").is_none());
        assert!(set.get("updated_at").is_some());
    }

    #[test]
    fn empty_patch_still_touches_updated_at() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        let set = patch.into_set_document();
        assert_eq!(set.len(), 1);
        assert!(set.get("updated_at").is_some());
    }
}
