//! Role Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

/// Synthetic role granted to the first registered user.
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// Role document. Permission grants live as edges in the
/// `role_privileges` collection, not on the role itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,

    pub role_name: String,

    /// Whether the role is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// User that created this role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Role {
    pub fn new(role_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role_name: role_name.into(),
            active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }
}

/// Partial update for a role.
#[derive(Debug, Default, Clone)]
pub struct RolePatch {
    pub role_name: Option<String>,
    pub active: Option<bool>,
}

impl RolePatch {
    /// Build the `$set` document for this patch. Always touches
    /// `updated_at`.
    pub fn into_set_document(self) -> Document {
        let mut set = doc! { "updated_at": bson::DateTime::now() };
        if let Some(role_name) = self.role_name {
            set.insert("role_name", role_name);
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
    fn new_role_is_active_without_creator() {
        let role = Role::new("moderator");
        assert!(role.active);
        assert!(role.created_by.is_none());

        let role = Role::new(SUPER_ADMIN_ROLE).with_created_by("u1");
        assert_eq!(role.role_name, "SUPER_ADMIN");
        assert_eq!(role.created_by.as_deref(), Some("u1"));
    }

    #[test]
    fn patch_sets_only_supplied_fields() {
        let set = RolePatch {
            role_name: Some("auditor".to_string()),
            active: None,
        }
        .into_set_document();

        assert_eq!(set.get_str("role_name").unwrap(), "auditor");
        assert!(set.get("active").is_none());
        assert!(set.get("updated_at").is_some());
    }
}
