//! Association Edge Entities

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership edge linking a user to a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleLink {
    #[serde(rename = "_id")]
    pub id: String,

    pub user_id: String,
    pub role_id: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl UserRoleLink {
    pub fn new(user_id: impl Into<String>, role_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            role_id: role_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Grant edge linking a role to a permission string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePrivilegeLink {
    #[serde(rename = "_id")]
    pub id: String,

    pub role_id: String,
    pub permission: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl RolePrivilegeLink {
    pub fn new(role_id: impl Into<String>, permission: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role_id: role_id.into(),
            permission: permission.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
