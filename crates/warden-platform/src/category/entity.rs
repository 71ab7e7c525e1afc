//! Category Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Whether the category is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// User that created this category
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

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a category.
#[derive(Debug, Default, Clone)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub active: Option<bool>,
}

impl CategoryPatch {
    /// Build the `$set` document for this patch. Always touches
    /// `updated_at`.
    pub fn into_set_document(self) -> Document {
        let mut set = doc! { "updated_at": bson::DateTime::now() };
        if let Some(name) = self.name {
            set.insert("name", name);
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
    fn patch_sets_only_supplied_fields() {
        let set = CategoryPatch {
            name: None,
            active: Some(false),
        }
        .into_set_document();

        assert!(set.get("name").is_none());
        assert!(!set.get_bool("active").unwrap());
        assert!(set.get("updated_at").is_some());
    }
}
