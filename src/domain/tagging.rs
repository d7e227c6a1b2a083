//! Tagging Entity
//!
//! Join row between a tag and any application record.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Context used when the caller does not name one
pub const DEFAULT_CONTEXT: &str = "tags";

/// Polymorphic reference to a tagged record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Taggable {
    pub taggable_type: String,
    pub taggable_id: i64,
}

impl Taggable {
    pub fn new(taggable_type: impl Into<String>, taggable_id: i64) -> Self {
        Self {
            taggable_type: taggable_type.into(),
            taggable_id,
        }
    }
}

/// Usage record owned by a tag; removed when the tag is deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagging {
    pub id: i64,
    pub tag_id: i64,
    pub taggable: Taggable,
    pub context: String,
    /// Unix millis
    pub created_at: i64,
}

impl Entity for Tagging {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}
