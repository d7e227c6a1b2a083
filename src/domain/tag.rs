//! Tag Entity
//!
//! Tags can be attached to any record through taggings. Two tags are the
//! same tag when their normalized names match, whatever their ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::entity::Entity;
use super::tag_name::TagName;
use crate::error::DomainResult;

/// A uniquely named label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier (0 until stored)
    pub id: i64,
    name: TagName,
    /// Number of taggings, computed by the store
    #[serde(skip_deserializing)]
    count: i64,
}

impl Tag {
    pub fn new(id: i64, name: TagName) -> Self {
        Self { id, name, count: 0 }
    }

    pub(crate) fn with_count(id: i64, name: TagName, count: i64) -> Self {
        Self { id, name, count }
    }

    pub fn name(&self) -> &TagName {
        &self.name
    }

    /// Replace the name, normalizing it the same way as on creation.
    pub fn set_name(&mut self, raw: &str) -> DomainResult<()> {
        self.name = TagName::parse(raw)?;
        Ok(())
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

impl Entity for Tag {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tag(id: i64, name: &str) -> Tag {
        Tag::new(id, TagName::parse(name).unwrap())
    }

    #[test]
    fn test_tag_creation() {
        let tag = tag(1, "Work");
        assert_eq!(tag.id(), 1);
        assert_eq!(tag.name(), "work");
        assert_eq!(tag.count(), 0);
    }

    #[test]
    fn test_equality_ignores_id_and_case() {
        assert_eq!(tag(1, "Ruby"), tag(7, "RUBY"));
        assert_ne!(tag(1, "ruby"), tag(1, "rails"));

        let set: HashSet<Tag> = [tag(1, "ruby"), tag(2, "Ruby"), tag(3, "rails")].into();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(tag(1, "Urgent").to_string(), "urgent");
    }

    #[test]
    fn test_set_name_renormalizes() {
        let mut tag = tag(1, "old");
        tag.set_name("New Name").unwrap();
        assert_eq!(tag.name(), "new name");

        assert!(tag.set_name("  ").is_err());
        assert_eq!(tag.name(), "new name");
    }

    #[test]
    fn test_deserialize_normalizes_name() {
        let tag: Tag = serde_json::from_str(r#"{ "id": 3, "name": "Go" }"#).unwrap();
        assert_eq!(tag.name(), "go");
        assert_eq!(tag.count(), 0);
    }

    #[test]
    fn test_deserialize_ignores_count() {
        let tag: Tag = serde_json::from_str(r#"{ "id": 3, "name": "go", "count": 99 }"#).unwrap();
        assert_eq!(tag.count(), 0);

        let stored = Tag::with_count(3, TagName::parse("go").unwrap(), 4);
        let json = serde_json::to_string(&stored).unwrap();
        assert!(json.contains(r#""count":4"#));
    }
}
