//! Tag Lookup Operations
//!
//! Exact and substring lookups over normalized names, alone or as a
//! disjunction over several names.

use async_trait::async_trait;

use super::super::query::NameQuery;
use super::tag_repo::{TagOrder, TagRepository};
use crate::domain::Tag;
use crate::error::DomainResult;

/// Trait for name lookups
#[async_trait]
pub trait TagLookupOperations {
    /// Tag whose normalized name equals `comparable_name(name)`
    async fn find_by_exact_name(&self, name: &str) -> DomainResult<Option<Tag>>;

    /// Tags matching any of `names` exactly, ordered by name
    async fn find_any_by_exact_names<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> DomainResult<Vec<Tag>>;

    /// First tag (lowest id) whose name contains `fragment`
    async fn find_by_name_like(&self, fragment: &str) -> DomainResult<Option<Tag>>;

    /// Tags containing any of `fragments`, ordered by name
    async fn find_any_by_name_like<S: AsRef<str> + Sync>(
        &self,
        fragments: &[S],
    ) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
impl TagLookupOperations for TagRepository {
    async fn find_by_exact_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let query = NameQuery::new(self.engine).or_equals(name);
        let tags = self.query_tags(query, TagOrder::Id, Some(1)).await?;
        Ok(tags.into_iter().next())
    }

    async fn find_any_by_exact_names<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> DomainResult<Vec<Tag>> {
        let query = NameQuery::any_equal(self.engine, names);
        self.query_tags(query, TagOrder::Name, None).await
    }

    async fn find_by_name_like(&self, fragment: &str) -> DomainResult<Option<Tag>> {
        let query = NameQuery::new(self.engine).or_contains(fragment);
        let tags = self.query_tags(query, TagOrder::Id, Some(1)).await?;
        Ok(tags.into_iter().next())
    }

    async fn find_any_by_name_like<S: AsRef<str> + Sync>(
        &self,
        fragments: &[S],
    ) -> DomainResult<Vec<Tag>> {
        let query = NameQuery::any_containing(self.engine, fragments);
        self.query_tags(query, TagOrder::Name, None).await
    }
}
