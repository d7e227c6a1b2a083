//! Find-or-create Operations
//!
//! Lookup and creation are separate round-trips. Two callers racing on the
//! same unseen name can both miss, and the second insert then fails on the
//! UNIQUE constraint with `UniquenessViolation`. Only the `_retrying`
//! variant recovers from that.

use async_trait::async_trait;
use std::collections::HashSet;

use super::tag_lookup::TagLookupOperations;
use super::tag_repo::TagRepository;
use crate::domain::{Tag, TagName};
use crate::error::DomainResult;

/// Trait for resolving names to tags
#[async_trait]
pub trait TagFindOrCreateOperations {
    /// First tag containing the normalized name, or a new tag with that name
    async fn find_or_create_by_name_like(&self, name: &str) -> DomainResult<Tag>;

    /// Existing tags for `names` followed by newly created ones
    ///
    /// Names are normalized and deduplicated first. Existing tags come back
    /// ordered by name, created ones in first-seen input order. A
    /// `UniquenessViolation` stops the batch; rows created before it stay.
    async fn find_or_create_all_by_name_like<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> DomainResult<Vec<Tag>>;

    /// `find_or_create_by_name_like`, re-run up to `attempts` times when it
    /// loses a creation race
    async fn find_or_create_by_name_like_retrying(
        &self,
        name: &str,
        attempts: usize,
    ) -> DomainResult<Tag>;
}

#[async_trait]
impl TagFindOrCreateOperations for TagRepository {
    async fn find_or_create_by_name_like(&self, name: &str) -> DomainResult<Tag> {
        let name = TagName::parse(name)?;

        if let Some(existing) = self.find_by_name_like(name.as_str()).await? {
            return Ok(existing);
        }
        self.create_named(&name).await
    }

    async fn find_or_create_all_by_name_like<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> DomainResult<Vec<Tag>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        // Validate the whole batch before touching the store.
        let mut seen = HashSet::with_capacity(names.len());
        let mut wanted = Vec::with_capacity(names.len());
        for raw in names {
            let name = TagName::parse(raw.as_ref())?;
            if seen.insert(name.clone()) {
                wanted.push(name);
            }
        }

        let mut tags = self.find_any_by_exact_names(wanted.as_slice()).await?;
        let missing: Vec<TagName> = wanted
            .into_iter()
            .filter(|name| !tags.iter().any(|tag| tag.name() == name))
            .collect();

        for name in &missing {
            tags.push(self.create_named(name).await?);
        }
        Ok(tags)
    }

    async fn find_or_create_by_name_like_retrying(
        &self,
        name: &str,
        attempts: usize,
    ) -> DomainResult<Tag> {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.find_or_create_by_name_like(name).await {
                Err(e) if e.is_uniqueness_violation() && attempt < attempts => {
                    tracing::debug!(name, attempt, "lost tag creation race, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
