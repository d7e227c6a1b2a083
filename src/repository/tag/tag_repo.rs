//! Tag Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Tag CRUD operations.
//! Specialized operations are in separate modules:
//! - tag_lookup: name lookups
//! - find_or_create: find-or-create by name
//! - tagging_ops: tag-record relationships

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::super::db::{with_connection, DbState};
use super::super::engine::StoreEngine;
use super::super::query::NameQuery;
use super::super::traits::{Repository, SearchableRepository};
use super::tag_lookup::TagLookupOperations;
use crate::domain::{Tag, TagName};
use crate::error::{DomainError, DomainResult};

/// Columns read for every tag; `count` is derived from taggings.
pub(super) const SELECT_TAGS: &str = "SELECT t.id, t.name,
        (SELECT COUNT(*) FROM taggings g WHERE g.tag_id = t.id) AS count
    FROM tags t";

/// SQLite implementation of Tag repository
pub struct TagRepository {
    pub(super) conn: Arc<Mutex<Option<Connection>>>,
    pub(super) engine: StoreEngine,
}

impl TagRepository {
    /// Share the connection of `db`, using its engine.
    pub fn new(db: &DbState) -> Self {
        Self::with_engine(db.conn.clone(), db.engine())
    }

    pub fn with_engine(conn: Arc<Mutex<Option<Connection>>>, engine: StoreEngine) -> Self {
        Self { conn, engine }
    }

    pub fn engine(&self) -> StoreEngine {
        self.engine
    }

    pub(super) async fn with_conn<R>(
        &self,
        f: impl FnOnce(&Connection) -> DomainResult<R> + Send,
    ) -> DomainResult<R> {
        with_connection(&self.conn, f).await
    }

    /// Insert a tag row for an already normalized name.
    pub async fn create_named(&self, name: &TagName) -> DomainResult<Tag> {
        let name = name.clone();
        let tag = self
            .with_conn(move |conn| {
                conn.execute("INSERT INTO tags (name) VALUES (?)", params![name.as_str()])
                    .map_err(|e| DomainError::from_store(e, name.as_str()))?;
                Ok(Tag::new(conn.last_insert_rowid(), name))
            })
            .await?;

        tracing::debug!(id = tag.id, name = %tag, "created tag");
        Ok(tag)
    }

    /// Give tag `id` a new name, normalized the same way as on creation.
    pub async fn rename(&self, id: i64, new_name: &str) -> DomainResult<Tag> {
        let name = TagName::parse(new_name)?;
        self.update(&Tag::new(id, name)).await
    }

    /// Run a name query. An empty query matches nothing and skips the store.
    ///
    /// Large queries run as several statements under one lock; their rows are
    /// merged, deduplicated and re-sorted before `limit` applies.
    pub(super) async fn query_tags(
        &self,
        query: NameQuery,
        order: TagOrder,
        limit: Option<usize>,
    ) -> DomainResult<Vec<Tag>> {
        let statements = query.where_clauses();
        if statements.is_empty() {
            return Ok(Vec::new());
        }

        let merged = statements.len() > 1;
        let mut tags = self
            .with_conn(move |conn| {
                let mut tags = Vec::new();
                let mut seen = HashSet::new();
                for (condition, values) in &statements {
                    let mut sql = format!(
                        "{} WHERE {} ORDER BY {}",
                        SELECT_TAGS,
                        condition,
                        order.column()
                    );
                    if let Some(limit) = limit {
                        sql.push_str(&format!(" LIMIT {}", limit));
                    }
                    tracing::trace!(%sql, params = values.len(), "tag name query");

                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map(params_from_iter(values.iter()), row_to_tag)?;
                    for tag in rows {
                        let tag = tag?;
                        if seen.insert(tag.id) {
                            tags.push(tag);
                        }
                    }
                }
                Ok(tags)
            })
            .await?;

        if merged {
            order.sort(&mut tags);
            if let Some(limit) = limit {
                tags.truncate(limit);
            }
        }
        Ok(tags)
    }
}

/// Result order for name queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagOrder {
    /// Creation order
    Id,
    Name,
}

impl TagOrder {
    fn column(self) -> &'static str {
        match self {
            TagOrder::Id => "t.id",
            TagOrder::Name => "t.name",
        }
    }

    fn sort(self, tags: &mut [Tag]) {
        match self {
            TagOrder::Id => tags.sort_by_key(|tag| tag.id),
            TagOrder::Name => tags.sort_by(|a, b| a.name().cmp(b.name())),
        }
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        self.create_named(entity.name()).await
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Tag>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!("{} WHERE t.id = ?", SELECT_TAGS))?;
            let mut rows = stmt.query_map(params![id], row_to_tag)?;
            let tag = rows.next().transpose()?;
            Ok(tag)
        })
        .await
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY t.name", SELECT_TAGS))?;
            let tags = stmt
                .query_map([], row_to_tag)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tags)
        })
        .await
    }

    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let id = entity.id;
        let name = entity.name().clone();

        let changed = self
            .with_conn(move |conn| {
                conn.execute("UPDATE tags SET name = ? WHERE id = ?", params![name.as_str(), id])
                    .map_err(|e| DomainError::from_store(e, name.as_str()))
            })
            .await?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Tag {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Tag {} not found", id)))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        // taggings go with it through ON DELETE CASCADE
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM tags WHERE id = ?", params![id])?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl SearchableRepository<Tag> for TagRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Tag>> {
        self.find_any_by_name_like(&[query]).await
    }
}

/// Convert a database row to Tag
pub(super) fn row_to_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag::with_count(
        row.get(0)?,
        TagName::from_stored(row.get(1)?),
        row.get(2)?,
    ))
}
