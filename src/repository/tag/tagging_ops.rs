//! Tagging Operations
//!
//! Operations for the many-to-many relationship between tags and tagged
//! records. Taggings belong to their tag and disappear with it.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::tag_repo::{row_to_tag, TagRepository, SELECT_TAGS};
use crate::domain::{Tag, Taggable, Tagging};
use crate::error::{DomainError, DomainResult};

const SELECT_TAGGINGS: &str =
    "SELECT id, tag_id, taggable_type, taggable_id, context, created_at FROM taggings";

/// Trait for tag-record relationship operations
#[async_trait]
pub trait TaggingOperations {
    /// Attach tag `tag_id` to `taggable` under `context`; a no-op if already attached
    async fn add_tagging(
        &self,
        tag_id: i64,
        taggable: &Taggable,
        context: &str,
    ) -> DomainResult<Tagging>;

    /// Detach a tag; returns whether a tagging was removed
    async fn remove_tagging(
        &self,
        tag_id: i64,
        taggable: &Taggable,
        context: &str,
    ) -> DomainResult<bool>;

    /// Tags on `taggable`, in one context or all of them, ordered by name
    async fn tags_for(&self, taggable: &Taggable, context: Option<&str>) -> DomainResult<Vec<Tag>>;

    /// Every tagging of tag `tag_id`, oldest first
    async fn taggings_for_tag(&self, tag_id: i64) -> DomainResult<Vec<Tagging>>;
}

#[async_trait]
impl TaggingOperations for TagRepository {
    async fn add_tagging(
        &self,
        tag_id: i64,
        taggable: &Taggable,
        context: &str,
    ) -> DomainResult<Tagging> {
        let context = validate_context(context)?;
        let taggable = taggable.clone();
        let created_at = chrono::Utc::now().timestamp_millis();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO taggings
                    (tag_id, taggable_type, taggable_id, context, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    tag_id,
                    taggable.taggable_type,
                    taggable.taggable_id,
                    context,
                    created_at
                ],
            )?;
            find_tagging(conn, tag_id, &taggable, &context)?.ok_or_else(|| {
                DomainError::NotFound(format!("Tagging of tag {} not found", tag_id))
            })
        })
        .await
    }

    async fn remove_tagging(
        &self,
        tag_id: i64,
        taggable: &Taggable,
        context: &str,
    ) -> DomainResult<bool> {
        let context = validate_context(context)?;
        let taggable = taggable.clone();

        self.with_conn(move |conn| {
            let removed = conn.execute(
                "DELETE FROM taggings
                 WHERE tag_id = ? AND taggable_type = ? AND taggable_id = ? AND context = ?",
                params![tag_id, taggable.taggable_type, taggable.taggable_id, context],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn tags_for(&self, taggable: &Taggable, context: Option<&str>) -> DomainResult<Vec<Tag>> {
        let taggable = taggable.clone();
        let context = context.map(str::to_string);

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{} WHERE t.id IN (
                     SELECT tg.tag_id FROM taggings tg
                     WHERE tg.taggable_type = ?1 AND tg.taggable_id = ?2
                       AND (?3 IS NULL OR tg.context = ?3)
                 )
                 ORDER BY t.name",
                SELECT_TAGS
            ))?;
            let tags = stmt
                .query_map(
                    params![taggable.taggable_type, taggable.taggable_id, context],
                    row_to_tag,
                )?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tags)
        })
        .await
    }

    async fn taggings_for_tag(&self, tag_id: i64) -> DomainResult<Vec<Tagging>> {
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare(&format!("{} WHERE tag_id = ? ORDER BY id", SELECT_TAGGINGS))?;
            let taggings = stmt
                .query_map(params![tag_id], row_to_tagging)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(taggings)
        })
        .await
    }
}

fn validate_context(context: &str) -> DomainResult<String> {
    if context.trim().is_empty() {
        return Err(DomainError::Validation("context can't be blank".to_string()));
    }
    Ok(context.to_string())
}

fn find_tagging(
    conn: &Connection,
    tag_id: i64,
    taggable: &Taggable,
    context: &str,
) -> DomainResult<Option<Tagging>> {
    let tagging = conn
        .query_row(
            &format!(
                "{} WHERE tag_id = ? AND taggable_type = ? AND taggable_id = ? AND context = ?",
                SELECT_TAGGINGS
            ),
            params![tag_id, taggable.taggable_type, taggable.taggable_id, context],
            row_to_tagging,
        )
        .optional()?;
    Ok(tagging)
}

fn row_to_tagging(row: &Row<'_>) -> rusqlite::Result<Tagging> {
    Ok(Tagging {
        id: row.get(0)?,
        tag_id: row.get(1)?,
        taggable: Taggable {
            taggable_type: row.get(2)?,
            taggable_id: row.get(3)?,
        },
        context: row.get(4)?,
        created_at: row.get(5)?,
    })
}
