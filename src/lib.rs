//! Tag-All Store
//!
//! Normalized tag dictionary backed by SQLite.
//!
//! Layered architecture:
//! - domain: Tag names, tags and taggings
//! - repository: Connection setup, query building and tag operations
//! - config: Store configuration
//! - error: Error taxonomy shared by every layer

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;

pub use config::StoreConfig;
pub use domain::{comparable_name, Entity, Tag, TagName, Taggable, Tagging};
pub use error::{DomainError, DomainResult};
pub use repository::{
    init_db, DbState, NameQuery, Repository, SearchableRepository, StoreEngine,
    TagFindOrCreateOperations, TagLookupOperations, TagRepository, TaggingOperations,
};
