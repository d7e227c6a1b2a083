//! Tag Repository Module
//!
//! This module provides tag repository functionality split into specialized sub-modules:
//! - tag_repo: Core CRUD operations
//! - tag_lookup: Exact and substring name lookups
//! - find_or_create: Resolve names to tags, creating the missing ones
//! - tagging_ops: Tag-record relationship operations

mod find_or_create;
mod tag_lookup;
mod tag_repo;
mod tagging_ops;

pub use tag_repo::TagRepository;

// Re-export all operation traits so they can be used by importing TagRepository
pub use find_or_create::TagFindOrCreateOperations;
pub use tag_lookup::TagLookupOperations;
pub use tagging_ops::TaggingOperations;
