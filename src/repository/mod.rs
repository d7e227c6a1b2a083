//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod db;
mod engine;
mod query;
mod traits;
pub mod tag;


pub use db::{init_db, DbState};
pub use engine::StoreEngine;
pub use query::{escape_like, NamePredicate, NameQuery, MAX_PREDICATES_PER_STATEMENT};
pub use tag::{TagFindOrCreateOperations, TagLookupOperations, TagRepository, TaggingOperations};
pub use traits::{Repository, SearchableRepository};
