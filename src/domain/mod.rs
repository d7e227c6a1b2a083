//! Domain Layer
//!
//! Contains the tag entities and the name normalization they rely on.
//! This layer has NO storage dependencies (only serde for serialization).

mod entity;
mod tag;
mod tag_name;
mod tagging;

pub use entity::Entity;
pub use tag::Tag;
pub use tag_name::{comparable_name, TagName};
pub use tagging::{Taggable, Tagging, DEFAULT_CONTEXT};
