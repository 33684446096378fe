//! Live document model for Scribe.
//!
//! Defines the in-memory document the editor works on:
//! - [`CharacterMetadata`]: per-character inline styles and entity reference
//! - [`Block`]: a unit of text with its character metadata and block type
//! - [`Entity`] / [`EntityData`] / [`EntityKind`]: metadata records attached to text
//! - [`EntityMap`]: the document-scoped table of entity records
//! - [`Document`]: ordered blocks plus the entity map, mutated copy-on-write
//! - [`Decorator`] / [`LiveDocument`]: range-lookup strategies bound to a document
//!
//! Every mutation on [`Document`] takes `&self` and returns a new value; the
//! previous value is never touched.

mod block;
mod character;
mod decorator;
mod document;
mod entity;

pub use block::{Block, Runs};
pub use character::CharacterMetadata;
pub use decorator::{DecoratedSpan, Decorator, DecoratorEntry, LiveDocument, RangeIter, Strategy};
pub use document::Document;
pub use entity::{Entity, EntityData, EntityKind, EntityMap};
