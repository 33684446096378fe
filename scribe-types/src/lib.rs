//! Core type definitions for Scribe.
//!
//! This crate defines the small vocabulary shared by every layer of the
//! editor core:
//! - Block and entity identifiers
//! - Caret positions and selections
//! - Inline style, block type and entity mutability tags
//!
//! The document model itself (blocks, characters, entities) lives in
//! `scribe-model`; the raw interchange form lives in `scribe-raw`.

mod ids;
mod selection;
mod style;

pub use ids::{BlockKey, EntityKey};
pub use selection::{Position, Selection};
pub use style::{BlockType, InlineStyle, Mutability};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or transforming a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown block: {0}")]
    UnknownBlock(BlockKey),

    #[error("offset {offset} out of range for block {block} (length {len})")]
    OffsetOutOfRange {
        block: BlockKey,
        offset: usize,
        len: usize,
    },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("unknown entity: {0}")]
    UnknownEntity(EntityKey),

    #[error("no free entity key left")]
    EntityKeysExhausted,

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid entity key: {0}")]
    InvalidEntityKey(#[from] std::num::ParseIntError),
}
