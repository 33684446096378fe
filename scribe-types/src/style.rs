//! Style tags applied to characters and blocks.
//!
//! The serialized names match the raw document format exchanged with the
//! store (`"BOLD"`, `"header-one"`, `"MUTABLE"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inline style carried by individual characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
}

impl InlineStyle {
    /// Every inline style, in serialization order.
    pub const ALL: [InlineStyle; 5] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Code,
        InlineStyle::Strikethrough,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Code => "CODE",
            Self::Strikethrough => "STRIKETHROUGH",
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural type of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
}

impl BlockType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unstyled => "unstyled",
            Self::HeaderOne => "header-one",
            Self::HeaderTwo => "header-two",
            Self::HeaderThree => "header-three",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code-block",
            Self::UnorderedListItem => "unordered-list-item",
            Self::OrderedListItem => "ordered-list-item",
        }
    }

    /// True for the two list item types.
    #[must_use]
    pub const fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedListItem | Self::OrderedListItem)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity mutability tag, carried through the raw form unchanged.
///
/// The editing primitives in `scribe-model` treat every entity as mutable:
/// inserted text never inherits an entity and removed text simply drops it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    #[default]
    Mutable,
    Immutable,
    Segmented,
}
