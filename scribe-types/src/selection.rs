//! Caret positions and selections.
//!
//! A selection is stored in document order: `start` never follows `end`.
//! Whether that holds for a concrete document is checked by the model when
//! the selection is resolved against it.

use crate::BlockKey;
use serde::{Deserialize, Serialize};

/// A caret position: a block and a character offset inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub block: BlockKey,
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub fn new(block: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            block: block.into(),
            offset,
        }
    }
}

/// The active range of interest, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    start: Position,
    end: Position,
}

impl Selection {
    /// Creates a selection spanning `start` to `end`.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a selection inside a single block.
    #[must_use]
    pub fn within(block: impl Into<BlockKey>, start: usize, end: usize) -> Self {
        let block = block.into();
        Self {
            start: Position::new(block.clone(), start),
            end: Position::new(block, end),
        }
    }

    /// Creates a collapsed selection (a caret) at `position`.
    #[must_use]
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position.clone(),
            end: position,
        }
    }

    #[must_use]
    pub fn start(&self) -> &Position {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Position {
        &self.end
    }

    /// True when no range is selected.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns the caret at the start of this selection.
    #[must_use]
    pub fn collapse_to_start(&self) -> Self {
        Self::collapsed(self.start.clone())
    }
}
