//! Decorators: range-lookup strategies that mark spans of a block for
//! special rendering.
//!
//! A strategy is a plain function value. The decorator holds an ordered list
//! of them; when two strategies claim overlapping characters, the earlier
//! entry wins and the later range is dropped whole.

use crate::{Block, Document, EntityMap};
use scribe_types::{BlockKey, EntityKey, Error, Position, Result};
use std::ops::Range;

/// Lazy sequence of character ranges produced by a strategy.
pub type RangeIter<'a> = Box<dyn Iterator<Item = Range<usize>> + 'a>;

/// Finds the ranges of a block that should be decorated.
pub type Strategy = for<'a> fn(&'a Block, &'a EntityMap) -> RangeIter<'a>;

/// A strategy paired with the class its spans render with.
#[derive(Debug, Clone)]
pub struct DecoratorEntry {
    pub strategy: Strategy,
    pub class_name: String,
}

/// A decorated span of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSpan {
    pub range: Range<usize>,
    pub class_name: String,
    /// The entity under the first character of the span, if any.
    pub entity: Option<EntityKey>,
}

/// An ordered set of decoration strategies.
#[derive(Debug, Clone, Default)]
pub struct Decorator {
    entries: Vec<DecoratorEntry>,
}

impl Decorator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strategy.
    #[must_use]
    pub fn with(mut self, strategy: Strategy, class_name: impl Into<String>) -> Self {
        self.entries.push(DecoratorEntry {
            strategy,
            class_name: class_name.into(),
        });
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[DecoratorEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every strategy over `block` and returns the resulting spans in
    /// offset order.
    #[must_use]
    pub fn decorate(&self, block: &Block, entities: &EntityMap) -> Vec<DecoratedSpan> {
        let mut claimed = vec![false; block.len()];
        let mut spans = Vec::new();
        for entry in &self.entries {
            for range in (entry.strategy)(block, entities) {
                if range.is_empty()
                    || range.end > claimed.len()
                    || claimed[range.clone()].iter().any(|c| *c)
                {
                    continue;
                }
                claimed[range.clone()].fill(true);
                spans.push(DecoratedSpan {
                    entity: block.entity_at(range.start),
                    range,
                    class_name: entry.class_name.clone(),
                });
            }
        }
        spans.sort_by_key(|span| span.range.start);
        spans
    }
}

/// A document bound to the decorator used to render it.
#[derive(Debug, Clone)]
pub struct LiveDocument {
    document: Document,
    decorator: Decorator,
}

impl LiveDocument {
    #[must_use]
    pub fn new(document: Document, decorator: Decorator) -> Self {
        Self {
            document,
            decorator,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn decorator(&self) -> &Decorator {
        &self.decorator
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Swaps in a new document, keeping the decorator.
    #[must_use]
    pub fn with_document(self, document: Document) -> Self {
        Self {
            document,
            decorator: self.decorator,
        }
    }

    /// Replaces the document in place, returning the previous one.
    pub fn set_document(&mut self, document: Document) -> Document {
        std::mem::replace(&mut self.document, document)
    }

    /// Decorated spans of one block.
    pub fn spans(&self, key: &BlockKey) -> Result<Vec<DecoratedSpan>> {
        let block = self
            .document
            .block(key)
            .ok_or_else(|| Error::UnknownBlock(key.clone()))?;
        Ok(self.decorator.decorate(block, self.document.entities()))
    }

    /// The decorated span containing the character at `position`, if any.
    pub fn span_at(&self, position: &Position) -> Result<Option<DecoratedSpan>> {
        Ok(self
            .spans(&position.block)?
            .into_iter()
            .find(|span| span.range.contains(&position.offset)))
    }
}
