//! The live document: ordered blocks plus an entity map.
//!
//! Mutations never modify `self`; each returns a new `Document`. Selections
//! are resolved against the document before anything is changed, so a
//! failing call leaves nothing half-applied.

use crate::{Block, CharacterMetadata, Entity, EntityMap};
use scribe_types::{
    BlockKey, BlockType, EntityKey, Error, InlineStyle, Position, Result, Selection,
};
use std::collections::HashSet;
use std::ops::Range;

/// A selection resolved to one character range per covered block.
#[derive(Debug)]
struct Span {
    index: usize,
    range: Range<usize>,
}

/// An ordered sequence of blocks with a shared entity map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
    entities: EntityMap,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A document holding a single empty unstyled block.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::new(BlockKey::generate(), BlockType::Unstyled, "")],
            entities: EntityMap::new(),
        }
    }

    /// One unstyled block per line of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| Block::new(BlockKey::generate(), BlockType::Unstyled, line))
            .collect();
        Self {
            blocks,
            entities: EntityMap::new(),
        }
    }

    /// Assembles a document from parts, checking its structural invariants:
    /// at least one block, unique block keys, and every entity reference
    /// resolving to a record in `entities`.
    pub fn from_parts(blocks: Vec<Block>, entities: EntityMap) -> Result<Self> {
        if blocks.is_empty() {
            return Err(Error::MalformedDocument("document has no blocks".to_string()));
        }
        let mut seen = HashSet::new();
        for block in &blocks {
            if !seen.insert(block.key()) {
                return Err(Error::MalformedDocument(format!(
                    "duplicate block key {}",
                    block.key()
                )));
            }
            for (_, key) in block.entity_ranges() {
                if !entities.contains(key) {
                    return Err(Error::UnknownEntity(key));
                }
            }
        }
        Ok(Self { blocks, entities })
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    /// Position of a block in display order.
    #[must_use]
    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    #[must_use]
    pub fn entities(&self) -> &EntityMap {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// The text of every block, joined by newlines.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Caret at the very beginning of the document.
    #[must_use]
    pub fn start_position(&self) -> Position {
        Position::new(self.blocks[0].key().clone(), 0)
    }

    /// Caret at the very end of the document.
    #[must_use]
    pub fn end_position(&self) -> Position {
        let last = &self.blocks[self.blocks.len() - 1];
        Position::new(last.key().clone(), last.len())
    }

    /// The entity referenced at a caret position (the character right after it).
    pub fn entity_at(&self, position: &Position) -> Result<Option<EntityKey>> {
        let (_, block) = self.locate(position)?;
        Ok(block.entity_at(position.offset))
    }

    /// Checks that a selection refers to this document and is in order.
    pub fn validate(&self, selection: &Selection) -> Result<()> {
        self.resolve(selection).map(|_| ())
    }

    // ── Entities ─────────────────────────────────────────────────

    /// Adds an entity record and returns the new document with its key.
    pub fn create_entity(&self, entity: Entity) -> Result<(Self, EntityKey)> {
        let mut next = self.clone();
        let key = next.entities.create(entity)?;
        Ok((next, key))
    }

    /// Sets (or with `None`, clears) the entity reference of every character
    /// in `selection`. Existing references in the range are overwritten.
    pub fn apply_entity(&self, selection: &Selection, entity: Option<EntityKey>) -> Result<Self> {
        if let Some(key) = entity {
            if !self.entities.contains(key) {
                return Err(Error::UnknownEntity(key));
            }
        }
        let spans = self.resolve(selection)?;
        let mut next = self.clone();
        for span in spans {
            for c in &mut next.blocks[span.index].characters_mut()[span.range] {
                c.set_entity(entity);
            }
        }
        Ok(next)
    }

    // ── Styling ──────────────────────────────────────────────────

    /// Adds `style` to the selected characters, or removes it when every
    /// selected character already has it. A collapsed selection is a no-op.
    pub fn toggle_inline_style(&self, selection: &Selection, style: InlineStyle) -> Result<Self> {
        let spans = self.resolve(selection)?;
        if selection.is_collapsed() {
            return Ok(self.clone());
        }
        let all_styled = spans.iter().all(|span| {
            self.blocks[span.index].characters()[span.range.clone()]
                .iter()
                .all(|c| c.has_style(style))
        });
        let mut next = self.clone();
        for span in spans {
            for c in &mut next.blocks[span.index].characters_mut()[span.range] {
                if all_styled {
                    c.remove_style(style);
                } else {
                    c.add_style(style);
                }
            }
        }
        Ok(next)
    }

    /// Sets the type of every block touched by `selection`.
    pub fn set_block_type(&self, selection: &Selection, block_type: BlockType) -> Result<Self> {
        let spans = self.resolve(selection)?;
        let mut next = self.clone();
        for span in spans {
            next.blocks[span.index].set_block_type(block_type);
        }
        Ok(next)
    }

    /// Applies `block_type` to the touched blocks, or resets them to
    /// unstyled when the block at the selection start already has it.
    pub fn toggle_block_type(&self, selection: &Selection, block_type: BlockType) -> Result<Self> {
        let (_, start) = self.locate(selection.start())?;
        let target = if start.block_type() == block_type {
            BlockType::Unstyled
        } else {
            block_type
        };
        self.set_block_type(selection, target)
    }

    // ── Text editing ─────────────────────────────────────────────

    /// Replaces the selected range with `text` and returns the caret after
    /// the inserted text.
    ///
    /// A multi-block selection merges its first and last blocks. Inserted
    /// characters take the styles of the character before the caret and
    /// carry no entity.
    pub fn replace_text(&self, selection: &Selection, text: &str) -> Result<(Self, Position)> {
        let spans = self.resolve(selection)?;
        let first = &spans[0];
        let last = &spans[spans.len() - 1];
        let (index, offset) = (first.index, first.range.start);

        let mut next = self.clone();
        if first.index == last.index {
            next.blocks[index].splice(first.range.clone(), "", &CharacterMetadata::plain());
        } else {
            let tail = next.blocks[last.index].split_off(last.range.end, BlockKey::generate());
            let head_len = next.blocks[index].len();
            next.blocks[index].splice(offset..head_len, "", &CharacterMetadata::plain());
            next.blocks[index].append(tail);
            next.blocks.drain(index + 1..=last.index);
        }

        let block = &mut next.blocks[index];
        let inherited = match offset.checked_sub(1) {
            Some(prev) => CharacterMetadata::styled(block.characters()[prev].styles().iter().copied()),
            None => CharacterMetadata::plain(),
        };
        block.splice(offset..offset, text, &inherited);

        let caret = Position::new(block.key().clone(), offset + text.chars().count());
        Ok((next, caret))
    }

    /// Replaces the selected range with nothing, then splits the block at
    /// the caret. Returns the caret at the start of the new block.
    pub fn split_block(&self, selection: &Selection) -> Result<(Self, Position)> {
        let (mut next, caret) = self.replace_text(selection, "")?;
        let index = next
            .block_index(&caret.block)
            .ok_or_else(|| Error::UnknownBlock(caret.block.clone()))?;
        let tail = next.blocks[index].split_off(caret.offset, BlockKey::generate());
        let caret = Position::new(tail.key().clone(), 0);
        next.blocks.insert(index + 1, tail);
        Ok((next, caret))
    }

    // ── Resolution ───────────────────────────────────────────────

    fn locate(&self, position: &Position) -> Result<(usize, &Block)> {
        let index = self
            .block_index(&position.block)
            .ok_or_else(|| Error::UnknownBlock(position.block.clone()))?;
        let block = &self.blocks[index];
        if position.offset > block.len() {
            return Err(Error::OffsetOutOfRange {
                block: position.block.clone(),
                offset: position.offset,
                len: block.len(),
            });
        }
        Ok((index, block))
    }

    fn resolve(&self, selection: &Selection) -> Result<Vec<Span>> {
        let (start_index, _) = self.locate(selection.start())?;
        let (end_index, end_block) = self.locate(selection.end())?;
        let start_offset = selection.start().offset;
        let end_offset = selection.end().offset;

        if start_index > end_index || (start_index == end_index && start_offset > end_offset) {
            return Err(Error::InvalidSelection(format!(
                "end {}:{} precedes start {}:{}",
                end_block.key(),
                end_offset,
                selection.start().block,
                start_offset
            )));
        }

        Ok((start_index..=end_index)
            .map(|index| {
                let from = if index == start_index { start_offset } else { 0 };
                let to = if index == end_index {
                    end_offset
                } else {
                    self.blocks[index].len()
                };
                Span {
                    index,
                    range: from..to,
                }
            })
            .collect())
    }
}
