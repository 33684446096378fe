//! Blocks: the unit of text content in a document.
//!
//! A block stores its text once as a `String` and its per-character metadata
//! as a parallel vector, one entry per `char`. All offsets in this crate are
//! character offsets, never byte offsets.

use crate::CharacterMetadata;
use scribe_types::{BlockKey, BlockType, EntityKey, Error, InlineStyle, Result};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::ops::Range;

/// An ordered unit of text with its own style and entity metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    key: BlockKey,
    block_type: BlockType,
    depth: u8,
    text: String,
    characters: Vec<CharacterMetadata>,
    data: Map<String, Value>,
}

impl Block {
    /// Creates a block whose characters carry no styles or entities.
    #[must_use]
    pub fn new(key: BlockKey, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let characters = vec![CharacterMetadata::plain(); text.chars().count()];
        Self {
            key,
            block_type,
            depth: 0,
            text,
            characters,
            data: Map::new(),
        }
    }

    /// Creates a block with explicit character metadata.
    ///
    /// Fails when the metadata does not cover the text one-to-one.
    pub fn with_characters(
        key: BlockKey,
        block_type: BlockType,
        text: impl Into<String>,
        characters: Vec<CharacterMetadata>,
    ) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if characters.len() != len {
            return Err(Error::MalformedDocument(format!(
                "block {key} has {len} characters but {} metadata entries",
                characters.len()
            )));
        }
        Ok(Self {
            key,
            block_type,
            depth: 0,
            text,
            characters,
            data: Map::new(),
        })
    }

    /// Sets the nesting depth (used by list items).
    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Attaches free-form block data, preserved through serialization.
    #[must_use]
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    #[must_use]
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn characters(&self) -> &[CharacterMetadata] {
        &self.characters
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The entity referenced by the character at `offset`, if any.
    #[must_use]
    pub fn entity_at(&self, offset: usize) -> Option<EntityKey> {
        self.characters.get(offset).and_then(CharacterMetadata::entity)
    }

    /// Returns the text covered by a character range.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        &self.text[start..end]
    }

    /// Groups characters into maximal runs of equal keys.
    ///
    /// `key_of` maps each character to `Some(key)` to include it or `None`
    /// to skip it. Adjacent characters with equal keys form one run. The
    /// iterator is lazy and cheap to clone, so callers can restart it.
    pub fn runs<K, F>(&self, key_of: F) -> Runs<'_, K, F>
    where
        K: PartialEq,
        F: Fn(&CharacterMetadata) -> Option<K>,
    {
        Runs {
            characters: &self.characters,
            pos: 0,
            key_of,
            _key: PhantomData,
        }
    }

    /// Runs of characters referencing the same entity.
    pub fn entity_ranges(&self) -> impl Iterator<Item = (Range<usize>, EntityKey)> + '_ {
        self.runs(CharacterMetadata::entity)
    }

    /// Runs of characters carrying `style`.
    pub fn style_ranges(&self, style: InlineStyle) -> impl Iterator<Item = Range<usize>> + '_ {
        self.runs(move |c| c.has_style(style).then_some(()))
            .map(|(range, ())| range)
    }

    // ── Crate-internal editing ───────────────────────────────────

    pub(crate) fn set_block_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    pub(crate) fn characters_mut(&mut self) -> &mut [CharacterMetadata] {
        &mut self.characters
    }

    /// Replaces the characters in `range` with `insert`, every inserted
    /// character carrying `meta`.
    pub(crate) fn splice(&mut self, range: Range<usize>, insert: &str, meta: &CharacterMetadata) {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        self.text.replace_range(start..end, insert);
        let inserted = std::iter::repeat_n(meta.clone(), insert.chars().count());
        self.characters.splice(range, inserted);
    }

    /// Cuts the block at `offset`, returning the tail as a new block with
    /// the same type and depth.
    pub(crate) fn split_off(&mut self, offset: usize, key: BlockKey) -> Block {
        let at = self.byte_index(offset);
        let text = self.text.split_off(at);
        let characters = self.characters.split_off(offset);
        Block {
            key,
            block_type: self.block_type,
            depth: self.depth,
            text,
            characters,
            data: Map::new(),
        }
    }

    /// Appends another block's content to this one.
    pub(crate) fn append(&mut self, other: Block) {
        self.text.push_str(&other.text);
        self.characters.extend(other.characters);
    }

    fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Lazy iterator over maximal runs of equally-keyed characters.
///
/// Created by [`Block::runs`].
#[derive(Clone)]
pub struct Runs<'a, K, F> {
    characters: &'a [CharacterMetadata],
    pos: usize,
    key_of: F,
    _key: PhantomData<fn() -> K>,
}

impl<K, F> Iterator for Runs<'_, K, F>
where
    K: PartialEq,
    F: Fn(&CharacterMetadata) -> Option<K>,
{
    type Item = (Range<usize>, K);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.characters.len() {
            let start = self.pos;
            let current = (self.key_of)(&self.characters[start]);
            self.pos += 1;
            while self.pos < self.characters.len()
                && (self.key_of)(&self.characters[self.pos]) == current
            {
                self.pos += 1;
            }
            if let Some(key) = current {
                return Some((start..self.pos, key));
            }
        }
        None
    }
}
