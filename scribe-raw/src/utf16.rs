//! Offset translation between the live model (counted in `char`s) and the
//! raw form (counted in UTF-16 code units, as browser editors persist it).

use scribe_types::{BlockKey, Error, Result};
use std::ops::Range;

/// UTF-16 offset of every character boundary of one block's text.
pub(crate) struct Utf16Offsets {
    /// `boundaries[i]` is the UTF-16 offset of char `i`; the last entry is
    /// the text's UTF-16 length.
    boundaries: Vec<usize>,
}

impl Utf16Offsets {
    pub(crate) fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut at = 0;
        boundaries.push(at);
        for c in text.chars() {
            at += c.len_utf16();
            boundaries.push(at);
        }
        Self { boundaries }
    }

    /// Length of the text in UTF-16 code units.
    pub(crate) fn len(&self) -> usize {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Translates a char range into `(offset, length)` in UTF-16 units.
    pub(crate) fn to_utf16(&self, range: Range<usize>) -> (usize, usize) {
        let start = self.boundaries[range.start];
        (start, self.boundaries[range.end] - start)
    }

    /// Translates a raw `(offset, length)` into a char range.
    ///
    /// Fails when the range reaches past the text or cuts a surrogate pair.
    pub(crate) fn to_chars(
        &self,
        block: &BlockKey,
        offset: usize,
        length: usize,
    ) -> Result<Range<usize>> {
        let end = offset
            .checked_add(length)
            .filter(|end| *end <= self.len())
            .ok_or_else(|| {
                Error::MalformedDocument(format!(
                    "range {offset}+{length} exceeds block {block} of length {}",
                    self.len()
                ))
            })?;
        let start = self.char_index(block, offset)?;
        let end = self.char_index(block, end)?;
        Ok(start..end)
    }

    fn char_index(&self, block: &BlockKey, offset: usize) -> Result<usize> {
        self.boundaries.binary_search(&offset).map_err(|_| {
            Error::MalformedDocument(format!(
                "offset {offset} splits a surrogate pair in block {block}"
            ))
        })
    }
}
