use crate::utf16::Utf16Offsets;
use crate::{RawBlock, RawDocument, RawEntity, RawEntityRange, RawInlineStyleRange};
use scribe_model::{Block, Document};
use scribe_types::InlineStyle;

/// Converts a live document into its raw form.
///
/// Offsets and lengths are written in UTF-16 code units. Style ranges are
/// emitted style by style (in [`InlineStyle::ALL`] order),
/// each as maximal runs. Every entity in the map is exported under its live
/// key, including records no range references any more.
#[must_use]
pub fn export(document: &Document) -> RawDocument {
    let blocks = document.blocks().iter().map(export_block).collect();
    let entity_map = document
        .entities()
        .iter()
        .map(|(key, entity)| {
            let raw = RawEntity {
                entity_type: entity.kind().as_str().to_string(),
                mutability: entity.mutability(),
                data: entity.data().to_payload(),
            };
            (key, raw)
        })
        .collect();
    RawDocument { blocks, entity_map }
}

fn export_block(block: &Block) -> RawBlock {
    let offsets = &Utf16Offsets::new(block.text());
    let inline_style_ranges = InlineStyle::ALL
        .iter()
        .flat_map(|&style| {
            block.style_ranges(style).map(move |range| {
                let (offset, length) = offsets.to_utf16(range);
                RawInlineStyleRange {
                    offset,
                    length,
                    style,
                }
            })
        })
        .collect();
    let entity_ranges = block
        .entity_ranges()
        .map(|(range, key)| {
            let (offset, length) = offsets.to_utf16(range);
            RawEntityRange {
                offset,
                length,
                key,
            }
        })
        .collect();
    RawBlock {
        key: block.key().clone(),
        text: block.text().to_string(),
        block_type: block.block_type(),
        depth: block.depth(),
        inline_style_ranges,
        entity_ranges,
        data: block.data().clone(),
    }
}
