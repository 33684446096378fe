use crate::utf16::Utf16Offsets;
use crate::{RawBlock, RawDocument};
use scribe_model::{
    Block, CharacterMetadata, Decorator, Document, Entity, EntityData, EntityKind, EntityMap,
    LiveDocument,
};
use scribe_types::{Error, Result};

/// Rebuilds a live document from its raw form and binds `decorator` to it.
pub fn import(raw: &RawDocument, decorator: Decorator) -> Result<LiveDocument> {
    Ok(LiveDocument::new(import_document(raw)?, decorator))
}

/// Rebuilds the document content alone.
///
/// Raw offsets and lengths are UTF-16 code units and are translated to
/// character offsets here.
///
/// Rejects, with [`Error::MalformedDocument`] or [`Error::UnknownEntity`]:
/// ranges reaching past the end of their block or splitting a surrogate
/// pair, references to entities
/// missing from the map, unknown entity types, payloads that do not match
/// their type, duplicate block keys, and documents without blocks.
pub fn import_document(raw: &RawDocument) -> Result<Document> {
    let mut entities = EntityMap::new();
    for (key, raw_entity) in &raw.entity_map {
        let kind = EntityKind::parse(&raw_entity.entity_type).ok_or_else(|| {
            Error::MalformedDocument(format!(
                "entity {key} has unknown type {:?}",
                raw_entity.entity_type
            ))
        })?;
        let data = EntityData::from_payload(kind, &raw_entity.data)?;
        entities.insert(*key, Entity::new(data, raw_entity.mutability));
    }

    let blocks = raw
        .blocks
        .iter()
        .map(|block| import_block(block, &entities))
        .collect::<Result<Vec<_>>>()?;

    Document::from_parts(blocks, entities)
}

fn import_block(raw: &RawBlock, entities: &EntityMap) -> Result<Block> {
    let offsets = Utf16Offsets::new(&raw.text);
    let mut characters = vec![CharacterMetadata::plain(); raw.text.chars().count()];

    for style_range in &raw.inline_style_ranges {
        let range = offsets.to_chars(&raw.key, style_range.offset, style_range.length)?;
        for c in &mut characters[range] {
            c.add_style(style_range.style);
        }
    }

    for entity_range in &raw.entity_ranges {
        if !entities.contains(entity_range.key) {
            return Err(Error::UnknownEntity(entity_range.key));
        }
        let range = offsets.to_chars(&raw.key, entity_range.offset, entity_range.length)?;
        for c in &mut characters[range] {
            c.set_entity(Some(entity_range.key));
        }
    }

    Ok(
        Block::with_characters(raw.key.clone(), raw.block_type, raw.text.clone(), characters)?
            .with_depth(raw.depth)
            .with_data(raw.data.clone()),
    )
}
