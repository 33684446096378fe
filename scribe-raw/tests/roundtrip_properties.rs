//! Property-based tests for the serialization bridge.
//!
//! For any document D reachable through the editing operations,
//! `import(export(D))` must reproduce D exactly, both directly and through
//! JSON text.

use proptest::prelude::*;
use scribe_model::{Block, Document, Entity, EntityMap};
use scribe_raw::{RawDocument, export, import_document};
use scribe_types::{BlockKey, BlockType, InlineStyle, Selection};

#[derive(Debug, Clone)]
enum Op {
    Style(usize, usize, usize, InlineStyle),
    Describe(usize, usize, usize, String),
    Detach(usize, usize, usize),
    Retype(usize, BlockType),
}

fn block_type_strategy() -> impl Strategy<Value = BlockType> {
    prop::sample::select(vec![
        BlockType::Unstyled,
        BlockType::HeaderOne,
        BlockType::HeaderTwo,
        BlockType::HeaderThree,
        BlockType::Blockquote,
        BlockType::CodeBlock,
        BlockType::UnorderedListItem,
        BlockType::OrderedListItem,
    ])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), any::<usize>(), any::<usize>(), prop::sample::select(InlineStyle::ALL.to_vec()))
            .prop_map(|(b, s, e, style)| Op::Style(b, s, e, style)),
        (any::<usize>(), any::<usize>(), any::<usize>(), "[a-z ]{0,10}")
            .prop_map(|(b, s, e, text)| Op::Describe(b, s, e, text)),
        (any::<usize>(), any::<usize>(), any::<usize>()).prop_map(|(b, s, e)| Op::Detach(b, s, e)),
        (any::<usize>(), block_type_strategy()).prop_map(|(b, t)| Op::Retype(b, t)),
    ]
}

fn selection_in(doc: &Document, block: usize, a: usize, b: usize) -> Selection {
    let block = &doc.blocks()[block % doc.blocks().len()];
    let len = block.len() + 1;
    let (a, b) = (a % len, b % len);
    Selection::within(block.key().clone(), a.min(b), a.max(b))
}

fn build(lines: Vec<String>, ops: Vec<Op>) -> Document {
    let blocks = lines
        .iter()
        .enumerate()
        .map(|(i, line)| Block::new(BlockKey::new(format!("b{i}")), BlockType::Unstyled, line.as_str()))
        .collect();
    let mut doc = Document::from_parts(blocks, EntityMap::new()).unwrap();
    for op in ops {
        doc = match op {
            Op::Style(b, s, e, style) => {
                let sel = selection_in(&doc, b, s, e);
                doc.toggle_inline_style(&sel, style).unwrap()
            }
            Op::Describe(b, s, e, text) => {
                let sel = selection_in(&doc, b, s, e);
                let (with_entity, key) = doc.create_entity(Entity::new_description(text)).unwrap();
                with_entity.apply_entity(&sel, Some(key)).unwrap()
            }
            Op::Detach(b, s, e) => {
                let sel = selection_in(&doc, b, s, e);
                doc.apply_entity(&sel, None).unwrap()
            }
            Op::Retype(b, t) => {
                let sel = selection_in(&doc, b, 0, 0);
                doc.set_block_type(&sel, t).unwrap()
            }
        };
    }
    doc
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec("[a-zé😀 ]{0,16}", 1..5),
        prop::collection::vec(op_strategy(), 0..12),
    )
        .prop_map(|(lines, ops)| build(lines, ops))
}

proptest! {
    #[test]
    fn import_export_roundtrip(doc in document_strategy()) {
        let back = import_document(&export(&doc)).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn json_text_roundtrip(doc in document_strategy()) {
        let json = export(&doc).to_json().unwrap();
        let back = import_document(&RawDocument::from_json(&json).unwrap()).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn export_is_stable_across_reimport(doc in document_strategy()) {
        let once = export(&doc);
        let twice = export(&import_document(&once).unwrap());
        prop_assert_eq!(once, twice);
    }
}
