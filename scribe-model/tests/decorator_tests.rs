use scribe_model::{
    Block, CharacterMetadata, DecoratedSpan, Decorator, Document, EntityMap, LiveDocument,
    RangeIter,
};
use scribe_types::{BlockKey, BlockType, InlineStyle, Position};

fn bold_ranges<'a>(block: &'a Block, _: &'a EntityMap) -> RangeIter<'a> {
    Box::new(block.style_ranges(InlineStyle::Bold))
}

fn first_three<'a>(block: &'a Block, _: &'a EntityMap) -> RangeIter<'a> {
    Box::new(std::iter::once(0..3usize.min(block.len())))
}

fn bold_block() -> Block {
    let mut characters = vec![CharacterMetadata::plain(); 6];
    for c in &mut characters[2..4] {
        c.add_style(InlineStyle::Bold);
    }
    Block::with_characters(BlockKey::new("b1"), BlockType::Unstyled, "abcdef", characters)
        .unwrap()
}

#[test]
fn decorate_reports_strategy_ranges() {
    let decorator = Decorator::new().with(bold_ranges, "bold");
    let spans = decorator.decorate(&bold_block(), &EntityMap::new());
    assert_eq!(
        spans,
        vec![DecoratedSpan {
            range: 2..4,
            class_name: "bold".to_string(),
            entity: None,
        }]
    );
}

#[test]
fn earlier_strategy_wins_overlaps() {
    let decorator = Decorator::new()
        .with(first_three, "first")
        .with(bold_ranges, "bold");
    let spans = decorator.decorate(&bold_block(), &EntityMap::new());
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].class_name, "first");
}

#[test]
fn empty_decorator_decorates_nothing() {
    let decorator = Decorator::new();
    assert!(decorator.is_empty());
    assert!(decorator.decorate(&bold_block(), &EntityMap::new()).is_empty());
}

#[test]
fn live_document_span_at() {
    let doc = Document::from_parts(vec![bold_block()], EntityMap::new()).unwrap();
    let live = LiveDocument::new(doc, Decorator::new().with(bold_ranges, "bold"));
    assert!(live.span_at(&Position::new("b1", 2)).unwrap().is_some());
    assert!(live.span_at(&Position::new("b1", 4)).unwrap().is_none());
    assert!(live.span_at(&Position::new("nope", 0)).is_err());
}
