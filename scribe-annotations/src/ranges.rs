use scribe_model::{Block, Decorator, EntityKind, EntityMap, RangeIter};
use std::ops::Range;

/// Class name given to decorated description spans.
pub const DESCRIPTION_CLASS: &str = "description";

/// Finds the runs of `block` whose characters reference an entity of `kind`.
///
/// A run is a maximal stretch of characters referencing the same entity, so
/// two different entities that touch yield two ranges. The iterator reads the
/// block lazily and can be cloned to restart the scan.
pub fn find_entity_ranges_of_type<'a>(
    block: &'a Block,
    entities: &'a EntityMap,
    kind: EntityKind,
) -> impl Iterator<Item = Range<usize>> + Clone + 'a {
    block
        .runs(move |c| {
            c.entity()
                .filter(|key| entities.kind_of(*key) == Some(kind))
        })
        .map(|(range, _)| range)
}

/// Decoration strategy for DESCRIPTION entities.
pub fn find_description_entities<'a>(block: &'a Block, entities: &'a EntityMap) -> RangeIter<'a> {
    Box::new(find_entity_ranges_of_type(
        block,
        entities,
        EntityKind::Description,
    ))
}

/// The decorator the editor and any preview pane render with.
#[must_use]
pub fn description_decorator() -> Decorator {
    Decorator::new().with(find_description_entities, DESCRIPTION_CLASS)
}
