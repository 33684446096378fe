//! Annotation management for Scribe.
//!
//! Spans of text acquire metadata by referencing DESCRIPTION entities. This
//! crate provides:
//! - [`find_entity_ranges_of_type`]: lazy lookup of entity-backed runs in a block
//! - [`description_decorator`]: the decorator that renders those runs
//! - [`AnnotationManager`]: prompt, confirm and remove operations over a selection

mod manager;
mod ranges;

pub use manager::{AnnotationManager, AnnotationPolicy, PendingEdit};
pub use ranges::{
    DESCRIPTION_CLASS, description_decorator, find_description_entities,
    find_entity_ranges_of_type,
};
