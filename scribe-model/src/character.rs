use scribe_types::{EntityKey, InlineStyle};
use std::collections::BTreeSet;

/// Metadata carried by a single character of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterMetadata {
    styles: BTreeSet<InlineStyle>,
    entity: Option<EntityKey>,
}

impl CharacterMetadata {
    /// A character with no styles and no entity.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// A character carrying the given styles.
    #[must_use]
    pub fn styled(styles: impl IntoIterator<Item = InlineStyle>) -> Self {
        Self {
            styles: styles.into_iter().collect(),
            entity: None,
        }
    }

    #[must_use]
    pub fn styles(&self) -> &BTreeSet<InlineStyle> {
        &self.styles
    }

    #[must_use]
    pub fn has_style(&self, style: InlineStyle) -> bool {
        self.styles.contains(&style)
    }

    #[must_use]
    pub fn entity(&self) -> Option<EntityKey> {
        self.entity
    }

    pub fn add_style(&mut self, style: InlineStyle) {
        self.styles.insert(style);
    }

    pub fn remove_style(&mut self, style: InlineStyle) {
        self.styles.remove(&style);
    }

    pub fn set_entity(&mut self, entity: Option<EntityKey>) {
        self.entity = entity;
    }
}
