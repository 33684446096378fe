//! Attaching, editing and detaching descriptions.
//!
//! Entities are created on confirm and only ever detached afterwards: a
//! record that loses its last range stays in the entity map.

use scribe_model::{Document, Entity};
use scribe_types::{EntityKey, Position, Result, Selection};
use tracing::debug;

/// Rules applied when confirming a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationPolicy {
    /// When false, confirming an empty description is a no-op.
    pub allow_empty_descriptions: bool,
}

impl Default for AnnotationPolicy {
    fn default() -> Self {
        Self {
            allow_empty_descriptions: true,
        }
    }
}

/// A description being composed for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    selection: Selection,
    existing: Option<EntityKey>,
    buffer: String,
}

impl PendingEdit {
    /// The selection the description will be attached to.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The entity found at the selection start when the prompt opened.
    #[must_use]
    pub fn existing(&self) -> Option<EntityKey> {
        self.existing
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }
}

/// Manages DESCRIPTION entities over document selections.
#[derive(Debug, Clone, Default)]
pub struct AnnotationManager {
    policy: AnnotationPolicy,
}

impl AnnotationManager {
    #[must_use]
    pub fn new(policy: AnnotationPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> AnnotationPolicy {
        self.policy
    }

    /// The description attached to the character at `position`.
    pub fn description_at<'d>(
        &self,
        document: &'d Document,
        position: &Position,
    ) -> Result<Option<(EntityKey, &'d str)>> {
        let Some(key) = document.entity_at(position)? else {
            return Ok(None);
        };
        Ok(document
            .entity(key)
            .and_then(Entity::description)
            .map(|description| (key, description)))
    }

    /// Opens a description edit for `selection`.
    ///
    /// Returns `None` for a collapsed selection. Otherwise the buffer starts
    /// with the description found at the selection's start character, or
    /// empty. Only the start character is inspected.
    pub fn prompt_description(
        &self,
        document: &Document,
        selection: &Selection,
    ) -> Result<Option<PendingEdit>> {
        document.validate(selection)?;
        if selection.is_collapsed() {
            debug!("prompt ignored: selection is collapsed");
            return Ok(None);
        }
        let found = self.description_at(document, selection.start())?;
        Ok(Some(PendingEdit {
            selection: selection.clone(),
            existing: found.map(|(key, _)| key),
            buffer: found.map(|(_, d)| d.to_string()).unwrap_or_default(),
        }))
    }

    /// Creates a DESCRIPTION entity holding `text` and attaches it to exactly
    /// `selection`, replacing whatever entity the range referenced before.
    pub fn confirm_description(
        &self,
        document: &Document,
        selection: &Selection,
        text: &str,
    ) -> Result<Document> {
        document.validate(selection)?;
        if selection.is_collapsed() {
            debug!("confirm ignored: selection is collapsed");
            return Ok(document.clone());
        }
        if text.is_empty() && !self.policy.allow_empty_descriptions {
            debug!("confirm ignored: empty description");
            return Ok(document.clone());
        }
        let (with_entity, key) = document.create_entity(Entity::new_description(text))?;
        debug!(entity = %key, "description created");
        with_entity.apply_entity(selection, Some(key))
    }

    /// Detaches any entity from `selection`. The entity records stay in the
    /// map. A collapsed selection is a no-op.
    pub fn remove_description(&self, document: &Document, selection: &Selection) -> Result<Document> {
        document.validate(selection)?;
        if selection.is_collapsed() {
            debug!("remove ignored: selection is collapsed");
            return Ok(document.clone());
        }
        document.apply_entity(selection, None)
    }
}
