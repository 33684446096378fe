//! The blog editor session.
//!
//! Interaction state machine:
//!
//! ```text
//! Idle ──prompt (non-collapsed selection)──▶ PromptOpen
//! PromptOpen ──confirm──▶ Idle
//! PromptOpen ──cancel──▶ Idle
//! Idle ──style / block type / text command──▶ Idle
//! ```

use crate::{EditorConfig, EditorError, EditorResult, EditorStore};
use scribe_annotations::{AnnotationManager, PendingEdit, description_decorator};
use scribe_model::{Document, Entity, LiveDocument};
use scribe_raw::{RawDocument, export, import};
use scribe_types::{BlockType, InlineStyle, Position, Selection};
use tracing::{debug, info, warn};

/// Whether the description prompt is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    PromptOpen(PendingEdit),
}

/// Keys the description input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Enter,
    Other,
}

/// A blog editor bound to an external store.
pub struct BlogEditor<S> {
    config: EditorConfig,
    store: S,
    manager: AnnotationManager,
    live: LiveDocument,
    selection: Selection,
    mode: EditorMode,
    /// Incremented on every content change.
    version: u64,
    /// The raw document last pushed to, or accepted from, the store.
    last_synced: RawDocument,
    /// Read-only mirror of the store's document and the raw form it came from.
    mirror: Option<(RawDocument, LiveDocument)>,
}

impl<S: EditorStore> BlogEditor<S> {
    /// Loads the store's document and registers the description decorator
    /// with the store.
    pub fn new(config: EditorConfig, mut store: S) -> EditorResult<Self> {
        let decorator = description_decorator();
        let last_synced = store.editor_state().clone();
        let live = import(&last_synced, decorator.clone())?;
        store.store_decorator(decorator);

        let selection = Selection::collapsed(live.document().start_position());
        info!(
            blocks = live.document().blocks().len(),
            entities = live.document().entities().len(),
            "blog editor initialized"
        );

        Ok(Self {
            manager: AnnotationManager::new(config.annotation_policy()),
            config,
            store,
            live,
            selection,
            mode: EditorMode::Idle,
            version: 0,
            last_synced,
            mirror: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, for callers that drive external updates.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        self.live.document()
    }

    #[must_use]
    pub fn live(&self) -> &LiveDocument {
        &self.live
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The editor placeholder, while the document is a single empty block.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self.document().blocks() {
            [only] if only.is_empty() => Some(self.config.placeholder.as_str()),
            _ => None,
        }
    }

    /// The description input placeholder, while the prompt is open with an
    /// empty buffer.
    #[must_use]
    pub fn prompt_placeholder(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::PromptOpen(pending) if pending.buffer().is_empty() => {
                Some(self.config.description_placeholder.as_str())
            }
            _ => None,
        }
    }

    /// Moves the selection. Rejected when it does not fit the document.
    pub fn set_selection(&mut self, selection: Selection) -> EditorResult<()> {
        self.document().validate(&selection)?;
        self.selection = selection;
        Ok(())
    }

    // ── Styling commands ─────────────────────────────────────────

    pub fn toggle_inline_style(&mut self, style: InlineStyle) -> EditorResult<()> {
        let next = self.document().toggle_inline_style(&self.selection, style)?;
        self.commit(next);
        Ok(())
    }

    pub fn toggle_block_type(&mut self, block_type: BlockType) -> EditorResult<()> {
        let next = self.document().toggle_block_type(&self.selection, block_type)?;
        self.commit(next);
        Ok(())
    }

    // ── Text commands ────────────────────────────────────────────

    /// Replaces the selection with `text` and leaves the caret after it.
    pub fn insert_text(&mut self, text: &str) -> EditorResult<()> {
        let (next, caret) = self.document().replace_text(&self.selection, text)?;
        self.commit(next);
        self.selection = Selection::collapsed(caret);
        Ok(())
    }

    /// Replaces the selection with a block break.
    pub fn split_block(&mut self) -> EditorResult<()> {
        let (next, caret) = self.document().split_block(&self.selection)?;
        self.commit(next);
        self.selection = Selection::collapsed(caret);
        Ok(())
    }

    // ── Description prompt ───────────────────────────────────────

    /// Opens the description prompt over the current selection.
    ///
    /// Returns false, leaving the session idle, for a collapsed selection.
    pub fn prompt_for_description(&mut self) -> EditorResult<bool> {
        match self
            .manager
            .prompt_description(self.live.document(), &self.selection)?
        {
            Some(pending) => {
                debug!(existing = ?pending.existing(), "description prompt opened");
                self.mode = EditorMode::PromptOpen(pending);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replaces the text of the open prompt.
    pub fn edit_description(&mut self, text: impl Into<String>) -> EditorResult<()> {
        match &mut self.mode {
            EditorMode::PromptOpen(pending) => {
                pending.set_buffer(text);
                Ok(())
            }
            EditorMode::Idle => Err(EditorError::NoPendingEdit),
        }
    }

    /// Handles a key in the description input. Enter confirms.
    pub fn description_key_down(&mut self, key: PromptKey) -> EditorResult<bool> {
        match key {
            PromptKey::Enter => {
                self.confirm_description()?;
                Ok(true)
            }
            PromptKey::Other => Ok(false),
        }
    }

    /// Attaches the prompt's text to the current selection and closes the
    /// prompt.
    pub fn confirm_description(&mut self) -> EditorResult<()> {
        let EditorMode::PromptOpen(pending) = std::mem::replace(&mut self.mode, EditorMode::Idle)
        else {
            warn!("confirm without an open description prompt");
            return Err(EditorError::NoPendingEdit);
        };
        let next = self.manager.confirm_description(
            self.live.document(),
            &self.selection,
            pending.buffer(),
        )?;
        debug!("description prompt confirmed");
        self.commit(next);
        Ok(())
    }

    /// Closes the prompt without changing the document.
    pub fn cancel_description(&mut self) {
        if let EditorMode::PromptOpen(_) = self.mode {
            debug!("description prompt cancelled");
        }
        self.mode = EditorMode::Idle;
    }

    /// Detaches descriptions from the current selection.
    pub fn remove_description(&mut self) -> EditorResult<()> {
        let next = self
            .manager
            .remove_description(self.live.document(), &self.selection)?;
        self.commit(next);
        Ok(())
    }

    // ── Store synchronisation ────────────────────────────────────

    /// Adopts the store's document when it differs from what this session
    /// last pushed or accepted. Returns true if the document was replaced.
    ///
    /// The selection is kept when it still fits, otherwise it collapses to
    /// the document start. An open prompt is closed.
    pub fn sync_from_store(&mut self) -> EditorResult<bool> {
        let current = self.store.editor_state();
        if *current == self.last_synced {
            return Ok(false);
        }
        let document = import(current, self.live.decorator().clone())?.into_document();
        self.last_synced = current.clone();
        self.live.set_document(document);
        self.version += 1;

        if self.document().validate(&self.selection).is_err() {
            self.selection = Selection::collapsed(self.document().start_position());
        }
        self.mode = EditorMode::Idle;
        info!(version = self.version, "adopted external document");
        Ok(true)
    }

    /// The read-only mirror of the store's document.
    ///
    /// Re-imported only when the store's copy differs from the one last
    /// mirrored. `None` when the mirror is disabled in the configuration.
    pub fn mirror(&mut self) -> EditorResult<Option<&LiveDocument>> {
        if !self.config.show_mirror {
            return Ok(None);
        }
        let current = self.store.editor_state();
        let stale = self
            .mirror
            .as_ref()
            .is_none_or(|(mirrored, _)| mirrored != current);
        if stale {
            let live = import(current, self.live.decorator().clone())?;
            debug!("mirror re-imported from store");
            self.mirror = Some((current.clone(), live));
        }
        Ok(self.mirror.as_ref().map(|(_, live)| live))
    }

    /// Reports the description under `position` to the store.
    ///
    /// Returns the description, or `None` when the position is not inside a
    /// decorated description span.
    pub fn hover(&mut self, position: &Position) -> EditorResult<Option<String>> {
        let description = self
            .live
            .span_at(position)?
            .and_then(|span| span.entity)
            .and_then(|key| self.live.document().entity(key))
            .and_then(Entity::description)
            .map(str::to_string);
        if let Some(text) = &description {
            debug!(description = %text, "description hovered");
            self.store.change_description(text.clone());
        }
        Ok(description)
    }

    /// Renders the current document to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        scribe_html::to_html(self.live.document(), self.live.decorator())
    }

    /// Installs a new document version and pushes it to the store. No-op
    /// when the content did not change.
    fn commit(&mut self, document: Document) {
        if document == *self.live.document() {
            debug!("command left the document unchanged");
            return;
        }
        self.live.set_document(document);
        self.version += 1;
        let raw = export(self.live.document());
        debug!(
            version = self.version,
            blocks = raw.blocks.len(),
            entities = raw.entity_map.len(),
            "pushing document to store"
        );
        self.last_synced = raw.clone();
        self.store.store_editor_state(raw);
    }
}
