//! The seam between the editor and the external state store.

use scribe_model::{Decorator, Document};
use scribe_raw::{RawDocument, export};

/// External state store the editor persists through.
///
/// The editor only ever exchanges whole raw documents with the store; there
/// is no incremental patching.
pub trait EditorStore {
    /// The last persisted document.
    fn editor_state(&self) -> &RawDocument;

    /// Replaces the persisted document.
    fn store_editor_state(&mut self, raw: RawDocument);

    /// Receives the editor's decorator once, at construction, so other
    /// consumers can resolve decorated ranges the same way.
    fn store_decorator(&mut self, decorator: Decorator);

    /// Notified with the description under the pointer.
    fn change_description(&mut self, description: String);
}

/// In-memory [`EditorStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    editor_state: RawDocument,
    decorator: Option<Decorator>,
    description: Option<String>,
    revision: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new(initial: RawDocument) -> Self {
        Self {
            editor_state: initial,
            decorator: None,
            description: None,
            revision: 0,
        }
    }

    /// The registered decorator, if the editor has registered one.
    #[must_use]
    pub fn decorator(&self) -> Option<&Decorator> {
        self.decorator.as_ref()
    }

    /// The last description reported by a hover.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of times the document has been replaced.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(export(&Document::empty()))
    }
}

impl EditorStore for MemoryStore {
    fn editor_state(&self) -> &RawDocument {
        &self.editor_state
    }

    fn store_editor_state(&mut self, raw: RawDocument) {
        self.editor_state = raw;
        self.revision += 1;
    }

    fn store_decorator(&mut self, decorator: Decorator) {
        self.decorator = Some(decorator);
    }

    fn change_description(&mut self, description: String) {
        self.description = Some(description);
    }
}
