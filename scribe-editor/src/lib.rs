//! Blog editor session for Scribe.
//!
//! [`BlogEditor`] owns the current document, the selection and the
//! description prompt, and keeps an external [`EditorStore`] in step:
//! every content change is exported and pushed, and a read-only mirror is
//! re-imported whenever the store's copy moves on.
//!
//! The session is single-threaded. Each call runs to completion against the
//! state as it is at that moment; nothing is deferred.

mod config;
mod error;
mod session;
mod store;

pub use config::EditorConfig;
pub use error::{EditorError, EditorResult};
pub use session::{BlogEditor, EditorMode, PromptKey};
pub use store::{EditorStore, MemoryStore};
