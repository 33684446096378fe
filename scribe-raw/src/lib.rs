//! Serialization bridge between the live document and its raw form.
//!
//! The raw form is a plain tree exchanged with the external store:
//!
//! ```json
//! {
//!   "blocks": [{
//!     "key": "k1", "text": "Hello world", "type": "unstyled", "depth": 0,
//!     "inlineStyleRanges": [{"offset": 0, "length": 5, "style": "BOLD"}],
//!     "entityRanges": [{"offset": 0, "length": 5, "key": 1}],
//!     "data": {}
//!   }],
//!   "entityMap": {
//!     "1": {"type": "DESCRIPTION", "mutability": "MUTABLE", "data": {"description": "greeting"}}
//!   }
//! }
//! ```
//!
//! Range offsets and lengths in the raw form count UTF-16 code units, the
//! way browser-based editors persist them; the live model counts `char`s.
//! The bridge translates in both directions.
//!
//! [`export`] is a pure function of document content. [`import`] rebuilds a
//! live document and binds it to a decorator; it fails fast on anything that
//! cannot be represented faithfully.

mod export;
mod import;
mod raw;
mod utf16;

pub use export::export;
pub use import::{import, import_document};
pub use raw::{RawBlock, RawDocument, RawEntity, RawEntityRange, RawInlineStyleRange};
