use scribe_editor::{EditorStore, MemoryStore};
use scribe_model::Document;
use scribe_raw::export;

#[test]
fn store_counts_replacements() {
    let mut store = MemoryStore::default();
    assert_eq!(store.revision(), 0);
    store.store_editor_state(export(&Document::from_text("one")));
    store.store_editor_state(export(&Document::from_text("two")));
    assert_eq!(store.revision(), 2);
    assert_eq!(store.editor_state().blocks[0].text, "two");
}

#[test]
fn store_records_description_and_decorator() {
    let mut store = MemoryStore::default();
    assert!(store.decorator().is_none());
    assert_eq!(store.description(), None);

    store.store_decorator(scribe_annotations::description_decorator());
    store.change_description("note".to_string());
    assert_eq!(store.decorator().map(|d| d.entries().len()), Some(1));
    assert_eq!(store.description(), Some("note"));
}
