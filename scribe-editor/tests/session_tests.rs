use pretty_assertions::assert_eq;
use scribe_editor::{BlogEditor, EditorConfig, EditorError, EditorMode, EditorStore, MemoryStore, PromptKey};
use scribe_model::{Block, Document, EntityMap};
use scribe_raw::{RawDocument, export};
use scribe_types::{BlockKey, BlockType, EntityKey, InlineStyle, Position, Selection};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn hello_store() -> MemoryStore {
    let doc = Document::from_parts(
        vec![Block::new(BlockKey::new("k1"), BlockType::Unstyled, "Hello world")],
        EntityMap::new(),
    )
    .unwrap();
    MemoryStore::new(export(&doc))
}

fn editor() -> BlogEditor<MemoryStore> {
    init_tracing();
    BlogEditor::new(EditorConfig::default(), hello_store()).unwrap()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_loads_store_document_and_registers_decorator() {
    let editor = editor();
    assert_eq!(editor.document().plain_text(), "Hello world");
    assert!(editor.store().decorator().is_some());
    assert_eq!(editor.selection(), &Selection::collapsed(Position::new("k1", 0)));
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert_eq!(editor.version(), 0);
    assert_eq!(editor.store().revision(), 0);
}

#[test]
fn new_fails_on_malformed_store_document() {
    let raw = RawDocument::from_value(json!({
        "blocks": [{"key": "k1", "text": "x", "entityRanges": [{"offset": 0, "length": 1, "key": 4}]}]
    }))
    .unwrap();
    let result = BlogEditor::new(EditorConfig::default(), MemoryStore::new(raw));
    assert!(matches!(result, Err(EditorError::Document(_))));
}

#[test]
fn default_store_holds_an_empty_document() {
    let editor = BlogEditor::new(EditorConfig::default(), MemoryStore::default()).unwrap();
    assert_eq!(editor.document().blocks().len(), 1);
    assert!(editor.document().blocks()[0].is_empty());
}

#[test]
fn placeholder_shown_only_for_empty_document() {
    init_tracing();
    let mut editor = BlogEditor::new(EditorConfig::default(), MemoryStore::default()).unwrap();
    assert_eq!(editor.placeholder(), Some("Enter some text..."));

    editor.insert_text("a").unwrap();
    assert_eq!(editor.placeholder(), None);
}

// ── Description prompt ───────────────────────────────────────────

#[test]
fn prompt_placeholder_follows_buffer() {
    let config = EditorConfig {
        description_placeholder: "Describe this".to_string(),
        ..EditorConfig::default()
    };
    init_tracing();
    let mut editor = BlogEditor::new(config, hello_store()).unwrap();
    assert_eq!(editor.prompt_placeholder(), None);

    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    assert_eq!(editor.prompt_placeholder(), Some("Describe this"));

    editor.edit_description("greeting").unwrap();
    assert_eq!(editor.prompt_placeholder(), None);
}

#[test]
fn describe_flow_pushes_to_store() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();

    assert!(editor.prompt_for_description().unwrap());
    assert!(matches!(editor.mode(), EditorMode::PromptOpen(p) if p.buffer().is_empty()));

    editor.edit_description("greeting").unwrap();
    editor.confirm_description().unwrap();

    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert_eq!(editor.version(), 1);
    let stored = editor.store().editor_state();
    assert_eq!(stored.blocks[0].entity_ranges.len(), 1);
    assert_eq!(
        stored.entity_map[&EntityKey::first()].data,
        json!({"description": "greeting"})
    );
    assert_eq!(editor.store().revision(), 1);
}

#[test]
fn prompt_on_caret_stays_idle() {
    let mut editor = editor();
    assert!(!editor.prompt_for_description().unwrap());
    assert_eq!(editor.mode(), &EditorMode::Idle);
}

#[test]
fn prompt_prefills_existing_description() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("hello").unwrap();
    editor.confirm_description().unwrap();

    editor.prompt_for_description().unwrap();
    match editor.mode() {
        EditorMode::PromptOpen(pending) => assert_eq!(pending.buffer(), "hello"),
        EditorMode::Idle => panic!("prompt should be open"),
    }
}

#[test]
fn enter_key_confirms_other_keys_do_not() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 6, 11)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("planet").unwrap();

    assert!(!editor.description_key_down(PromptKey::Other).unwrap());
    assert!(matches!(editor.mode(), EditorMode::PromptOpen(_)));

    assert!(editor.description_key_down(PromptKey::Enter).unwrap());
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert_eq!(editor.document().entities().len(), 1);
}

#[test]
fn confirm_uses_selection_at_confirm_time() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("moved").unwrap();
    editor.set_selection(Selection::within("k1", 6, 11)).unwrap();
    editor.confirm_description().unwrap();

    let ranges: Vec<_> = editor.document().blocks()[0].entity_ranges().collect();
    assert_eq!(ranges, vec![(6..11, EntityKey::first())]);
}

#[test]
fn cancel_closes_prompt_without_changes() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("never").unwrap();
    editor.cancel_description();

    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert!(editor.document().entities().is_empty());
    assert_eq!(editor.store().revision(), 0);
}

#[test]
fn prompt_operations_require_open_prompt() {
    let mut editor = editor();
    assert!(matches!(editor.edit_description("x"), Err(EditorError::NoPendingEdit)));
    assert!(matches!(editor.confirm_description(), Err(EditorError::NoPendingEdit)));
}

#[test]
fn empty_description_rejected_when_configured() {
    init_tracing();
    let config = EditorConfig {
        allow_empty_descriptions: false,
        ..EditorConfig::default()
    };
    let mut editor = BlogEditor::new(config, hello_store()).unwrap();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.confirm_description().unwrap();

    assert!(editor.document().entities().is_empty());
    assert_eq!(editor.version(), 0);
}

#[test]
fn remove_description_detaches_and_pushes() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("greeting").unwrap();
    editor.confirm_description().unwrap();

    editor.remove_description().unwrap();
    let stored = editor.store().editor_state();
    assert!(stored.blocks[0].entity_ranges.is_empty());
    assert!(stored.entity_map.contains_key(&EntityKey::first()));
    assert_eq!(editor.store().revision(), 2);
}

#[test]
fn remove_on_caret_does_not_push() {
    let mut editor = editor();
    editor.remove_description().unwrap();
    assert_eq!(editor.store().revision(), 0);
}

// ── Styling and text ─────────────────────────────────────────────

#[test]
fn inline_style_command_pushes_document() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.toggle_inline_style(InlineStyle::Bold).unwrap();

    let ranges = &editor.store().editor_state().blocks[0].inline_style_ranges;
    assert_eq!(ranges.len(), 1);
    assert_eq!((ranges[0].offset, ranges[0].length), (0, 5));
    assert_eq!(ranges[0].style, InlineStyle::Bold);
}

#[test]
fn block_type_command_toggles() {
    let mut editor = editor();
    editor.toggle_block_type(BlockType::HeaderOne).unwrap();
    assert_eq!(editor.document().blocks()[0].block_type(), BlockType::HeaderOne);
    editor.toggle_block_type(BlockType::HeaderOne).unwrap();
    assert_eq!(editor.document().blocks()[0].block_type(), BlockType::Unstyled);
    assert_eq!(editor.version(), 2);
}

#[test]
fn typing_and_splitting_move_the_caret() {
    let mut editor = editor();
    editor
        .set_selection(Selection::collapsed(Position::new("k1", 5)))
        .unwrap();
    editor.insert_text(",").unwrap();
    assert_eq!(editor.selection(), &Selection::collapsed(Position::new("k1", 6)));

    editor.split_block().unwrap();
    let texts: Vec<_> = editor.document().blocks().iter().map(Block::text).collect();
    assert_eq!(texts, vec!["Hello,", " world"]);
    assert_eq!(editor.selection().start().offset, 0);
    assert_eq!(editor.store().editor_state().blocks.len(), 2);
}

#[test]
fn set_selection_rejects_foreign_block() {
    let mut editor = editor();
    assert!(editor.set_selection(Selection::within("zz", 0, 0)).is_err());
}

// ── Store synchronisation ────────────────────────────────────────

#[test]
fn mirror_follows_store_changes() {
    let mut editor = editor();
    let first = editor.mirror().unwrap().unwrap().document().plain_text();
    assert_eq!(first, "Hello world");

    let external = export(&Document::from_text("From elsewhere"));
    editor.store_mut().store_editor_state(external);
    let second = editor.mirror().unwrap().unwrap().document().plain_text();
    assert_eq!(second, "From elsewhere");
    assert_eq!(editor.document().plain_text(), "Hello world");
}

#[test]
fn mirror_reflects_local_pushes() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.toggle_inline_style(InlineStyle::Code).unwrap();
    let local = editor.document().clone();
    let mirror = editor.mirror().unwrap().unwrap();
    assert_eq!(mirror.document(), &local);
}

#[test]
fn mirror_disabled_by_config() {
    init_tracing();
    let config = EditorConfig {
        show_mirror: false,
        ..EditorConfig::default()
    };
    let mut editor = BlogEditor::new(config, hello_store()).unwrap();
    assert!(editor.mirror().unwrap().is_none());
}

#[test]
fn sync_from_store_adopts_external_document() {
    let mut editor = editor();
    assert!(!editor.sync_from_store().unwrap());

    editor
        .set_selection(Selection::within("k1", 6, 11))
        .unwrap();
    let external = export(&Document::from_text("Other"));
    editor.store_mut().store_editor_state(external);

    assert!(editor.sync_from_store().unwrap());
    assert_eq!(editor.document().plain_text(), "Other");
    assert_eq!(editor.selection(), &Selection::collapsed(editor.document().start_position()));
    assert!(!editor.sync_from_store().unwrap());
}

#[test]
fn sync_ignores_own_pushes() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.toggle_inline_style(InlineStyle::Italic).unwrap();
    assert!(!editor.sync_from_store().unwrap());
}

// ── Hover and rendering ──────────────────────────────────────────

#[test]
fn hover_notifies_store_with_description() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 0, 5)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("greeting").unwrap();
    editor.confirm_description().unwrap();

    let hovered = editor.hover(&Position::new("k1", 2)).unwrap();
    assert_eq!(hovered.as_deref(), Some("greeting"));
    assert_eq!(editor.store().description(), Some("greeting"));

    assert_eq!(editor.hover(&Position::new("k1", 8)).unwrap(), None);
    assert_eq!(editor.store().description(), Some("greeting"));
}

#[test]
fn to_html_renders_descriptions() {
    let mut editor = editor();
    editor.set_selection(Selection::within("k1", 6, 11)).unwrap();
    editor.prompt_for_description().unwrap();
    editor.edit_description("planet").unwrap();
    editor.confirm_description().unwrap();
    assert_eq!(
        editor.to_html(),
        "<p>Hello <code class=\"description\" data-description=\"planet\">world</code></p>\n"
    );
}
