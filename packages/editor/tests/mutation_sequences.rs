//! Tests for longer edit sequences through a session
//!
//! This tests:
//! - Move + update + delete chains
//! - Undo/redo sequences
//! - Batched edits
//! - Selection across structural edits

use serde_json::json;
use sitecraft_blocks::{
    BlockData, BlockTree, BlockType, FactoryOptions, IdGenerator, LayoutPreset, TextData,
};
use sitecraft_editor::{DocumentKind, EditSession, EditorOptions, PageDocument, TreePath};

fn session_with(tree: serde_json::Value) -> EditSession {
    let tree: BlockTree = serde_json::from_value(tree).unwrap();
    EditSession::new(PageDocument::from_tree(DocumentKind::Page, tree))
        .with_id_generator(IdGenerator::sequential("s"))
}

fn root_ids(session: &EditSession) -> Vec<String> {
    session.tree().iter().map(|b| b.id.to_string()).collect()
}

fn abc() -> EditSession {
    session_with(json!([
        { "id": "a", "type": "text" },
        { "id": "b", "type": "image" },
        { "id": "c", "type": "button" }
    ]))
}

#[test]
fn test_move_then_delete_sequence() {
    let mut session = abc();

    session
        .move_block(TreePath::block(0), TreePath::block(2))
        .unwrap();
    assert_eq!(root_ids(&session), vec!["b", "c", "a"]);

    session.delete_block(TreePath::block(0)).unwrap();
    assert_eq!(root_ids(&session), vec!["c", "a"]);

    assert!(session.undo());
    assert_eq!(root_ids(&session), vec!["b", "c", "a"]);
    assert!(session.undo());
    assert_eq!(root_ids(&session), vec!["a", "b", "c"]);
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(root_ids(&session), vec!["c", "a"]);
    assert!(!session.redo());
}

#[test]
fn test_build_layout_from_palette() {
    let mut session = session_with(json!([]));

    let layout = session.create_block(
        BlockType::Layout,
        &FactoryOptions::with_preset(LayoutPreset::Thirds),
    );
    let layout_path = session.insert_block(TreePath::root(), 0, layout).unwrap();

    for column in 0..3 {
        let block = session.create_block(BlockType::Text, &FactoryOptions::default());
        session
            .insert_block(layout_path.column(column), 0, block)
            .unwrap();
    }
    assert_eq!(session.tree().block_count(), 4);

    session
        .set_layout_preset(layout_path.clone(), LayoutPreset::Full)
        .unwrap();
    let layout = session.tree().blocks()[0].layout().unwrap();
    assert_eq!(layout.columns.len(), 1);
    assert_eq!(layout.columns[0].len(), 3);

    assert!(session.undo());
    let layout = session.tree().blocks()[0].layout().unwrap();
    assert_eq!(layout.columns.len(), 3);
    assert_eq!(session.history().undo_levels(), 4);
}

#[test]
fn test_batched_edits_undo_together() {
    let mut session = abc();

    session.begin_batch("Clear page");
    session.delete_block(TreePath::block(0)).unwrap();
    session.delete_block(TreePath::block(0)).unwrap();
    session.delete_block(TreePath::block(0)).unwrap();
    session.end_batch();

    assert!(session.tree().is_empty());
    assert_eq!(session.history().undo_levels(), 1);
    assert_eq!(session.history().undo_description(), Some("Clear page"));

    session.undo();
    assert_eq!(root_ids(&session), vec!["a", "b", "c"]);
}

#[test]
fn test_redo_inside_batch_keeps_batched_edit() {
    let mut session = abc();
    session.delete_block(TreePath::block(2)).unwrap();
    assert!(session.undo());

    session.begin_batch("Trim");
    session.delete_block(TreePath::block(0)).unwrap();
    assert!(!session.can_redo());
    assert!(!session.redo());
    assert_eq!(root_ids(&session), vec!["b", "c"]);

    session.end_batch();
    assert_eq!(session.history().undo_levels(), 1);
    assert_eq!(session.history().undo_description(), Some("Trim"));

    assert!(session.undo());
    assert_eq!(root_ids(&session), vec!["a", "b", "c"]);
    assert!(session.redo());
    assert_eq!(root_ids(&session), vec!["b", "c"]);
}

#[test]
fn test_typing_then_structural_edit_then_undo() {
    let mut session = abc();
    session.select(TreePath::block(0)).unwrap();

    for content in ["H", "He", "Hel", "Hello"] {
        session
            .update_selected(
                BlockData::Text(TextData {
                    content: content.to_string(),
                    ..Default::default()
                }),
                false,
            )
            .unwrap();
    }
    session
        .move_block(TreePath::block(0), TreePath::block(2))
        .unwrap();

    // one entry for the typing, one for the move
    assert_eq!(session.history().undo_levels(), 2);
    assert_eq!(session.selection().unwrap().path, TreePath::block(2));

    session.undo();
    assert_eq!(session.selection().unwrap().path, TreePath::block(0));
    session.undo();
    match &session.tree().blocks()[0].data {
        BlockData::Text(text) => assert!(text.content.is_empty()),
        other => panic!("Expected text, got {:?}", other),
    }
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut session = abc();
    session.select(TreePath::block(1)).unwrap();

    session.delete_selected().unwrap();
    assert!(session.selection().is_none());

    // undo brings the block back but not the selection
    session.undo();
    assert!(session.selection().is_none());
}

#[test]
fn test_deleting_unrelated_block_keeps_selection_resolvable() {
    let mut session = abc();
    session.select(TreePath::block(2)).unwrap();

    session.delete_block(TreePath::block(0)).unwrap();

    let selection = session.selection().unwrap();
    assert_eq!(selection.block_id.as_str(), "c");
    assert_eq!(selection.path, TreePath::block(1));
    assert_eq!(session.selected_block().unwrap().id.as_str(), "c");
}

#[test]
fn test_selection_follows_block_into_layout() {
    let mut session = session_with(json!([
        { "id": "a", "type": "text" },
        { "id": "grid", "type": "layout", "data": { "preset": "50-50", "columns": [[], []] } }
    ]));
    session.select(TreePath::block(0)).unwrap();

    session
        .move_block(TreePath::block(0), TreePath::block(1).child(1, 0))
        .unwrap();

    assert_eq!(
        session.selection().unwrap().path,
        TreePath::block(0).child(1, 0)
    );
}

#[test]
fn test_undo_levels_option() {
    let tree: BlockTree = serde_json::from_value(json!([
        { "id": "a", "type": "text" },
        { "id": "b", "type": "text" },
        { "id": "c", "type": "text" }
    ]))
    .unwrap();
    let mut session = EditSession::with_options(
        PageDocument::from_tree(DocumentKind::Page, tree),
        EditorOptions { undo_levels: 1 },
    );

    session.delete_block(TreePath::block(0)).unwrap();
    session.delete_block(TreePath::block(0)).unwrap();

    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(root_ids(&session), vec!["b", "c"]);
}

#[test]
fn test_duplicate_then_undo() {
    let mut session = abc();
    let copy_path = session.duplicate_block(TreePath::block(1)).unwrap();

    assert_eq!(copy_path, TreePath::block(2));
    assert_eq!(session.tree().len(), 4);
    assert_eq!(session.tree().blocks()[2].block_type(), BlockType::Image);

    session.undo();
    assert_eq!(root_ids(&session), vec!["a", "b", "c"]);
}
