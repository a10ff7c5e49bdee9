//! Integration tests for editor crate

use serde_json::json;
use sitecraft_blocks::{BlockTree, BlockType};
use sitecraft_editor::{
    has_errors, resolve_sequence, DocumentKind, EditSession, EditorError, Mutation, PageDocument,
    TreeError, TreePath,
};

const PAGE: &str = r#"[
    { "id": "intro", "type": "text", "data": { "content": "<p>Welcome</p>", "anchorId": "intro" } },
    {
        "id": "grid",
        "type": "layout",
        "data": {
            "preset": "50-50",
            "columns": [
                [{ "id": "img", "type": "image", "data": { "src": "/a.png" } }],
                [{ "id": "btn", "type": "button", "data": { "text": "Buy" } }]
            ]
        }
    }
]"#;

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("index.json");
    std::fs::write(&path, PAGE)?;

    let doc = PageDocument::load(&path)?;
    assert_eq!(doc.version, 0);
    assert!(!doc.is_dirty());
    assert!(!has_errors(&doc.validate()));

    let mut session = EditSession::new(doc);
    session.select(TreePath::block(1).child(0, 0))?;
    session.move_block(TreePath::block(1).child(0, 0), TreePath::block(0))?;
    assert_eq!(session.selection().unwrap().path, TreePath::block(0));

    let mut doc = session.into_document();
    assert!(doc.is_dirty());
    doc.save()?;

    let reloaded = PageDocument::load(&path)?;
    assert_eq!(reloaded.tree(), doc.tree());
    assert_eq!(reloaded.tree().blocks()[0].id.as_str(), "img");

    Ok(())
}

#[test]
fn test_unknown_fields_use_defaults_on_load() {
    let doc = PageDocument::from_json(
        DocumentKind::Page,
        r#"[{ "id": "t", "type": "text", "data": { "styles": { "paddingTop": 999 } } }]"#,
    )
    .unwrap();

    let common = doc.tree().blocks()[0].data.common().clone();
    assert_eq!(common.styles.padding_top, 200);
    assert_eq!(common.styles.padding_bottom, 40);
}

#[test]
fn test_layout_without_columns_loads_preset_columns() {
    let doc = PageDocument::from_json(
        DocumentKind::Page,
        r#"[{ "id": "grid", "type": "layout", "data": { "preset": "33-33-33" } }]"#,
    )
    .unwrap();

    let third = resolve_sequence(doc.tree(), &TreePath::block(0).column(2)).unwrap();
    assert!(third.is_empty());
    let diagnostics = doc.validate();
    assert!(!has_errors(&diagnostics));
    assert!(diagnostics.iter().all(|d| d.code != "column-count"));
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let result = PageDocument::from_json(DocumentKind::Page, r#"[{ "id": "x", "type": "carousel" }]"#);
    assert!(matches!(result, Err(EditorError::Json(_))));
}

#[test]
fn test_mutation_log_applies_in_order() {
    let mut doc = PageDocument::from_json(DocumentKind::Page, PAGE).unwrap();

    let log: Vec<Mutation> = serde_json::from_value(json!([
        {
            "op": "insert_block",
            "parent": [],
            "index": 0,
            "block": { "id": "title", "type": "text", "data": { "content": "<h1>Shop</h1>" } }
        },
        { "op": "set_layout_preset", "path": [2], "preset": "100" },
        { "op": "move_block", "from": [2, "data", "columns", 0, 1], "to": [1] },
        {
            "op": "update_data",
            "path": [1],
            "data": { "type": "button", "data": { "text": "Buy now", "variant": "secondary" } }
        },
        { "op": "duplicate_block", "path": [0], "id_seed": "copy" }
    ]))
    .unwrap();

    for mutation in &log {
        doc.apply(mutation).unwrap();
    }

    let ids: Vec<&str> = doc.tree().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["title", "copy-1", "btn", "intro", "grid"]);
    assert_eq!(doc.version, log.len() as u64);
}

#[test]
fn test_rejected_mutation_reports_typed_error() {
    let mut doc = PageDocument::from_json(DocumentKind::Page, PAGE).unwrap();

    let header: Mutation = serde_json::from_value(json!({
        "op": "insert_block",
        "parent": [1, "data", "columns", 0],
        "index": 0,
        "block": { "id": "h", "type": "header" }
    }))
    .unwrap();

    match doc.apply(&header) {
        Err(EditorError::Tree(TreeError::InvalidParent(path))) => {
            assert_eq!(path, TreePath::block(1).column(0))
        }
        other => panic!("Expected InvalidParent, got {:?}", other),
    }
    assert_eq!(doc.version, 0);
}

#[test]
fn test_header_document() {
    let mut session = EditSession::new(PageDocument::from_tree(
        DocumentKind::Header,
        BlockTree::new(),
    ));

    let header = session.create_block(BlockType::Header, &Default::default());
    session.insert_block(TreePath::root(), 0, header).unwrap();

    let second = session.create_block(BlockType::Header, &Default::default());
    let err = session.insert_block(TreePath::root(), 1, second).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Tree(TreeError::DuplicateSingleton(BlockType::Header))
    ));

    assert!(session.document().validate().is_empty());
}

#[test]
fn test_paths_serialize_canonically() {
    let path = TreePath::block(1).child(0, 2);
    assert_eq!(
        serde_json::to_value(&path).unwrap(),
        json!([1, "data", "columns", 0, 2])
    );
    assert_eq!(path.to_string(), "1/columns/0/2");
}
