/// Structural checks for persisted block trees
use crate::{DocumentKind, TreePath};
use serde::Serialize;
use sitecraft_blocks::{is_sanitized_anchor, Block, BlockId, BlockTree, BlockType, Column};
use sitecraft_common::{walk_block, walk_column, Visitor};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Worth knowing, nothing breaks
    Info,
    /// Should be addressed
    Warning,
    /// The tree breaks an invariant the editor relies on
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Stable kebab-case identifier, e.g. `duplicate-id`
    pub code: &'static str,
    pub path: TreePath,
    pub block_id: Option<BlockId>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: &'static str, path: TreePath, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, code, path, message)
    }

    pub fn warning(code: &'static str, path: TreePath, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, code, path, message)
    }

    pub fn info(code: &'static str, path: TreePath, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, code, path, message)
    }

    fn new(
        level: DiagnosticLevel,
        code: &'static str,
        path: TreePath,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            code,
            path,
            block_id: None,
            message: message.into(),
        }
    }

    pub fn with_block_id(mut self, block_id: BlockId) -> Self {
        self.block_id = Some(block_id);
        self
    }
}

/// Check `tree` as a document of `kind`
pub fn validate_tree(tree: &BlockTree, kind: DocumentKind) -> Vec<Diagnostic> {
    let mut validator = TreeValidator::new(kind);
    validator.visit_tree(tree);
    validator.check_root(tree);
    validator.diagnostics
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|diagnostic| diagnostic.level == DiagnosticLevel::Error)
}

struct TreeValidator {
    kind: DocumentKind,
    seen_ids: HashSet<BlockId>,
    anchors: HashMap<String, TreePath>,
    diagnostics: Vec<Diagnostic>,
}

impl TreeValidator {
    fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            seen_ids: HashSet::new(),
            anchors: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn check_root(&mut self, tree: &BlockTree) {
        for singleton in [BlockType::Header, BlockType::Footer] {
            let mut found = tree
                .blocks()
                .iter()
                .enumerate()
                .filter(|(_, block)| block.block_type() == singleton);

            if found.next().is_none() {
                continue;
            }
            for (index, block) in found {
                self.report(
                    Diagnostic::error(
                        "duplicate-singleton",
                        TreePath::block(index),
                        format!("More than one {} block at the root", singleton),
                    )
                    .with_block_id(block.id.clone()),
                );
            }
        }

        let allowed = match self.kind {
            DocumentKind::Page => return,
            DocumentKind::Header => BlockType::Header,
            DocumentKind::Footer => BlockType::Footer,
        };
        for (index, block) in tree.blocks().iter().enumerate() {
            if block.block_type() != allowed {
                self.report(
                    Diagnostic::error(
                        "wrong-document",
                        TreePath::block(index),
                        format!(
                            "{} documents may only hold a {} block, found {}",
                            allowed.label(),
                            allowed,
                            block.block_type()
                        ),
                    )
                    .with_block_id(block.id.clone()),
                );
            }
        }
    }

    fn check_block(&mut self, block: &Block, path: &TreePath) {
        if !self.seen_ids.insert(block.id.clone()) {
            self.report(
                Diagnostic::error(
                    "duplicate-id",
                    path.clone(),
                    format!("Block id '{}' is used more than once", block.id),
                )
                .with_block_id(block.id.clone()),
            );
        }

        let block_type = block.block_type();
        if block_type.is_singleton() {
            if path.len() > 1 {
                self.report(
                    Diagnostic::error(
                        "nested-singleton",
                        path.clone(),
                        format!("{} blocks are only allowed at the root", block_type.label()),
                    )
                    .with_block_id(block.id.clone()),
                );
            } else if self.kind == DocumentKind::Page {
                self.report(
                    Diagnostic::error(
                        "wrong-document",
                        path.clone(),
                        format!("Pages may not contain a {} block", block_type),
                    )
                    .with_block_id(block.id.clone()),
                );
            }
        }

        if let Some(anchor) = &block.data.common().anchor_id {
            if !is_sanitized_anchor(anchor) {
                self.report(
                    Diagnostic::warning(
                        "unsanitized-anchor",
                        path.clone(),
                        format!("Anchor '{}' is not a valid fragment id", anchor),
                    )
                    .with_block_id(block.id.clone()),
                );
            }
            if let Some(first) = self.anchors.get(anchor) {
                let message = format!("Anchor '{}' is already used at {}", anchor, first);
                self.report(
                    Diagnostic::warning("duplicate-anchor", path.clone(), message)
                        .with_block_id(block.id.clone()),
                );
            } else {
                self.anchors.insert(anchor.clone(), path.clone());
            }
        }

        if let Some(layout) = block.layout() {
            let expected = layout.preset.column_count();
            if layout.columns.len() != expected {
                self.report(
                    Diagnostic::error(
                        "column-count",
                        path.clone(),
                        format!(
                            "Preset {} needs {} columns, found {}",
                            layout.preset,
                            expected,
                            layout.columns.len()
                        ),
                    )
                    .with_block_id(block.id.clone()),
                );
            }
        }
    }
}

impl Visitor for TreeValidator {
    fn visit_block(&mut self, block: &Block, location: &[usize]) {
        self.check_block(block, &TreePath::from_indices(location.to_vec()));
        walk_block(self, block, location);
    }

    fn visit_column(&mut self, column: &Column, location: &[usize]) {
        if column.is_empty() {
            self.report(Diagnostic::info(
                "empty-column",
                TreePath::from_indices(location.to_vec()),
                "Layout column is empty",
            ));
        }
        walk_column(self, column, location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> BlockTree {
        serde_json::from_value(value).unwrap()
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_clean_page() {
        let t = tree(json!([
            { "id": "a", "type": "text", "data": { "anchorId": "intro" } },
            {
                "id": "l",
                "type": "layout",
                "data": { "preset": "50-50", "columns": [[{ "id": "b", "type": "image" }], [{ "id": "c", "type": "button" }]] }
            }
        ]));
        assert!(validate_tree(&t, DocumentKind::Page).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_errors() {
        let t = tree(json!([
            { "id": "a", "type": "text" },
            { "id": "a", "type": "image" }
        ]));
        let diagnostics = validate_tree(&t, DocumentKind::Page);
        assert_eq!(codes(&diagnostics), vec!["duplicate-id"]);
        assert_eq!(diagnostics[0].path, TreePath::block(1));
        assert!(has_errors(&diagnostics));
    }

    #[test]
    fn test_column_count_mismatch() {
        let t = tree(json!([
            { "id": "l", "type": "layout", "data": { "preset": "33-33-33", "columns": [[{ "id": "a", "type": "text" }]] } }
        ]));
        assert_eq!(
            codes(&validate_tree(&t, DocumentKind::Page)),
            vec!["column-count"]
        );
    }

    #[test]
    fn test_empty_column_is_info() {
        let t = tree(json!([
            { "id": "l", "type": "layout", "data": { "preset": "50-50", "columns": [[], [{ "id": "a", "type": "text" }]] } }
        ]));
        let diagnostics = validate_tree(&t, DocumentKind::Page);
        assert_eq!(codes(&diagnostics), vec!["empty-column"]);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
        assert_eq!(diagnostics[0].path, TreePath::block(0).column(0));
        assert!(!has_errors(&diagnostics));
    }

    #[test]
    fn test_anchor_checks() {
        let t = tree(json!([
            { "id": "a", "type": "text", "data": { "anchorId": "New Anchor!" } },
            { "id": "b", "type": "text", "data": { "anchorId": "contact" } },
            { "id": "c", "type": "text", "data": { "anchorId": "contact" } }
        ]));
        let diagnostics = validate_tree(&t, DocumentKind::Page);
        assert_eq!(
            codes(&diagnostics),
            vec!["unsanitized-anchor", "duplicate-anchor"]
        );
        assert!(!has_errors(&diagnostics));
    }

    #[test]
    fn test_singleton_rules() {
        let page = tree(json!([
            { "id": "h", "type": "header" },
            { "id": "l", "type": "layout", "data": { "preset": "100", "columns": [[{ "id": "f", "type": "footer" }]] } }
        ]));
        let diagnostics = validate_tree(&page, DocumentKind::Page);
        assert_eq!(codes(&diagnostics), vec!["wrong-document", "nested-singleton"]);

        let header = tree(json!([
            { "id": "h1", "type": "header" },
            { "id": "h2", "type": "header" },
            { "id": "t", "type": "text" }
        ]));
        let diagnostics = validate_tree(&header, DocumentKind::Header);
        assert_eq!(codes(&diagnostics), vec!["duplicate-singleton", "wrong-document"]);
        assert_eq!(diagnostics[1].block_id, Some(BlockId::from("t")));
    }
}
