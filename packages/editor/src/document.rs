//! # Page Documents
//!
//! A PageDocument is one persisted block tree and its editing state.
//! Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Single-user editing with disk persistence
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Edit → Save
//!   ↓      ↓       ↓      ↓
//! File   Tree  Mutations File
//! ```

use crate::{validate_tree, Diagnostic, EditorError, Mutation};
use serde::{Deserialize, Serialize};
use sitecraft_blocks::BlockTree;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Page body; header and footer blocks are not allowed
    Page,
    /// Site-wide header, at most one header block
    Header,
    /// Site-wide footer, at most one footer block
    Footer,
}

impl DocumentKind {
    /// `header.json` and `footer.json` are the shared documents, everything
    /// else is a page
    pub fn from_path(path: &Path) -> Self {
        match path.file_stem().and_then(|stem| stem.to_str()) {
            Some("header") => DocumentKind::Header,
            Some("footer") => DocumentKind::Footer,
            _ => DocumentKind::Page,
        }
    }
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    pub version: u64,
}

/// Editable block document
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub kind: DocumentKind,

    /// Path to the JSON file (if any)
    pub path: PathBuf,

    /// Current version number (increments on each change)
    pub version: u64,

    storage: DocumentStorage,
}

#[derive(Debug, Clone)]
enum DocumentStorage {
    Memory { tree: BlockTree },
    File { tree: BlockTree, dirty: bool },
}

impl PageDocument {
    /// Create a memory-backed document
    pub fn from_tree(kind: DocumentKind, tree: BlockTree) -> Self {
        Self {
            kind,
            path: PathBuf::new(),
            version: 0,
            storage: DocumentStorage::Memory { tree },
        }
    }

    /// Parse a memory-backed document from JSON
    pub fn from_json(kind: DocumentKind, json: &str) -> Result<Self, EditorError> {
        let tree: BlockTree = serde_json::from_str(json)?;
        Ok(Self::from_tree(kind, tree))
    }

    /// Load a file-backed document, inferring its kind from the file name
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let tree: BlockTree = serde_json::from_str(&source)?;
        let kind = DocumentKind::from_path(&path);

        info!(path = %path.display(), blocks = tree.block_count(), "Loaded document");

        Ok(Self {
            kind,
            path,
            version: 0,
            storage: DocumentStorage::File { tree, dirty: false },
        })
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        let json = self.to_json()?;
        match &mut self.storage {
            DocumentStorage::File { dirty, .. } => {
                std::fs::write(&self.path, json)?;
                *dirty = false;
                info!(path = %self.path.display(), version = self.version, "Saved document");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.tree())?)
    }

    pub fn tree(&self) -> &BlockTree {
        match &self.storage {
            DocumentStorage::Memory { tree } | DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Swap in a whole tree (undo/redo, previews)
    pub fn replace_tree(&mut self, next: BlockTree) -> MutationResult {
        self.version += 1;
        match &mut self.storage {
            DocumentStorage::Memory { tree } => *tree = next,
            DocumentStorage::File { tree, dirty } => {
                *tree = next;
                *dirty = true;
            }
        }
        MutationResult {
            version: self.version,
        }
    }

    /// Apply a mutation; on error the document is unchanged
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(self.tree())?;
        Ok(self.replace_tree(next))
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    pub fn is_file_backed(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { .. })
    }

    pub fn validate(&self) -> Vec<Diagnostic> {
        validate_tree(self.tree(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreePath;

    const PAGE: &str = r#"[
        { "id": "a", "type": "text", "data": { "content": "<p>Hi</p>" } },
        { "id": "b", "type": "image" }
    ]"#;

    #[test]
    fn test_create_memory_document() {
        let doc = PageDocument::from_json(DocumentKind::Page, PAGE).unwrap();
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(!doc.is_file_backed());
        assert_eq!(doc.tree().len(), 2);
    }

    #[test]
    fn test_document_version_increments_on_success_only() {
        let mut doc = PageDocument::from_json(DocumentKind::Page, PAGE).unwrap();

        let result = doc
            .apply(&Mutation::DeleteBlock {
                path: TreePath::block(0),
            })
            .unwrap();
        assert_eq!(result.version, 1);

        let failed = doc.apply(&Mutation::DeleteBlock {
            path: TreePath::block(5),
        });
        assert!(failed.is_err());
        assert_eq!(doc.version, 1);
        assert_eq!(doc.tree().len(), 1);
    }

    #[test]
    fn test_memory_document_cannot_save() {
        let mut doc = PageDocument::from_json(DocumentKind::Page, PAGE).unwrap();
        assert!(matches!(doc.save(), Err(EditorError::NotFileBacked)));
    }

    #[test]
    fn test_load_edit_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, PAGE).unwrap();

        let mut doc = PageDocument::load(&path).unwrap();
        assert_eq!(doc.kind, DocumentKind::Page);
        assert!(doc.is_file_backed());

        doc.apply(&Mutation::MoveBlock {
            from: TreePath::block(0),
            to: TreePath::block(1),
        })
        .unwrap();
        assert!(doc.is_dirty());

        doc.save().unwrap();
        assert!(!doc.is_dirty());

        let reloaded = PageDocument::load(&path).unwrap();
        let ids: Vec<&str> = reloaded.tree().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            DocumentKind::from_path(Path::new("site/header.json")),
            DocumentKind::Header
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("footer.json")),
            DocumentKind::Footer
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("pages/about.json")),
            DocumentKind::Page
        );
    }
}
