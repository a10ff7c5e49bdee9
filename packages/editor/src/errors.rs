//! Error types for the editor

use crate::path::TreePath;
use sitecraft_blocks::BlockType;
use sitecraft_common::CommonError;
use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

/// Why a tree operation was rejected.
///
/// Every variant is recoverable: the operation produced no tree and the
/// caller's tree is unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Path not found: {path} (failed at segment {depth})")]
    PathNotFound { path: TreePath, depth: usize },

    #[error("Path does not address a block sequence: {0}")]
    InvalidParent(TreePath),

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: TreePath,
        expected: BlockType,
        found: BlockType,
    },

    #[error("Cannot move {from} into its own subtree at {to}")]
    CycleDetected { from: TreePath, to: TreePath },

    #[error("A {0} block already exists at the root")]
    DuplicateSingleton(BlockType),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] CommonError),

    #[error("Document is not file-backed")]
    NotFileBacked,

    #[error("No block is selected")]
    NothingSelected,
}
