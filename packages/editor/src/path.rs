//! # Path Addressing
//!
//! A [`TreePath`] locates either a block or a block sequence.
//!
//! On the wire a path is a JSON array of segments, e.g.
//! `[0, "data", "columns", 1, 2]` (root block 0, its column 1, block 2).
//! The `data`/`columns` markers are optional on input, so `[0, 1, 2]` is
//! the same path.
//!
//! Internally only the indices are kept:
//!
//! ```text
//! []            root sequence
//! [0]           block 0 of the root
//! [0, 1]        column 1 of the layout at [0]
//! [0, 1, 2]     block 2 of that column
//! ```
//!
//! Odd length addresses a block, even length a sequence.

use crate::errors::{TreeError, TreeResult};
use serde::{Deserialize, Serialize};
use sitecraft_blocks::{Block, BlockId, BlockTree, BlockType};
use sitecraft_common::{walk_block, Visitor};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMarker {
    Data,
    Columns,
}

/// One segment of a path as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Marker(PathMarker),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct TreePath {
    indices: Vec<usize>,
}

impl TreePath {
    /// The root sequence
    pub fn root() -> Self {
        Self::default()
    }

    /// Top-level block at `index`
    pub fn block(index: usize) -> Self {
        Self {
            indices: vec![index],
        }
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Parse wire segments; markers must appear as `data, columns` right
    /// before a column index.
    pub fn from_segments(segments: &[PathSegment]) -> TreeResult<Self> {
        let mut indices = Vec::new();
        // 0 = none, 1 = saw `data`, 2 = saw `data, columns`
        let mut marker_state = 0;

        for segment in segments {
            match segment {
                PathSegment::Index(index) => {
                    if marker_state == 1 {
                        return Err(TreeError::InvalidPath(
                            "`data` must be followed by `columns`".to_string(),
                        ));
                    }
                    indices.push(*index);
                    marker_state = 0;
                }
                PathSegment::Marker(PathMarker::Data) => {
                    if indices.len() % 2 == 0 || marker_state != 0 {
                        return Err(TreeError::InvalidPath(
                            "`data` may only follow a block index".to_string(),
                        ));
                    }
                    marker_state = 1;
                }
                PathSegment::Marker(PathMarker::Columns) => {
                    if marker_state != 1 {
                        return Err(TreeError::InvalidPath(
                            "`columns` must follow `data`".to_string(),
                        ));
                    }
                    marker_state = 2;
                }
            }
        }

        if marker_state != 0 {
            return Err(TreeError::InvalidPath(
                "path ends with a marker".to_string(),
            ));
        }

        Ok(Self { indices })
    }

    /// Canonical wire form, with `data, columns` before every column index
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = Vec::with_capacity(self.indices.len() * 2);
        for (position, index) in self.indices.iter().enumerate() {
            if position % 2 == 1 {
                segments.push(PathSegment::Marker(PathMarker::Data));
                segments.push(PathSegment::Marker(PathMarker::Columns));
            }
            segments.push(PathSegment::Index(*index));
        }
        segments
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_block(&self) -> bool {
        self.indices.len() % 2 == 1
    }

    pub fn is_sequence(&self) -> bool {
        !self.is_block()
    }

    /// Index of the addressed block within its parent sequence
    pub fn index(&self) -> Option<usize> {
        if self.is_block() {
            self.indices.last().copied()
        } else {
            None
        }
    }

    /// Sequence that contains the addressed block
    pub fn parent(&self) -> Option<TreePath> {
        if self.is_block() {
            Some(Self {
                indices: self.indices[..self.indices.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Layout block that owns the addressed sequence
    pub fn owner(&self) -> Option<TreePath> {
        if self.is_sequence() && !self.is_root() {
            Some(Self {
                indices: self.indices[..self.indices.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Column `column` of the layout block at this path
    pub fn column(&self, column: usize) -> TreePath {
        debug_assert!(self.is_block(), "columns belong to blocks");
        let mut indices = self.indices.clone();
        indices.push(column);
        Self { indices }
    }

    /// Block `index` of the sequence at this path
    pub fn at(&self, index: usize) -> TreePath {
        debug_assert!(self.is_sequence(), "blocks live in sequences");
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Block `index` of column `column` of the layout at this path
    pub fn child(&self, column: usize, index: usize) -> TreePath {
        self.column(column).at(index)
    }

    /// Same path with the trailing index replaced
    pub fn with_index(&self, index: usize) -> TreePath {
        let mut indices = self.indices.clone();
        if let Some(last) = indices.last_mut() {
            *last = index;
        }
        Self { indices }
    }

    /// True if `other` lies strictly below this path
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        other.indices.len() > self.indices.len() && other.indices.starts_with(&self.indices)
    }

    /// True if `other` is this path or lies below it
    pub fn contains(&self, other: &TreePath) -> bool {
        self == other || self.is_ancestor_of(other)
    }

    /// Rewrite this path for a tree from which the block at `removed` was
    /// taken out: a later sibling of `removed` on the way down shifts by one.
    ///
    /// Paths inside the removed subtree are not meaningful afterwards and are
    /// returned unchanged.
    pub fn shifted_by_removal(&self, removed: &TreePath) -> TreePath {
        let Some(removed_index) = removed.index() else {
            return self.clone();
        };
        let depth = removed.len() - 1;

        let mut indices = self.indices.clone();
        if indices.len() > depth
            && indices[..depth] == removed.indices[..depth]
            && indices[depth] > removed_index
        {
            indices[depth] -= 1;
        }
        Self { indices }
    }

    /// Rewrite this path for a tree into which a block was inserted at
    /// `inserted`: siblings at or after it on the way down shift by one.
    pub fn shifted_by_insertion(&self, inserted: &TreePath) -> TreePath {
        let Some(inserted_index) = inserted.index() else {
            return self.clone();
        };
        let depth = inserted.len() - 1;

        let mut indices = self.indices.clone();
        if indices.len() > depth
            && indices[..depth] == inserted.indices[..depth]
            && indices[depth] >= inserted_index
        {
            indices[depth] += 1;
        }
        Self { indices }
    }
}

impl TryFrom<Vec<PathSegment>> for TreePath {
    type Error = TreeError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, Self::Error> {
        Self::from_segments(&segments)
    }
}

impl From<TreePath> for Vec<PathSegment> {
    fn from(path: TreePath) -> Self {
        path.segments()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indices.is_empty() {
            return f.write_str("(root)");
        }
        for (position, index) in self.indices.iter().enumerate() {
            if position > 0 {
                f.write_str("/")?;
            }
            if position % 2 == 1 {
                f.write_str("columns/")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

/// Resolve the block at `path`.
///
/// O(depth). Fails with `PathNotFound` when an index is out of range and
/// with `TypeMismatch` when the path descends through a non-layout block.
pub fn resolve<'a>(tree: &'a BlockTree, path: &TreePath) -> TreeResult<&'a Block> {
    if !path.is_block() {
        return Err(TreeError::PathNotFound {
            path: path.clone(),
            depth: path.len(),
        });
    }

    let indices = path.indices();
    let mut sequence: &[Arc<Block>] = tree.blocks();
    let mut depth = 0;

    loop {
        let block = sequence.get(indices[depth]).ok_or_else(|| TreeError::PathNotFound {
            path: path.clone(),
            depth,
        })?;

        if depth + 1 == indices.len() {
            return Ok(block.as_ref());
        }

        sequence = column_of(block, path, depth)?;
        depth += 2;
    }
}

/// Resolve the sequence at `path` (the root, or a layout column)
pub fn resolve_sequence<'a>(tree: &'a BlockTree, path: &TreePath) -> TreeResult<&'a [Arc<Block>]> {
    if path.is_block() {
        return Err(TreeError::InvalidParent(path.clone()));
    }
    let Some(owner) = path.owner() else {
        return Ok(tree.blocks());
    };

    let block = resolve(tree, &owner)?;
    column_of(block, path, owner.len() - 1)
}

/// Column `path[depth + 1]` of `block`, which sits at `path[..=depth]`
fn column_of<'a>(block: &'a Block, path: &TreePath, depth: usize) -> TreeResult<&'a [Arc<Block>]> {
    let layout = block.layout().ok_or_else(|| TreeError::TypeMismatch {
        path: TreePath::from_indices(path.indices()[..=depth].to_vec()),
        expected: BlockType::Layout,
        found: block.block_type(),
    })?;

    layout
        .columns
        .get(path.indices()[depth + 1])
        .map(|column| column.as_slice())
        .ok_or_else(|| TreeError::PathNotFound {
            path: path.clone(),
            depth: depth + 1,
        })
}

/// Locate a block by id, depth-first in document order
pub fn find_path(tree: &BlockTree, id: &BlockId) -> Option<TreePath> {
    struct Finder<'a> {
        id: &'a BlockId,
        found: Option<TreePath>,
    }

    impl Visitor for Finder<'_> {
        fn visit_block(&mut self, block: &Block, location: &[usize]) {
            if self.found.is_some() {
                return;
            }
            if &block.id == self.id {
                self.found = Some(TreePath::from_indices(location.to_vec()));
                return;
            }
            walk_block(self, block, location);
        }
    }

    let mut finder = Finder { id, found: None };
    finder.visit_tree(tree);
    finder.found
}
