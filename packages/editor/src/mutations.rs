//! # Tree Mutations
//!
//! Path-addressed operations on block trees.
//!
//! ## Design Principles
//!
//! 1. **Pure**: every operation takes `&BlockTree` and returns a new tree;
//!    the input is never modified
//! 2. **Shared**: untouched subtrees are shared between the old and the
//!    new tree; only blocks on the edited path are copied
//! 3. **All-or-nothing**: on error no tree is produced
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - `to` is where the block ends up in the resulting tree
//! - `to`'s container is addressed in the original tree and adjusted when
//!   the removal shifts one of its ancestors
//! - Fails if `to` lies inside the moved block
//! - Equal paths are a no-op
//!
//! ### UpdateData
//! - Atomic replacement of the whole data object
//! - No sanitization; new data must be of the block's own type
//!
//! ### SetLayoutPreset
//! - Overflow columns merge into the last retained column
//! - Missing columns are appended empty

use crate::errors::{TreeError, TreeResult};
use crate::path::{resolve, resolve_sequence, TreePath};
use serde::{Deserialize, Serialize};
use sitecraft_blocks::{Block, BlockData, BlockTree, BlockType, Column, IdGenerator, LayoutPreset};
use std::sync::Arc;
use tracing::debug;

/// Insert `block` at `index` of the sequence at `parent`; index is clamped
pub fn insert_at(
    tree: &BlockTree,
    parent: &TreePath,
    index: usize,
    block: Block,
) -> TreeResult<BlockTree> {
    insert_shared(tree, parent, index, Arc::new(block))
}

/// Replace the data of the block at `path`
pub fn update_data(tree: &BlockTree, path: &TreePath, data: BlockData) -> TreeResult<BlockTree> {
    let current = resolve(tree, path)?;
    if current.block_type() != data.block_type() {
        return Err(TreeError::TypeMismatch {
            path: path.clone(),
            expected: current.block_type(),
            found: data.block_type(),
        });
    }

    let mut next = tree.clone();
    block_mut(&mut next, path)?.data = data;
    Ok(next)
}

/// Remove the block at `path` together with its subtree
pub fn delete_at(tree: &BlockTree, path: &TreePath) -> TreeResult<BlockTree> {
    remove_at(tree, path).map(|(next, _)| next)
}

/// Move the block at `from` so that it ends up at `to`
pub fn move_to(tree: &BlockTree, from: &TreePath, to: &TreePath) -> TreeResult<BlockTree> {
    resolve(tree, from)?;
    if from == to {
        return Ok(tree.clone());
    }

    let (Some(target_parent), Some(target_index)) = (to.parent(), to.index()) else {
        return Err(TreeError::InvalidParent(to.clone()));
    };
    if from.is_ancestor_of(to) {
        return Err(TreeError::CycleDetected {
            from: from.clone(),
            to: to.clone(),
        });
    }
    resolve_sequence(tree, &target_parent)?;

    let (without, moved) = remove_at(tree, from)?;
    let target_parent = target_parent.shifted_by_removal(from);
    if target_index > resolve_sequence(&without, &target_parent)?.len() {
        return Err(TreeError::PathNotFound {
            path: to.clone(),
            depth: to.len() - 1,
        });
    }
    insert_shared(&without, &target_parent, target_index, moved)
}

/// Switch the layout at `path` to `preset`, reslicing its columns
pub fn set_layout_preset(
    tree: &BlockTree,
    path: &TreePath,
    preset: LayoutPreset,
) -> TreeResult<BlockTree> {
    let block = resolve(tree, path)?;
    let layout = block.layout().ok_or_else(|| TreeError::TypeMismatch {
        path: path.clone(),
        expected: BlockType::Layout,
        found: block.block_type(),
    })?;
    let changed = layout.with_changed_preset(preset);

    let mut next = tree.clone();
    block_mut(&mut next, path)?.data = BlockData::Layout(changed);
    Ok(next)
}

/// Insert a deep copy of the block at `path` right after it.
///
/// The copy, its descendants and their list items all get fresh ids.
pub fn duplicate_at(
    tree: &BlockTree,
    path: &TreePath,
    ids: &mut IdGenerator,
) -> TreeResult<BlockTree> {
    let original = resolve(tree, path)?;
    let copy = reidentify(original, ids);

    let (Some(parent), Some(index)) = (path.parent(), path.index()) else {
        return Err(TreeError::InvalidParent(path.clone()));
    };
    insert_at(tree, &parent, index + 1, copy)
}

fn reidentify(block: &Block, ids: &mut IdGenerator) -> Block {
    let mut data = block.data.clone();
    data.reseed_item_ids(|| ids.new_id());

    if let Some(layout) = data.as_layout_mut() {
        layout.columns = layout
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|child| Arc::new(reidentify(child, ids)))
                    .collect()
            })
            .collect();
    }

    Block {
        id: ids.new_block_id(),
        data,
    }
}

fn insert_shared(
    tree: &BlockTree,
    parent: &TreePath,
    index: usize,
    block: Arc<Block>,
) -> TreeResult<BlockTree> {
    let sequence = resolve_sequence(tree, parent)?;
    check_placement(sequence, parent, &block)?;

    let mut next = tree.clone();
    let sequence = sequence_mut(next.blocks_mut(), parent.indices(), parent, 0)?;
    let index = index.min(sequence.len());
    sequence.insert(index, block);
    Ok(next)
}

fn remove_at(tree: &BlockTree, path: &TreePath) -> TreeResult<(BlockTree, Arc<Block>)> {
    resolve(tree, path)?;
    let (Some(parent), Some(index)) = (path.parent(), path.index()) else {
        return Err(TreeError::PathNotFound {
            path: path.clone(),
            depth: path.len(),
        });
    };

    let mut next = tree.clone();
    let sequence = sequence_mut(next.blocks_mut(), parent.indices(), path, 0)?;
    let removed = sequence.remove(index);
    Ok((next, removed))
}

/// Header and footer only live at the root, once each
fn check_placement(sequence: &[Arc<Block>], parent: &TreePath, block: &Block) -> TreeResult<()> {
    let block_type = block.block_type();
    if !block_type.is_singleton() {
        return Ok(());
    }
    if !parent.is_root() {
        return Err(TreeError::InvalidParent(parent.clone()));
    }
    if sequence.iter().any(|existing| existing.block_type() == block_type) {
        return Err(TreeError::DuplicateSingleton(block_type));
    }
    Ok(())
}

/// Mutable access to the block at `path`, copying shared blocks on the way
fn block_mut<'a>(tree: &'a mut BlockTree, path: &TreePath) -> TreeResult<&'a mut Block> {
    let (Some(parent), Some(index)) = (path.parent(), path.index()) else {
        return Err(TreeError::PathNotFound {
            path: path.clone(),
            depth: path.len(),
        });
    };

    let sequence = sequence_mut(tree.blocks_mut(), parent.indices(), path, 0)?;
    let block = sequence.get_mut(index).ok_or_else(|| TreeError::PathNotFound {
        path: path.clone(),
        depth: parent.len(),
    })?;
    Ok(Arc::make_mut(block))
}

/// Walk `rest` (pairs of block index, column index) down from `sequence`
fn sequence_mut<'a>(
    sequence: &'a mut Column,
    rest: &[usize],
    path: &TreePath,
    depth: usize,
) -> TreeResult<&'a mut Column> {
    match rest {
        [] => Ok(sequence),
        [block_index, column_index, tail @ ..] => {
            let shared = sequence
                .get_mut(*block_index)
                .ok_or_else(|| TreeError::PathNotFound {
                    path: path.clone(),
                    depth,
                })?;
            let block = Arc::make_mut(shared);
            let found = block.block_type();
            let layout = block.layout_mut().ok_or_else(|| TreeError::TypeMismatch {
                path: TreePath::from_indices(path.indices()[..=depth].to_vec()),
                expected: BlockType::Layout,
                found,
            })?;
            let column = layout
                .columns
                .get_mut(*column_index)
                .ok_or_else(|| TreeError::PathNotFound {
                    path: path.clone(),
                    depth: depth + 1,
                })?;
            sequence_mut(column, tail, path, depth + 2)
        }
        [_] => Err(TreeError::InvalidParent(path.clone())),
    }
}

/// Serializable, intent-level tree operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Insert a new block into a sequence
    InsertBlock {
        parent: TreePath,
        index: usize,
        block: Block,
    },

    /// Move a block so it ends up at `to`
    MoveBlock { from: TreePath, to: TreePath },

    /// Replace a block's data (atomic, no merge)
    UpdateData {
        path: TreePath,
        #[serde(with = "typed_data")]
        data: BlockData,
    },

    /// Remove a block and its subtree
    DeleteBlock { path: TreePath },

    /// Change a layout's preset, redistributing its children
    SetLayoutPreset { path: TreePath, preset: LayoutPreset },

    /// Copy a block next to itself; new ids are `{id_seed}-1`, `{id_seed}-2`, ...
    DuplicateBlock { path: TreePath, id_seed: String },
}

impl Mutation {
    /// Apply to `tree`, producing the next tree
    pub fn apply(&self, tree: &BlockTree) -> TreeResult<BlockTree> {
        debug!(op = self.name(), "Applying mutation");

        match self {
            Mutation::InsertBlock {
                parent,
                index,
                block,
            } => insert_at(tree, parent, *index, block.clone()),

            Mutation::MoveBlock { from, to } => move_to(tree, from, to),

            Mutation::UpdateData { path, data } => update_data(tree, path, data.clone()),

            Mutation::DeleteBlock { path } => delete_at(tree, path),

            Mutation::SetLayoutPreset { path, preset } => set_layout_preset(tree, path, *preset),

            Mutation::DuplicateBlock { path, id_seed } => {
                let mut ids = IdGenerator::sequential(id_seed.clone());
                duplicate_at(tree, path, &mut ids)
            }
        }
    }

    /// Validate without keeping the result
    pub fn validate(&self, tree: &BlockTree) -> TreeResult<()> {
        self.apply(tree).map(|_| ())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert_block",
            Mutation::MoveBlock { .. } => "move_block",
            Mutation::UpdateData { .. } => "update_data",
            Mutation::DeleteBlock { .. } => "delete_block",
            Mutation::SetLayoutPreset { .. } => "set_layout_preset",
            Mutation::DuplicateBlock { .. } => "duplicate_block",
        }
    }

    /// Human-readable label for history entries
    pub fn description(&self) -> String {
        match self {
            Mutation::InsertBlock { block, .. } => {
                format!("Add {}", block.block_type().label().to_lowercase())
            }
            Mutation::MoveBlock { .. } => "Move block".to_string(),
            Mutation::UpdateData { data, .. } => {
                format!("Edit {}", data.block_type().label().to_lowercase())
            }
            Mutation::DeleteBlock { .. } => "Delete block".to_string(),
            Mutation::SetLayoutPreset { preset, .. } => format!("Change columns to {}", preset),
            Mutation::DuplicateBlock { .. } => "Duplicate block".to_string(),
        }
    }
}

/// `BlockData` on its own does not say which type it is, so inside a
/// mutation it travels as `{ "type": ..., "data": ... }`.
mod typed_data {
    use serde::de::Error as _;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use sitecraft_blocks::{BlockData, BlockType};

    pub fn serialize<S: Serializer>(data: &BlockData, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TypedData", 2)?;
        state.serialize_field("type", &data.block_type())?;
        state.serialize_field("data", data)?;
        state.end()
    }

    #[derive(Deserialize)]
    struct TypedData {
        #[serde(rename = "type")]
        block_type: BlockType,
        #[serde(default)]
        data: Value,
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BlockData, D::Error> {
        let typed = TypedData::deserialize(deserializer)?;
        BlockData::from_value(typed.block_type, typed.data).map_err(D::Error::custom)
    }
}
