//! # Edit Session Management
//!
//! An EditSession is the editor's view of one document: the current tree,
//! the selected block, undo history and an in-flight preview.
//!
//! Every gesture goes through the session. Rejected gestures leave the tree,
//! the selection and the history exactly as they were.
//!
//! ## Previews
//!
//! Live edits (typing, dragging a slider) call `preview_update` on every
//! keystroke. Previews change the tree but not the history; the final
//! `commit_update` records a single entry that undoes back to the tree
//! before the first preview.

use crate::path::{find_path, resolve, resolve_sequence};
use crate::undo_stack::{HistoryEntry, UndoStack};
use crate::{EditorError, Mutation, PageDocument, TreePath};
use sitecraft_blocks::{
    create_block, Block, BlockData, BlockId, BlockTree, BlockType, FactoryOptions, IdGenerator,
    LayoutPreset,
};
use tracing::{debug, warn};

/// Library-side editor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Maximum number of undo levels (0 = unlimited)
    pub undo_levels: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self { undo_levels: 100 }
    }
}

/// The selected block, by path and by identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: TreePath,
    pub block_id: BlockId,
}

#[derive(Debug)]
struct Preview {
    base: BlockTree,
    mutations: Vec<Mutation>,
}

/// Single-user edit session
#[derive(Debug)]
pub struct EditSession {
    document: PageDocument,
    history: UndoStack,
    selected: Option<Selection>,
    ids: IdGenerator,
    preview: Option<Preview>,
}

impl EditSession {
    pub fn new(document: PageDocument) -> Self {
        Self::with_options(document, EditorOptions::default())
    }

    pub fn with_options(document: PageDocument, options: EditorOptions) -> Self {
        Self {
            document,
            history: UndoStack::with_max_levels(options.undo_levels),
            selected: None,
            ids: IdGenerator::default(),
            preview: None,
        }
    }

    /// Use `ids` for every block this session creates
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Give the document back, folding any pending preview into it
    pub fn into_document(mut self) -> PageDocument {
        self.flush_preview();
        self.document
    }

    pub fn tree(&self) -> &BlockTree {
        self.document.tree()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    // ----- selection -----

    pub fn selection(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        let selection = self.selected.as_ref()?;
        resolve(self.tree(), &selection.path).ok()
    }

    /// Select the block at `path`; an invalid path leaves the selection alone
    pub fn select(&mut self, path: TreePath) -> Result<(), EditorError> {
        let block = resolve(self.tree(), &path)?;
        self.selected = Some(Selection {
            block_id: block.id.clone(),
            path,
        });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Keep the selection pointing at the same block after the tree changed.
    ///
    /// Same path and same id: unchanged. Block moved: follow it. Block gone:
    /// clear.
    pub fn revalidate_selection(&mut self) {
        let Some(selection) = self.selected.take() else {
            return;
        };
        let tree = self.document.tree();

        let still_there = resolve(tree, &selection.path)
            .map(|block| block.id == selection.block_id)
            .unwrap_or(false);
        if still_there {
            self.selected = Some(selection);
            return;
        }

        self.selected = find_path(tree, &selection.block_id).map(|path| Selection {
            path,
            block_id: selection.block_id,
        });
    }

    // ----- structural edits -----

    /// Apply and record any mutation, e.g. one read from a mutation log
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        self.record(mutation)
    }

    /// Create a detached block with a fresh id
    pub fn create_block(&mut self, block_type: BlockType, options: &FactoryOptions) -> Block {
        create_block(block_type, options, &mut self.ids)
    }

    /// Insert `block`, returning the path it landed at
    pub fn insert_block(
        &mut self,
        parent: TreePath,
        index: usize,
        block: Block,
    ) -> Result<TreePath, EditorError> {
        let landed = resolve_sequence(self.tree(), &parent)
            .map(|sequence| parent.at(index.min(sequence.len())))
            .unwrap_or_else(|_| parent.at(index));

        self.record(Mutation::InsertBlock {
            parent,
            index,
            block,
        })?;
        Ok(landed)
    }

    pub fn move_block(&mut self, from: TreePath, to: TreePath) -> Result<(), EditorError> {
        self.record(Mutation::MoveBlock { from, to })
    }

    pub fn delete_block(&mut self, path: TreePath) -> Result<(), EditorError> {
        self.record(Mutation::DeleteBlock { path })
    }

    pub fn delete_selected(&mut self) -> Result<(), EditorError> {
        let path = self.selected_path()?;
        self.delete_block(path)
    }

    pub fn set_layout_preset(
        &mut self,
        path: TreePath,
        preset: LayoutPreset,
    ) -> Result<(), EditorError> {
        self.record(Mutation::SetLayoutPreset { path, preset })
    }

    /// Copy the block at `path` next to itself, returning the copy's path
    pub fn duplicate_block(&mut self, path: TreePath) -> Result<TreePath, EditorError> {
        let landed = match path.index() {
            Some(index) => path.with_index(index + 1),
            None => path.clone(),
        };
        let id_seed = self.ids.new_id();
        self.record(Mutation::DuplicateBlock { path, id_seed })?;
        Ok(landed)
    }

    // ----- data edits -----

    /// Replace a block's data, either as a recorded edit or as a preview
    pub fn update_data(
        &mut self,
        path: TreePath,
        data: BlockData,
        add_to_history: bool,
    ) -> Result<(), EditorError> {
        if add_to_history {
            self.commit_update(path, data)
        } else {
            self.preview_update(path, data)
        }
    }

    pub fn update_selected(
        &mut self,
        data: BlockData,
        add_to_history: bool,
    ) -> Result<(), EditorError> {
        let path = self.selected_path()?;
        self.update_data(path, data, add_to_history)
    }

    /// Apply an edit without recording it; consecutive previews coalesce
    pub fn preview_update(&mut self, path: TreePath, data: BlockData) -> Result<(), EditorError> {
        let mutation = Mutation::UpdateData { path, data };
        let next = self.try_apply(&mutation)?;

        let base = self.document.tree().clone();
        self.preview
            .get_or_insert_with(|| Preview {
                base,
                mutations: Vec::new(),
            })
            .mutations
            .push(mutation);

        self.document.replace_tree(next);
        self.revalidate_selection();
        Ok(())
    }

    /// Apply an edit and record one history entry covering any preview
    pub fn commit_update(&mut self, path: TreePath, data: BlockData) -> Result<(), EditorError> {
        let mutation = Mutation::UpdateData { path, data };
        let next = self.try_apply(&mutation)?;
        let description = mutation.description();

        let (before, mut mutations) = match self.preview.take() {
            Some(preview) => (preview.base, preview.mutations),
            None => (self.document.tree().clone(), Vec::new()),
        };
        mutations.push(mutation);

        self.document.replace_tree(next.clone());
        self.history
            .record_entry(HistoryEntry::new(mutations, before, next, description));
        self.revalidate_selection();
        Ok(())
    }

    /// Drop a pending preview and restore the tree it started from
    pub fn discard_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            debug!(edits = preview.mutations.len(), "Discarding preview");
            self.document.replace_tree(preview.base);
            self.revalidate_selection();
        }
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    // ----- history -----

    /// Group subsequent edits into one undo entry
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.flush_preview();
        self.history.begin_batch(self.document.tree());
        self.history.name_batch(description);
    }

    pub fn end_batch(&mut self) {
        self.flush_preview();
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        self.flush_preview();
        match self.history.undo() {
            Some(tree) => {
                self.document.replace_tree(tree);
                self.revalidate_selection();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.preview.is_some() {
            return false;
        }
        match self.history.redo() {
            Some(tree) => {
                self.document.replace_tree(tree);
                self.revalidate_selection();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.preview.is_some() || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.preview.is_none() && self.history.can_redo()
    }

    // ----- internals -----

    fn selected_path(&self) -> Result<TreePath, EditorError> {
        self.selected
            .as_ref()
            .map(|selection| selection.path.clone())
            .ok_or(EditorError::NothingSelected)
    }

    fn try_apply(&self, mutation: &Mutation) -> Result<BlockTree, EditorError> {
        mutation.apply(self.tree()).map_err(|err| {
            warn!(op = mutation.name(), error = %err, "Discarded edit");
            EditorError::from(err)
        })
    }

    fn record(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        self.flush_preview();
        let next = self.try_apply(&mutation)?;
        let before = self.document.tree().clone();

        self.document.replace_tree(next.clone());
        self.history.record(mutation, before, next);
        self.revalidate_selection();
        Ok(())
    }

    /// Turn a pending preview into a history entry as it stands
    fn flush_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            let description = preview
                .mutations
                .last()
                .map(Mutation::description)
                .unwrap_or_else(|| "Edit".to_string());
            let after = self.document.tree().clone();
            self.history.record_entry(HistoryEntry::new(
                preview.mutations,
                preview.base,
                after,
                description,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentKind;
    use serde_json::json;
    use sitecraft_blocks::TextData;

    fn session() -> EditSession {
        let tree: BlockTree = serde_json::from_value(json!([
            { "id": "a", "type": "text" },
            { "id": "b", "type": "image" },
            { "id": "c", "type": "button" }
        ]))
        .unwrap();
        EditSession::new(PageDocument::from_tree(DocumentKind::Page, tree))
            .with_id_generator(IdGenerator::sequential("new"))
    }

    fn text(content: &str) -> BlockData {
        BlockData::Text(TextData {
            content: content.to_string(),
            ..Default::default()
        })
    }

    fn content_of(session: &EditSession, index: usize) -> String {
        match &session.tree().blocks()[index].data {
            BlockData::Text(text) => text.content.clone(),
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_select_invalid_path_keeps_selection() {
        let mut session = session();
        session.select(TreePath::block(1)).unwrap();

        assert!(session.select(TreePath::block(9)).is_err());
        assert_eq!(session.selection().unwrap().block_id.as_str(), "b");
    }

    #[test]
    fn test_selection_follows_moved_block() {
        let mut session = session();
        session.select(TreePath::block(0)).unwrap();

        session
            .move_block(TreePath::block(0), TreePath::block(2))
            .unwrap();

        let selection = session.selection().unwrap();
        assert_eq!(selection.block_id.as_str(), "a");
        assert_eq!(selection.path, TreePath::block(2));
    }

    #[test]
    fn test_rejected_gesture_changes_nothing() {
        let mut session = session();
        session.select(TreePath::block(0)).unwrap();

        let err = session.delete_block(TreePath::block(7)).unwrap_err();
        assert!(matches!(err, EditorError::Tree(_)));
        assert_eq!(session.tree().len(), 3);
        assert!(!session.can_undo());
        assert_eq!(session.selection().unwrap().path, TreePath::block(0));
    }

    #[test]
    fn test_previews_coalesce_into_one_entry() {
        let mut session = session();

        session.preview_update(TreePath::block(0), text("H")).unwrap();
        session.preview_update(TreePath::block(0), text("He")).unwrap();
        assert!(!session.history().can_undo());
        session.commit_update(TreePath::block(0), text("Hey")).unwrap();

        assert_eq!(session.history().undo_levels(), 1);
        assert_eq!(content_of(&session, 0), "Hey");

        assert!(session.undo());
        assert_eq!(content_of(&session, 0), "");
        assert!(session.redo());
        assert_eq!(content_of(&session, 0), "Hey");
    }

    #[test]
    fn test_discard_preview_restores_base() {
        let mut session = session();
        session.preview_update(TreePath::block(0), text("draft")).unwrap();
        session.discard_preview();

        assert_eq!(content_of(&session, 0), "");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_structural_edit_flushes_preview() {
        let mut session = session();
        session.preview_update(TreePath::block(0), text("draft")).unwrap();
        session.delete_block(TreePath::block(2)).unwrap();

        assert_eq!(session.history().undo_levels(), 2);
        session.undo();
        assert_eq!(content_of(&session, 0), "draft");
        session.undo();
        assert_eq!(content_of(&session, 0), "");
    }

    #[test]
    fn test_update_selected_requires_selection() {
        let mut session = session();
        let err = session.update_selected(text("x"), true).unwrap_err();
        assert!(matches!(err, EditorError::NothingSelected));
    }

    #[test]
    fn test_insert_and_duplicate_report_paths() {
        let mut session = session();
        let block = session.create_block(BlockType::Text, &FactoryOptions::default());
        assert_eq!(block.id.as_str(), "new-1");

        let landed = session.insert_block(TreePath::root(), 99, block).unwrap();
        assert_eq!(landed, TreePath::block(3));

        let copy = session.duplicate_block(TreePath::block(3)).unwrap();
        assert_eq!(copy, TreePath::block(4));
        assert_ne!(session.tree().blocks()[4].id.as_str(), "new-1");
    }
}
