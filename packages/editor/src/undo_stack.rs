//! # Edit history
//!
//! Every entry holds the tree on both sides of an edit. Because trees share
//! untouched blocks through `Arc`, an entry only owns the blocks along the
//! paths it rewrote.
//!
//! Undo hands back `before`, redo hands back `after`. Recording anything new
//! forgets the redo side. Several mutations can be folded into a single entry
//! with [`UndoStack::begin_batch`] / [`UndoStack::end_batch`].
//!
//! ```rust,ignore
//! let mut history = UndoStack::new();
//!
//! let next = mutation.apply(&tree)?;
//! history.record(mutation, tree.clone(), next.clone());
//!
//! if let Some(previous) = history.undo() {
//!     tree = previous;
//! }
//! ```

use crate::Mutation;
use sitecraft_blocks::BlockTree;

const DEFAULT_LEVELS: usize = 100;

/// One undoable step, possibly made of several mutations
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Applied mutations, oldest first
    pub mutations: Vec<Mutation>,
    pub before: BlockTree,
    pub after: BlockTree,
    /// Label shown in undo menus
    pub label: Option<String>,
}

impl HistoryEntry {
    pub fn new(
        mutations: Vec<Mutation>,
        before: BlockTree,
        after: BlockTree,
        label: impl Into<String>,
    ) -> Self {
        Self {
            mutations,
            before,
            after,
            label: Some(label.into()),
        }
    }

    fn open(tree: &BlockTree) -> Self {
        Self {
            mutations: Vec::new(),
            before: tree.clone(),
            after: tree.clone(),
            label: None,
        }
    }

    fn absorb(&mut self, mutations: impl IntoIterator<Item = Mutation>, after: BlockTree) {
        self.mutations.extend(mutations);
        self.after = after;
    }
}

/// Bounded undo/redo history over block trees
#[derive(Debug)]
pub struct UndoStack {
    past: Vec<HistoryEntry>,
    future: Vec<HistoryEntry>,
    /// 0 keeps everything
    limit: usize,
    open_batch: Option<HistoryEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_LEVELS)
    }

    pub fn with_max_levels(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit,
            open_batch: None,
        }
    }

    /// Record an applied mutation.
    ///
    /// While a batch is open the mutation is folded into it.
    pub fn record(&mut self, mutation: Mutation, before: BlockTree, after: BlockTree) {
        match self.open_batch.as_mut() {
            Some(open) => {
                open.absorb([mutation], after);
                self.future.clear();
            }
            None => {
                let label = mutation.description();
                self.push_entry(HistoryEntry::new(vec![mutation], before, after, label));
            }
        }
    }

    /// Record several already-applied mutations as a single step
    pub fn record_entry(&mut self, entry: HistoryEntry) {
        match self.open_batch.as_mut() {
            Some(open) => {
                open.absorb(entry.mutations, entry.after);
                self.future.clear();
            }
            None if entry.mutations.is_empty() => {}
            None => self.push_entry(entry),
        }
    }

    /// Open a batch starting from `tree`. A batch that is already open stays open.
    pub fn begin_batch(&mut self, tree: &BlockTree) {
        if self.open_batch.is_none() {
            self.open_batch = Some(HistoryEntry::open(tree));
        }
    }

    /// Close the open batch. Batches with no mutations leave no entry.
    pub fn end_batch(&mut self) {
        let Some(batch) = self.open_batch.take() else {
            return;
        };
        if !batch.mutations.is_empty() {
            self.push_entry(batch);
        }
    }

    pub fn in_batch(&self) -> bool {
        self.open_batch.is_some()
    }

    pub fn name_batch(&mut self, label: impl Into<String>) {
        if let Some(open) = self.open_batch.as_mut() {
            open.label = Some(label.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.past.push(entry);
        if self.limit > 0 && self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
        self.future.clear();
    }

    /// Step back one entry and return the tree to restore.
    /// An open batch is closed first.
    pub fn undo(&mut self) -> Option<BlockTree> {
        self.end_batch();
        let entry = self.past.pop()?;
        let restored = entry.before.clone();
        self.future.push(entry);
        Some(restored)
    }

    /// Reapply the last undone entry. An open batch is closed first, and one
    /// holding edits leaves nothing to redo.
    pub fn redo(&mut self) -> Option<BlockTree> {
        self.end_batch();
        let entry = self.future.pop()?;
        let restored = entry.after.clone();
        self.past.push(entry);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        let open_has_edits = self
            .open_batch
            .as_ref()
            .is_some_and(|open| !open.mutations.is_empty());
        open_has_edits || !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.open_batch = None;
        self.past.clear();
        self.future.clear();
    }

    /// Label of the entry `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.past.last()?.label.as_deref()
    }

    /// Label of the entry `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.future.last()?.label.as_deref()
    }

    /// Undo labels, oldest first
    pub fn descriptions(&self) -> Vec<&str> {
        self.past
            .iter()
            .map(|entry| entry.label.as_deref().unwrap_or("Edit"))
            .collect()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
