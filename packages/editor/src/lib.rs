//! # Sitecraft Editor
//!
//! Block-tree editing engine for Sitecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: block types, data, registry         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: paths + mutations + history         │
//! │  - Resolve paths into the tree              │
//! │  - Apply pure, structure-sharing mutations  │
//! │  - Selection, undo/redo, previews           │
//! │  - Load/save page documents                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / drag-and-drop (host UI)          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit produces a new tree sharing all
//!    untouched blocks with the old one
//! 2. **Paths are positional**: a path is only meaningful against the tree
//!    it was computed from
//! 3. **Rejected edits change nothing**: errors leave tree, selection and
//!    history as they were
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_editor::{EditSession, PageDocument, TreePath};
//!
//! let doc = PageDocument::load("pages/index.json")?;
//! let mut session = EditSession::new(doc);
//!
//! let block = session.create_block(BlockType::Layout, &FactoryOptions::with_preset(LayoutPreset::Thirds));
//! let path = session.insert_block(TreePath::root(), 0, block)?;
//! session.select(path)?;
//!
//! session.undo();
//! session.into_document().save()?;
//! ```

mod document;
mod errors;
mod mutations;
mod path;
mod session;
mod settings;
mod undo_stack;
mod validator;

pub use document::{DocumentKind, MutationResult, PageDocument};
pub use errors::{EditorError, TreeError, TreeResult};
pub use mutations::{
    delete_at, duplicate_at, insert_at, move_to, set_layout_preset, update_data, Mutation,
};
pub use path::{find_path, resolve, resolve_sequence, PathMarker, PathSegment, TreePath};
pub use session::{EditSession, EditorOptions, Selection};
pub use settings::{SettingsStore, UiSettings};
pub use undo_stack::{HistoryEntry, UndoStack};
pub use validator::{has_errors, validate_tree, Diagnostic, DiagnosticLevel};
