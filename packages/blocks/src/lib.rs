//! # Sitecraft Blocks
//!
//! Data model for page content: blocks, their type-specific data, layout
//! columns, and the root [`BlockTree`].
//!
//! ```text
//! BlockTree ─┬─ Block { id, data: Text(..) }
//!            ├─ Block { id, data: Layout { preset: "50-50", columns } }
//!            │     ├─ column 0 ─ Block, Block
//!            │     └─ column 1 ─ Block
//!            └─ Block { id, data: Button(..) }
//! ```
//!
//! Blocks are created through the registry ([`create_block`]) and are
//! plain serde values, so a whole tree serializes to JSON for persistence.

pub mod block;
pub mod common;
pub mod data;
pub mod error;
pub mod id_generator;
pub mod layout;
pub mod registry;

pub use block::{Block, BlockTree, BlockType, Column};
pub use common::{
    is_sanitized_anchor, sanitize_anchor, Animation, AnimationKind, BlockTheme, CommonData,
    Spacing, MAX_PADDING,
};
pub use data::*;
pub use error::{BlockError, BlockResult};
pub use id_generator::{generate_id, BlockId, IdGenerator};
pub use layout::{reslice_columns, LayoutData, LayoutPreset, VerticalAlign};
pub use registry::{create_block, registry, BlockCategory, FactoryOptions, RegistryEntry};
