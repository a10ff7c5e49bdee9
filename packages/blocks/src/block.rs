use crate::data::BlockData;
use crate::error::BlockError;
use crate::id_generator::BlockId;
use crate::layout::LayoutData;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Ordered sequence of blocks inside one layout column
pub type Column = Vec<Arc<Block>>;

/// Block type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Text,
    Image,
    Button,
    Hero,
    Layout,
    Catalog,
    Showcase,
    Features,
    Form,
    Video,
    Map,
    Accordion,
    SocialIcons,
    Header,
    Footer,
}

impl BlockType {
    pub const ALL: [BlockType; 15] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Hero,
        BlockType::Layout,
        BlockType::Catalog,
        BlockType::Showcase,
        BlockType::Features,
        BlockType::Form,
        BlockType::Video,
        BlockType::Map,
        BlockType::Accordion,
        BlockType::SocialIcons,
        BlockType::Header,
        BlockType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Hero => "hero",
            BlockType::Layout => "layout",
            BlockType::Catalog => "catalog",
            BlockType::Showcase => "showcase",
            BlockType::Features => "features",
            BlockType::Form => "form",
            BlockType::Video => "video",
            BlockType::Map => "map",
            BlockType::Accordion => "accordion",
            BlockType::SocialIcons => "social-icons",
            BlockType::Header => "header",
            BlockType::Footer => "footer",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlockError::UnknownType(s.to_string()))
    }
}

/// A node of the block tree.
///
/// The block's type is carried by its data variant, so type and data can
/// never disagree. On the wire a block is `{ "id", "type", "data" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub data: BlockData,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, data: BlockData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    pub fn is_layout(&self) -> bool {
        matches!(self.data, BlockData::Layout(_))
    }

    pub fn layout(&self) -> Option<&LayoutData> {
        self.data.as_layout()
    }

    pub fn layout_mut(&mut self) -> Option<&mut LayoutData> {
        self.data.as_layout_mut()
    }

    /// Number of blocks in this block's subtree, itself included
    pub fn subtree_size(&self) -> usize {
        1 + self.layout().map_or(0, |layout| {
            layout
                .columns
                .iter()
                .flatten()
                .map(|child| child.subtree_size())
                .sum()
        })
    }
}

#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    data: Value,
}

impl TryFrom<RawBlock> for Block {
    type Error = BlockError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let block_type: BlockType = raw.block_type.parse()?;
        let data = BlockData::from_value(block_type, raw.data)?;
        Ok(Block { id: raw.id, data })
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.block_type())?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

/// Root sequence of a page, header or footer.
///
/// A persistent value: blocks are reference-counted, so cloning a tree is
/// cheap and mutations only copy the blocks along the edited path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTree {
    blocks: Vec<Arc<Block>>,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(blocks: Vec<Arc<Block>>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Arc<Block>] {
        &self.blocks
    }

    /// Mutable root sequence; shared blocks are copied on write by callers
    pub fn blocks_mut(&mut self) -> &mut Vec<Arc<Block>> {
        &mut self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|b| b.as_ref())
    }

    /// Total number of blocks at any depth
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(|b| b.subtree_size()).sum()
    }

    /// True if both trees hold the very same allocation for block `index`
    pub fn shares_block(&self, other: &BlockTree, index: usize) -> bool {
        match (self.blocks.get(index), other.blocks.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TextData;
    use crate::layout::LayoutPreset;
    use serde_json::json;

    #[test]
    fn test_block_type_tags() {
        assert_eq!(BlockType::SocialIcons.as_str(), "social-icons");
        assert_eq!("social-icons".parse::<BlockType>().unwrap(), BlockType::SocialIcons);
        assert_eq!(
            serde_json::to_string(&BlockType::SocialIcons).unwrap(),
            "\"social-icons\""
        );
        assert!("carousel".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_block_wire_shape() {
        let block = Block::new(
            "t1",
            BlockData::Text(TextData {
                content: "<p>Hi</p>".to_string(),
                ..Default::default()
            }),
        );

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["id"], "t1");
        assert_eq!(json["type"], "text");
        assert_eq!(json["data"]["content"], "<p>Hi</p>");
        assert_eq!(json["data"]["block_theme"], "auto");
    }

    #[test]
    fn test_nested_layout_round_trip() {
        let source = json!([
            {
                "id": "l1",
                "type": "layout",
                "data": {
                    "preset": "33-33-33",
                    "columns": [
                        [{ "id": "a", "type": "text", "data": { "content": "A" } }],
                        [{ "id": "b", "type": "image" }],
                        []
                    ]
                }
            },
            { "id": "c", "type": "button", "data": { "text": "Go" } }
        ]);

        let tree: BlockTree = serde_json::from_value(source).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.block_count(), 4);

        let layout = tree.blocks()[0].layout().unwrap();
        assert_eq!(layout.preset, LayoutPreset::Thirds);
        assert_eq!(layout.columns[1][0].block_type(), BlockType::Image);

        let reparsed: BlockTree =
            serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();
        assert_eq!(reparsed, tree);
    }

    #[test]
    fn test_unknown_type_fails_to_load() {
        let result: Result<Block, _> =
            serde_json::from_value(json!({ "id": "x", "type": "carousel", "data": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_shares_blocks() {
        let tree = BlockTree::from_blocks(vec![Block::new(
            "t1",
            BlockData::Text(TextData::default()),
        )]);
        let copy = tree.clone();
        assert!(tree.shares_block(&copy, 0));
    }
}
