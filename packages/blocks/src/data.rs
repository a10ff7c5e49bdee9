//! Type-specific block data.
//!
//! Each block type owns one data struct; [`BlockData`] is the sum over all
//! of them. Every struct flattens [`CommonData`] so the wire shape is a
//! single flat object per block.

use crate::block::BlockType;
use crate::common::CommonData;
use crate::error::{BlockError, BlockResult};
use crate::layout::LayoutData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextData {
    #[serde(flatten)]
    pub common: CommonData,
    /// Rich text as sanitized HTML
    pub content: String,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    #[serde(flatten)]
    pub common: CommonData,
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Max width in percent of the container
    pub width: u8,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonData {
    #[serde(flatten)]
    pub common: CommonData,
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub align: TextAlign,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Background overlay opacity, 0-100
    pub overlay: u8,
    pub button_text: String,
    pub button_url: String,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub limit: u32,
    pub per_row: u8,
    pub show_prices: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowcaseData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    pub product_ids: Vec<String>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureItem {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    pub items: Vec<FeatureItem>,
    pub per_row: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    #[default]
    Text,
    Email,
    Phone,
    Textarea,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FormFieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit_text: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoData {
    #[serde(flatten)]
    pub common: CommonData,
    pub url: String,
    pub autoplay: bool,
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub controls: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapData {
    #[serde(flatten)]
    pub common: CommonData,
    pub address: String,
    pub zoom: u8,
    /// Height in px
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionItem {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionData {
    #[serde(flatten)]
    pub common: CommonData,
    pub title: String,
    pub items: Vec<AccordionItem>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    /// Network tag, e.g. "instagram"
    pub network: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialIconsData {
    #[serde(flatten)]
    pub common: CommonData,
    pub items: Vec<SocialLink>,
    pub align: TextAlign,
    /// Icon size in px
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderData {
    #[serde(flatten)]
    pub common: CommonData,
    pub logo_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    pub nav_items: Vec<NavItem>,
    pub sticky: bool,
    pub show_cart: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterData {
    #[serde(flatten)]
    pub common: CommonData,
    pub text: String,
    pub nav_items: Vec<NavItem>,
    pub social: Vec<SocialLink>,
}

/// Data payload of a block, one variant per block type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockData {
    Text(TextData),
    Image(ImageData),
    Button(ButtonData),
    Hero(HeroData),
    Layout(LayoutData),
    Catalog(CatalogData),
    Showcase(ShowcaseData),
    Features(FeaturesData),
    Form(FormData),
    Video(VideoData),
    Map(MapData),
    Accordion(AccordionData),
    SocialIcons(SocialIconsData),
    Header(HeaderData),
    Footer(FooterData),
}

impl BlockData {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Text(_) => BlockType::Text,
            BlockData::Image(_) => BlockType::Image,
            BlockData::Button(_) => BlockType::Button,
            BlockData::Hero(_) => BlockType::Hero,
            BlockData::Layout(_) => BlockType::Layout,
            BlockData::Catalog(_) => BlockType::Catalog,
            BlockData::Showcase(_) => BlockType::Showcase,
            BlockData::Features(_) => BlockType::Features,
            BlockData::Form(_) => BlockType::Form,
            BlockData::Video(_) => BlockType::Video,
            BlockData::Map(_) => BlockType::Map,
            BlockData::Accordion(_) => BlockType::Accordion,
            BlockData::SocialIcons(_) => BlockType::SocialIcons,
            BlockData::Header(_) => BlockType::Header,
            BlockData::Footer(_) => BlockType::Footer,
        }
    }

    /// Empty data for `block_type` (what a block with no `data` loads as)
    pub fn empty(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockData::Text(TextData::default()),
            BlockType::Image => BlockData::Image(ImageData::default()),
            BlockType::Button => BlockData::Button(ButtonData::default()),
            BlockType::Hero => BlockData::Hero(HeroData::default()),
            BlockType::Layout => BlockData::Layout(LayoutData::default()),
            BlockType::Catalog => BlockData::Catalog(CatalogData::default()),
            BlockType::Showcase => BlockData::Showcase(ShowcaseData::default()),
            BlockType::Features => BlockData::Features(FeaturesData::default()),
            BlockType::Form => BlockData::Form(FormData::default()),
            BlockType::Video => BlockData::Video(VideoData::default()),
            BlockType::Map => BlockData::Map(MapData::default()),
            BlockType::Accordion => BlockData::Accordion(AccordionData::default()),
            BlockType::SocialIcons => BlockData::SocialIcons(SocialIconsData::default()),
            BlockType::Header => BlockData::Header(HeaderData::default()),
            BlockType::Footer => BlockData::Footer(FooterData::default()),
        }
    }

    /// Decode a JSON payload as the data of `block_type`
    pub fn from_value(block_type: BlockType, value: Value) -> BlockResult<Self> {
        let value = match value {
            Value::Null => return Ok(Self::empty(block_type)),
            other => other,
        };

        fn decode<T: serde::de::DeserializeOwned>(
            block_type: BlockType,
            value: Value,
        ) -> BlockResult<T> {
            serde_json::from_value(value)
                .map_err(|e| BlockError::invalid_data(block_type.as_str(), e.to_string()))
        }

        Ok(match block_type {
            BlockType::Text => BlockData::Text(decode(block_type, value)?),
            BlockType::Image => BlockData::Image(decode(block_type, value)?),
            BlockType::Button => BlockData::Button(decode(block_type, value)?),
            BlockType::Hero => BlockData::Hero(decode(block_type, value)?),
            BlockType::Layout => {
                let has_columns = value.get("columns").is_some();
                let mut layout: LayoutData = decode(block_type, value)?;
                if !has_columns {
                    layout.columns = LayoutData::with_preset(layout.preset).columns;
                }
                BlockData::Layout(layout)
            }
            BlockType::Catalog => BlockData::Catalog(decode(block_type, value)?),
            BlockType::Showcase => BlockData::Showcase(decode(block_type, value)?),
            BlockType::Features => BlockData::Features(decode(block_type, value)?),
            BlockType::Form => BlockData::Form(decode(block_type, value)?),
            BlockType::Video => BlockData::Video(decode(block_type, value)?),
            BlockType::Map => BlockData::Map(decode(block_type, value)?),
            BlockType::Accordion => BlockData::Accordion(decode(block_type, value)?),
            BlockType::SocialIcons => BlockData::SocialIcons(decode(block_type, value)?),
            BlockType::Header => BlockData::Header(decode(block_type, value)?),
            BlockType::Footer => BlockData::Footer(decode(block_type, value)?),
        })
    }

    pub fn common(&self) -> &CommonData {
        match self {
            BlockData::Text(d) => &d.common,
            BlockData::Image(d) => &d.common,
            BlockData::Button(d) => &d.common,
            BlockData::Hero(d) => &d.common,
            BlockData::Layout(d) => &d.common,
            BlockData::Catalog(d) => &d.common,
            BlockData::Showcase(d) => &d.common,
            BlockData::Features(d) => &d.common,
            BlockData::Form(d) => &d.common,
            BlockData::Video(d) => &d.common,
            BlockData::Map(d) => &d.common,
            BlockData::Accordion(d) => &d.common,
            BlockData::SocialIcons(d) => &d.common,
            BlockData::Header(d) => &d.common,
            BlockData::Footer(d) => &d.common,
        }
    }

    pub fn as_layout(&self) -> Option<&LayoutData> {
        match self {
            BlockData::Layout(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn as_layout_mut(&mut self) -> Option<&mut LayoutData> {
        match self {
            BlockData::Layout(layout) => Some(layout),
            _ => None,
        }
    }

    /// Give every list item inside this data a fresh id.
    ///
    /// Used when a block is duplicated so copies never share item ids.
    pub fn reseed_item_ids(&mut self, mut next_id: impl FnMut() -> String) {
        match self {
            BlockData::Features(d) => d.items.iter_mut().for_each(|i| i.id = next_id()),
            BlockData::Form(d) => d.fields.iter_mut().for_each(|f| f.id = next_id()),
            BlockData::Accordion(d) => d.items.iter_mut().for_each(|i| i.id = next_id()),
            BlockData::SocialIcons(d) => d.items.iter_mut().for_each(|i| i.id = next_id()),
            BlockData::Header(d) => d.nav_items.iter_mut().for_each(|n| n.id = next_id()),
            BlockData::Footer(d) => {
                d.nav_items.iter_mut().for_each(|n| n.id = next_id());
                d.social.iter_mut().for_each(|s| s.id = next_id());
            }
            BlockData::Text(_)
            | BlockData::Image(_)
            | BlockData::Button(_)
            | BlockData::Hero(_)
            | BlockData::Layout(_)
            | BlockData::Catalog(_)
            | BlockData::Showcase(_)
            | BlockData::Video(_)
            | BlockData::Map(_) => {}
        }
    }
}
