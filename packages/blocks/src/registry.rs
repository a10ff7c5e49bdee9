//! # Block Registry
//!
//! Static metadata and default-data factories for every block type.
//!
//! Adding a block type means adding a `BlockType` variant, its data struct,
//! and one arm in each match below; the compiler points at every place that
//! still needs it.

use crate::block::{Block, BlockType};
use crate::common::CommonData;
use crate::data::*;
use crate::id_generator::IdGenerator;
use crate::layout::{LayoutData, LayoutPreset};
use serde::Serialize;

/// Palette grouping used by the block picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Basic,
    Structure,
    Commerce,
    Media,
    Interactive,
    Site,
}

/// Registry metadata for one block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub block_type: BlockType,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: BlockCategory,
    /// May be placed inside a layout column
    pub nestable: bool,
    /// At most one per root sequence
    pub singleton: bool,
}

/// Options supplied by the drag source when creating a block
#[derive(Debug, Clone, Default)]
pub struct FactoryOptions {
    /// Initial preset for layout blocks
    pub preset: Option<LayoutPreset>,
}

impl FactoryOptions {
    pub fn with_preset(preset: LayoutPreset) -> Self {
        Self {
            preset: Some(preset),
        }
    }
}

impl BlockType {
    pub fn entry(&self) -> RegistryEntry {
        let (label, icon, category) = match self {
            BlockType::Text => ("Text", "type", BlockCategory::Basic),
            BlockType::Image => ("Image", "image", BlockCategory::Media),
            BlockType::Button => ("Button", "mouse-pointer", BlockCategory::Basic),
            BlockType::Hero => ("Hero", "star", BlockCategory::Structure),
            BlockType::Layout => ("Columns", "columns", BlockCategory::Structure),
            BlockType::Catalog => ("Catalog", "grid", BlockCategory::Commerce),
            BlockType::Showcase => ("Showcase", "shopping-bag", BlockCategory::Commerce),
            BlockType::Features => ("Features", "check-square", BlockCategory::Basic),
            BlockType::Form => ("Form", "clipboard", BlockCategory::Interactive),
            BlockType::Video => ("Video", "video", BlockCategory::Media),
            BlockType::Map => ("Map", "map-pin", BlockCategory::Media),
            BlockType::Accordion => ("Accordion", "list", BlockCategory::Interactive),
            BlockType::SocialIcons => ("Social icons", "share-2", BlockCategory::Basic),
            BlockType::Header => ("Header", "layout", BlockCategory::Site),
            BlockType::Footer => ("Footer", "minus-square", BlockCategory::Site),
        };

        RegistryEntry {
            block_type: *self,
            label,
            icon,
            category,
            nestable: self.is_nestable(),
            singleton: self.is_singleton(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.entry().label
    }

    /// Header and footer live at the root only
    pub fn is_nestable(&self) -> bool {
        !self.is_singleton()
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, BlockType::Header | BlockType::Footer)
    }

    /// Fresh, valid data for a new block of this type.
    ///
    /// List-shaped data is seeded with sample items, each with its own id.
    pub fn default_data(&self, options: &FactoryOptions, ids: &mut IdGenerator) -> BlockData {
        let common = CommonData::default();

        match self {
            BlockType::Text => BlockData::Text(TextData {
                common,
                content: "<p>Write something here</p>".to_string(),
                align: TextAlign::Left,
            }),
            BlockType::Image => BlockData::Image(ImageData {
                common,
                src: String::new(),
                alt: String::new(),
                link: None,
                width: 100,
                align: TextAlign::Center,
            }),
            BlockType::Button => BlockData::Button(ButtonData {
                common,
                text: "Click me".to_string(),
                url: "#".to_string(),
                variant: ButtonVariant::Primary,
                align: TextAlign::Center,
                open_in_new_tab: false,
            }),
            BlockType::Hero => BlockData::Hero(HeroData {
                common,
                title: "Your headline".to_string(),
                subtitle: "A short sentence about what you offer".to_string(),
                background_image: None,
                overlay: 40,
                button_text: "Learn more".to_string(),
                button_url: "#".to_string(),
                align: TextAlign::Center,
            }),
            BlockType::Layout => {
                let preset = options.preset.unwrap_or_default();
                BlockData::Layout(LayoutData {
                    common,
                    ..LayoutData::with_preset(preset)
                })
            }
            BlockType::Catalog => BlockData::Catalog(CatalogData {
                common,
                title: "Products".to_string(),
                category_id: None,
                limit: 12,
                per_row: 3,
                show_prices: true,
            }),
            BlockType::Showcase => BlockData::Showcase(ShowcaseData {
                common,
                title: "Featured".to_string(),
                product_ids: Vec::new(),
                autoplay: false,
            }),
            BlockType::Features => BlockData::Features(FeaturesData {
                common,
                title: "Why choose us".to_string(),
                items: ["Fast", "Reliable", "Friendly"]
                    .iter()
                    .map(|title| FeatureItem {
                        id: ids.new_id(),
                        icon: "check".to_string(),
                        title: title.to_string(),
                        description: String::new(),
                    })
                    .collect(),
                per_row: 3,
            }),
            BlockType::Form => BlockData::Form(FormData {
                common,
                title: "Contact us".to_string(),
                fields: vec![
                    FormField {
                        id: ids.new_id(),
                        label: "Name".to_string(),
                        kind: FormFieldKind::Text,
                        required: true,
                    },
                    FormField {
                        id: ids.new_id(),
                        label: "Email".to_string(),
                        kind: FormFieldKind::Email,
                        required: true,
                    },
                    FormField {
                        id: ids.new_id(),
                        label: "Message".to_string(),
                        kind: FormFieldKind::Textarea,
                        required: false,
                    },
                ],
                submit_text: "Send".to_string(),
                success_message: "Thanks, we will be in touch.".to_string(),
            }),
            BlockType::Video => BlockData::Video(VideoData {
                common,
                url: String::new(),
                autoplay: false,
                muted: false,
                looped: false,
                controls: true,
            }),
            BlockType::Map => BlockData::Map(MapData {
                common,
                address: String::new(),
                zoom: 14,
                height: 400,
            }),
            BlockType::Accordion => BlockData::Accordion(AccordionData {
                common,
                title: "Frequently asked questions".to_string(),
                items: (1..=3)
                    .map(|n| AccordionItem {
                        id: ids.new_id(),
                        question: format!("Question {}", n),
                        answer: String::new(),
                    })
                    .collect(),
                allow_multiple: false,
            }),
            BlockType::SocialIcons => BlockData::SocialIcons(SocialIconsData {
                common,
                items: ["instagram", "facebook"]
                    .iter()
                    .map(|network| SocialLink {
                        id: ids.new_id(),
                        network: network.to_string(),
                        url: String::new(),
                    })
                    .collect(),
                align: TextAlign::Center,
                size: 24,
            }),
            BlockType::Header => BlockData::Header(HeaderData {
                common,
                logo_text: "My site".to_string(),
                logo_image: None,
                nav_items: vec![
                    NavItem {
                        id: ids.new_id(),
                        label: "Home".to_string(),
                        url: "/".to_string(),
                    },
                    NavItem {
                        id: ids.new_id(),
                        label: "Shop".to_string(),
                        url: "/shop".to_string(),
                    },
                ],
                sticky: true,
                show_cart: true,
            }),
            BlockType::Footer => BlockData::Footer(FooterData {
                common,
                text: "© My site".to_string(),
                nav_items: Vec::new(),
                social: Vec::new(),
            }),
        }
    }
}

/// All registry entries, in palette order
pub fn registry() -> Vec<RegistryEntry> {
    BlockType::ALL.iter().map(|t| t.entry()).collect()
}

/// Create a block of `block_type` with a fresh id and default data
pub fn create_block(
    block_type: BlockType,
    options: &FactoryOptions,
    ids: &mut IdGenerator,
) -> Block {
    let id = ids.new_block_id();
    let data = block_type.default_data(options, ids);
    Block { id, data }
}
