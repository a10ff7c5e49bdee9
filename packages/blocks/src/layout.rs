//! Layout presets and column reslicing.

use crate::block::Column;
use crate::common::CommonData;
use crate::error::BlockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named column-width configuration of a layout block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutPreset {
    #[serde(rename = "100")]
    Full,
    #[serde(rename = "50-50")]
    Halves,
    #[serde(rename = "66-33")]
    WideLeft,
    #[serde(rename = "33-66")]
    WideRight,
    #[serde(rename = "25-75")]
    NarrowLeft,
    #[serde(rename = "75-25")]
    NarrowRight,
    #[serde(rename = "33-33-33")]
    Thirds,
    #[serde(rename = "25-50-25")]
    WideCenter,
    #[serde(rename = "25-25-25-25")]
    Quarters,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 9] = [
        LayoutPreset::Full,
        LayoutPreset::Halves,
        LayoutPreset::WideLeft,
        LayoutPreset::WideRight,
        LayoutPreset::NarrowLeft,
        LayoutPreset::NarrowRight,
        LayoutPreset::Thirds,
        LayoutPreset::WideCenter,
        LayoutPreset::Quarters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPreset::Full => "100",
            LayoutPreset::Halves => "50-50",
            LayoutPreset::WideLeft => "66-33",
            LayoutPreset::WideRight => "33-66",
            LayoutPreset::NarrowLeft => "25-75",
            LayoutPreset::NarrowRight => "75-25",
            LayoutPreset::Thirds => "33-33-33",
            LayoutPreset::WideCenter => "25-50-25",
            LayoutPreset::Quarters => "25-25-25-25",
        }
    }

    /// Column widths in percent, left to right
    pub fn widths(&self) -> &'static [u8] {
        match self {
            LayoutPreset::Full => &[100],
            LayoutPreset::Halves => &[50, 50],
            LayoutPreset::WideLeft => &[66, 33],
            LayoutPreset::WideRight => &[33, 66],
            LayoutPreset::NarrowLeft => &[25, 75],
            LayoutPreset::NarrowRight => &[75, 25],
            LayoutPreset::Thirds => &[33, 33, 33],
            LayoutPreset::WideCenter => &[25, 50, 25],
            LayoutPreset::Quarters => &[25, 25, 25, 25],
        }
    }

    pub fn column_count(&self) -> usize {
        self.widths().len()
    }
}

impl Default for LayoutPreset {
    fn default() -> Self {
        LayoutPreset::Halves
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutPreset {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutPreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| BlockError::UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Data of a `layout` block: ordered columns of nested blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutData {
    #[serde(flatten)]
    pub common: CommonData,

    pub preset: LayoutPreset,

    pub columns: Vec<Column>,

    /// Gap between columns, px
    pub gap: u32,

    pub vertical_align: VerticalAlign,
}

impl LayoutData {
    /// Empty layout with one empty column per preset column
    pub fn with_preset(preset: LayoutPreset) -> Self {
        Self {
            common: CommonData::default(),
            preset,
            columns: vec![Column::new(); preset.column_count()],
            gap: 24,
            vertical_align: VerticalAlign::Top,
        }
    }

    /// Total number of direct children across all columns
    pub fn child_count(&self) -> usize {
        self.columns.iter().map(|column| column.len()).sum()
    }

    /// Copy of this data switched to `preset`, columns resliced to fit
    pub fn with_changed_preset(&self, preset: LayoutPreset) -> Self {
        Self {
            preset,
            columns: reslice_columns(self.columns.clone(), preset.column_count()),
            ..self.clone()
        }
    }
}

impl Default for LayoutData {
    fn default() -> Self {
        Self::with_preset(LayoutPreset::default())
    }
}

/// Fit `columns` to exactly `count` columns.
///
/// Shrinking concatenates the blocks of every overflow column onto the last
/// retained column, keeping their relative order. Growing appends empty
/// columns. Column contents are shared, not deep-copied.
pub fn reslice_columns(mut columns: Vec<Column>, count: usize) -> Vec<Column> {
    let count = count.max(1);

    if columns.len() > count {
        let overflow: Vec<Column> = columns.drain(count..).collect();
        if let Some(last) = columns.last_mut() {
            for column in overflow {
                last.extend(column);
            }
        }
    }

    while columns.len() < count {
        columns.push(Column::new());
    }

    columns
}
