//! Fields shared by every block type: spacing, animation, anchor and theme.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Upper bound for top/bottom padding, in px
pub const MAX_PADDING: u32 = 200;

/// Common optional fields carried by every block's data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonData {
    pub styles: Spacing,

    pub animation: Animation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,

    #[serde(rename = "block_theme")]
    pub block_theme: BlockTheme,
}

/// Vertical spacing around a block, clamped to `[0, MAX_PADDING]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    #[serde(deserialize_with = "deserialize_padding")]
    pub padding_top: u32,

    #[serde(deserialize_with = "deserialize_padding")]
    pub padding_bottom: u32,
}

impl Spacing {
    pub fn new(padding_top: u32, padding_bottom: u32) -> Self {
        Self {
            padding_top: padding_top.min(MAX_PADDING),
            padding_bottom: padding_bottom.min(MAX_PADDING),
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(40, 40)
    }
}

fn deserialize_padding<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, MAX_PADDING as f64) as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    #[default]
    None,
    FadeIn,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
}

/// Entrance animation; durations are in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    #[serde(rename = "type")]
    pub kind: AnimationKind,

    #[serde(deserialize_with = "deserialize_seconds")]
    pub duration: f32,

    #[serde(deserialize_with = "deserialize_seconds")]
    pub delay: f32,

    pub repeat: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::None,
            duration: 0.6,
            delay: 0.0,
            repeat: false,
        }
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f32::deserialize(deserializer)?;
    Ok(if raw.is_finite() { raw.max(0.0) } else { 0.0 })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTheme {
    #[default]
    Auto,
    Light,
    Dark,
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_-]").expect("static regex"))
}

fn hyphen_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").expect("static regex"))
}

/// Reduce free text to an anchor slug.
///
/// Lowercases, turns whitespace runs into `-`, strips anything outside
/// `[a-z0-9_-]`, collapses repeated hyphens and trims them from the ends.
pub fn sanitize_anchor(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let hyphenated = whitespace_re().replace_all(&lowered, "-");
    let stripped = disallowed_re().replace_all(&hyphenated, "");
    let collapsed = hyphen_run_re().replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// True when `anchor` is already in sanitized form
pub fn is_sanitized_anchor(anchor: &str) -> bool {
    !anchor.is_empty() && sanitize_anchor(anchor) == anchor
}
