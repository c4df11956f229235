use crate::foundation::core::{BlendMode, Color, Opacity};
use crate::model::property::Property;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerStyle {
    DropShadow(DropShadowStyle),
}

/// Drop shadow, drawn below the layer content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DropShadowStyle {
    pub blend_mode: Property<BlendMode>,
    pub color: Property<Color>,
    pub opacity: Property<Opacity>,
    /// Degrees.
    pub angle: Property<f32>,
    pub distance: Property<f32>,
    pub size: Property<f32>,
    /// Fraction in `0..=1`.
    pub spread: Property<f32>,
}

pub(crate) const DEFAULT_SHADOW_OPACITY: Opacity = 191;
pub(crate) const DEFAULT_SHADOW_ANGLE: f32 = 120.0;
pub(crate) const DEFAULT_SHADOW_DISTANCE: f32 = 5.0;
pub(crate) const DEFAULT_SHADOW_SIZE: f32 = 5.0;

impl Default for DropShadowStyle {
    fn default() -> Self {
        Self {
            blend_mode: Property::Value(BlendMode::Multiply),
            color: Property::Value(Color::BLACK),
            opacity: Property::Value(DEFAULT_SHADOW_OPACITY),
            angle: Property::Value(DEFAULT_SHADOW_ANGLE),
            distance: Property::Value(DEFAULT_SHADOW_DISTANCE),
            size: Property::Value(DEFAULT_SHADOW_SIZE),
            spread: Property::Value(0.0),
        }
    }
}

impl DropShadowStyle {
    /// Whether the size or spread differ from what the oldest shadow tag implies.
    pub fn needs_extended_tag(&self) -> bool {
        !self.size.is_constant(&DEFAULT_SHADOW_SIZE) || !self.spread.is_constant(&0.0)
    }
}
