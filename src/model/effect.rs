use crate::model::property::Property;

wire_enum! {
    pub enum BlurDimensions {
        All = 0,
        Horizontal = 1,
        Vertical = 2,
    }
    default = All;
}

/// Layer effects the codec understands. Effects of other kinds are skipped when decoding.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    FastBlur(FastBlurEffect),
    Glow(GlowEffect),
    Mosaic(MosaicEffect),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FastBlurEffect {
    pub blurriness: Property<f32>,
    pub blur_dimensions: Property<BlurDimensions>,
    pub repeat_edge_pixels: Property<bool>,
}

impl Default for FastBlurEffect {
    fn default() -> Self {
        Self {
            blurriness: Property::Value(0.0),
            blur_dimensions: Property::Value(BlurDimensions::All),
            repeat_edge_pixels: Property::Value(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlowEffect {
    /// Fraction in `0..=1`.
    pub glow_threshold: Property<f32>,
    pub glow_radius: Property<f32>,
    pub glow_intensity: Property<f32>,
}

impl Default for GlowEffect {
    fn default() -> Self {
        Self {
            glow_threshold: Property::Value(1.0),
            glow_radius: Property::Value(0.0),
            glow_intensity: Property::Value(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MosaicEffect {
    pub horizontal_blocks: Property<u16>,
    pub vertical_blocks: Property<u16>,
    pub sharp_colors: Property<bool>,
}

impl Default for MosaicEffect {
    fn default() -> Self {
        Self {
            horizontal_blocks: Property::Value(10),
            vertical_blocks: Property::Value(10),
            sharp_colors: Property::Value(true),
        }
    }
}
