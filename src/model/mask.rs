use crate::foundation::core::{OPAQUE, Opacity, PathData, Point};
use crate::model::property::Property;

wire_enum! {
    /// How a mask combines with the masks above it.
    pub enum MaskMode {
        None = 0,
        Add = 1,
        Subtract = 2,
        Intersect = 3,
        Lighten = 4,
        Darken = 5,
        Difference = 6,
        /// Real addition rather than screen.
        Accum = 7,
    }
    default = Add;
}

/// A layer mask. Masks have no identity of their own; they are addressed by their index in
/// [`crate::Layer::masks`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Mask {
    pub inverted: bool,
    pub mode: MaskMode,
    pub path: Property<PathData>,
    pub opacity: Property<Opacity>,
    pub expansion: Property<f32>,
    /// Only present when the mask was decoded from, or authored with, feather data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feather: Option<Property<Point>>,
}

impl Default for Mask {
    fn default() -> Self {
        Self {
            inverted: false,
            mode: MaskMode::Add,
            path: Property::Value(PathData::new()),
            opacity: Property::Value(OPAQUE),
            expansion: Property::Value(0.0),
            feather: None,
        }
    }
}

impl Mask {
    /// True when the feather would change rendering: animated, or a non-zero constant.
    pub fn has_feather(&self) -> bool {
        self.feather
            .as_ref()
            .is_some_and(|f| f.is_animatable() || !f.is_constant(&Point::ZERO))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/mask.rs"]
mod tests;
