use crate::foundation::core::{BlendMode, Color, Frame, Id, Point, Ratio};
use crate::model::effect::Effect;
use crate::model::marker::Marker;
use crate::model::mask::Mask;
use crate::model::property::Property;
use crate::model::shape::ShapeElement;
use crate::model::style::LayerStyle;
use crate::model::text::{TextAnimator, TextDocument, TextMoreOption, TextPathOption};
use crate::model::transform::{Transform2D, Transform3D};

wire_enum! {
    /// Layer type byte at the head of every layer block.
    pub enum LayerType {
        Unknown = 0,
        Null = 1,
        Solid = 2,
        Text = 3,
        Shape = 4,
        Image = 5,
        PreCompose = 6,
        Camera = 7,
    }
    default = Unknown;
}

wire_enum! {
    pub enum TrackMatteType {
        None = 0,
        Alpha = 1,
        AlphaInverted = 2,
        Luma = 3,
        LumaInverted = 4,
    }
    default = None;
}

wire_enum! {
    /// Render cache hint for a layer.
    pub enum CachePolicy {
        Auto = 0,
        Enable = 1,
        Disable = 2,
    }
    default = Auto;
}

wire_enum! {
    /// How an image is fitted into its layer bounds.
    pub enum ScaleMode {
        None = 0,
        Stretch = 1,
        LetterBox = 2,
        Zoom = 3,
    }
    default = LetterBox;
}

/// A layer's transform: exactly one of the 2D or 3D forms.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTransform {
    TwoD(Transform2D),
    ThreeD(Transform3D),
}

impl Default for LayerTransform {
    fn default() -> Self {
        LayerTransform::TwoD(Transform2D::default())
    }
}

/// A composition layer: common fields plus a type-specific payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Layer {
    /// Unique within the owning composition.
    pub id: Id,
    pub name: String,
    /// Id of a layer in the same composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
    pub stretch: Ratio,
    pub start_time: Frame,
    /// Always at least 1 once decoded.
    pub duration: Frame,
    pub is_active: bool,
    pub auto_orientation: bool,
    pub motion_blur: bool,
    pub blend_mode: BlendMode,
    pub track_matte_type: TrackMatteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remap: Option<Property<f32>>,
    pub transform: LayerTransform,
    pub masks: Vec<Mask>,
    pub effects: Vec<Effect>,
    pub layer_styles: Vec<LayerStyle>,
    pub markers: Vec<Marker>,
    pub cache_policy: CachePolicy,
    pub content: LayerContent,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            parent: None,
            stretch: Ratio::ONE,
            start_time: 0,
            duration: 1,
            is_active: true,
            auto_orientation: false,
            motion_blur: false,
            blend_mode: BlendMode::Normal,
            track_matte_type: TrackMatteType::None,
            time_remap: None,
            transform: LayerTransform::default(),
            masks: Vec::new(),
            effects: Vec::new(),
            layer_styles: Vec::new(),
            markers: Vec::new(),
            cache_policy: CachePolicy::Auto,
            content: LayerContent::Null,
        }
    }
}

impl Layer {
    /// A layer of the given type with default fields and an empty payload.
    pub fn new(id: Id, layer_type: LayerType) -> Self {
        Self {
            id,
            content: LayerContent::empty(layer_type),
            ..Self::default()
        }
    }

    pub fn layer_type(&self) -> LayerType {
        self.content.layer_type()
    }
}

/// Type-specific layer payload.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerContent {
    /// A layer of a type this build does not know.
    Unknown,
    #[default]
    Null,
    Solid(SolidContent),
    Text(TextContent),
    Shape(ShapeContent),
    Image(ImageContent),
    PreCompose(PreComposeContent),
    Camera(CameraOption),
}

impl LayerContent {
    pub fn empty(layer_type: LayerType) -> Self {
        match layer_type {
            LayerType::Unknown => LayerContent::Unknown,
            LayerType::Null => LayerContent::Null,
            LayerType::Solid => LayerContent::Solid(SolidContent::default()),
            LayerType::Text => LayerContent::Text(TextContent::default()),
            LayerType::Shape => LayerContent::Shape(ShapeContent::default()),
            LayerType::Image => LayerContent::Image(ImageContent::default()),
            LayerType::PreCompose => LayerContent::PreCompose(PreComposeContent::default()),
            LayerType::Camera => LayerContent::Camera(CameraOption::default()),
        }
    }

    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerContent::Unknown => LayerType::Unknown,
            LayerContent::Null => LayerType::Null,
            LayerContent::Solid(_) => LayerType::Solid,
            LayerContent::Text(_) => LayerType::Text,
            LayerContent::Shape(_) => LayerType::Shape,
            LayerContent::Image(_) => LayerType::Image,
            LayerContent::PreCompose(_) => LayerType::PreCompose,
            LayerContent::Camera(_) => LayerType::Camera,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolidContent {
    pub color: Color,
    pub width: i32,
    pub height: i32,
}

impl Default for SolidContent {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 0,
            height: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub source_text: Property<TextDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_option: Option<TextPathOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_option: Option<TextMoreOption>,
    pub animators: Vec<TextAnimator>,
}

impl TextContent {
    /// The document shown at the start of the layer.
    pub fn document(&self) -> Option<&TextDocument> {
        self.source_text.value_at_start()
    }

    fn documents(&self) -> impl Iterator<Item = &TextDocument> {
        let constant = self.source_text.constant().into_iter();
        let keyframed = self
            .source_text
            .keyframes()
            .iter()
            .flat_map(|k| [&k.start_value, &k.end_value]);
        constant.chain(keyframed)
    }

    /// Whether any document carries a writing direction.
    pub fn uses_direction(&self) -> bool {
        self.documents().any(TextDocument::has_direction)
    }

    /// Whether any document carries a visible background.
    pub fn uses_background(&self) -> bool {
        self.documents().any(TextDocument::has_background)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeContent {
    pub contents: Vec<ShapeElement>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageContent {
    /// Id of an image asset of the owning file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_rule: Option<ImageFillRule>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageFillRule {
    pub scale_mode: ScaleMode,
    /// Maps layer time to image-sequence time, in composition frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remap: Option<Property<Frame>>,
}

impl ImageFillRule {
    /// A rule equal to the implicit default is not worth writing.
    pub fn is_default(&self) -> bool {
        self.scale_mode == ScaleMode::LetterBox && self.time_remap.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreComposeContent {
    /// Id of a composition of the owning file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition_id: Option<Id>,
    /// Layer time at which the referenced composition's first frame shows.
    pub composition_start_time: Frame,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraOption {
    pub zoom: Property<f32>,
    pub depth_of_field: Property<bool>,
    pub focus_distance: Property<f32>,
    pub aperture: Property<f32>,
    pub blur_level: Property<f32>,
    pub iris_rotation: Property<f32>,
    pub highlight: Property<Point>,
}

pub(crate) const DEFAULT_CAMERA_ZOOM: f32 = 1866.67;
pub(crate) const DEFAULT_FOCUS_DISTANCE: f32 = 1866.67;
pub(crate) const DEFAULT_APERTURE: f32 = 25.3;
pub(crate) const DEFAULT_BLUR_LEVEL: f32 = 1.0;

impl Default for CameraOption {
    fn default() -> Self {
        Self {
            zoom: Property::Value(DEFAULT_CAMERA_ZOOM),
            depth_of_field: Property::Value(false),
            focus_distance: Property::Value(DEFAULT_FOCUS_DISTANCE),
            aperture: Property::Value(DEFAULT_APERTURE),
            blur_level: Property::Value(DEFAULT_BLUR_LEVEL),
            iris_rotation: Property::Value(0.0),
            highlight: Property::Value(Point::ZERO),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
