//! The tag registry.
//!
//! Codes only ever grow: a feature introduced later gets a larger code, so a code doubles as the
//! minimum player level that understands it. New tags are appended before [`TagCode::MAX`].

macro_rules! tag_codes {
    ( $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)? ) => {
        /// Identifier of a tag in a tag sequence.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum TagCode {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl TagCode {
            /// Every known code in ascending order.
            pub const ALL: &'static [TagCode] = &[ $( TagCode::$variant ),+ ];

            /// Resolve a raw wire code; `None` for codes newer than this build.
            pub fn from_raw(code: u32) -> Option<Self> {
                match code {
                    $( $value => Some(TagCode::$variant), )+
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( TagCode::$variant => stringify!($variant), )+
                }
            }
        }
    };
}

tag_codes! {
    End = 0,
    FontTables = 1,
    VectorCompositionBlock = 2,
    CompositionAttributes = 3,
    ImageTables = 4,
    LayerBlock = 5,
    LayerAttributes = 6,
    SolidColor = 7,
    TextSource = 8,
    TextMoreOption = 10,
    ImageReference = 11,
    CompositionReference = 12,
    Transform2D = 13,
    MaskBlock = 14,
    ShapeGroup = 15,
    Rectangle = 16,
    Ellipse = 17,
    PolyStar = 18,
    ShapePath = 19,
    Fill = 20,
    Stroke = 21,
    GradientFill = 22,
    GradientStroke = 23,
    MergePaths = 24,
    TrimPaths = 25,
    Repeater = 26,
    RoundCorners = 27,
    Performance = 28,
    DropShadowStyle = 29,
    CachePolicy = 30,
    FileAttributes = 31,
    TimeStretchMode = 32,
    Mp4Header = 33,
    // 34 ~ 44 are reserved.
    BitmapCompositionBlock = 45,
    BitmapSequence = 46,
    ImageBytes = 47,
    /// With scale factor.
    ImageBytesV2 = 48,
    /// With transparent border stripped.
    ImageBytesV3 = 49,
    VideoCompositionBlock = 50,
    VideoSequence = 51,
    LayerAttributesV2 = 52,
    MarkerList = 53,
    ImageFillRule = 54,
    AudioBytes = 55,
    MotionTileEffect = 56,
    LevelsIndividualEffect = 57,
    CornerPinEffect = 58,
    BulgeEffect = 59,
    FastBlurEffect = 60,
    GlowEffect = 61,
    LayerAttributesV3 = 62,
    LayerAttributesExtra = 63,
    TextSourceV2 = 64,
    DropShadowStyleV2 = 65,
    DisplacementMapEffect = 66,
    ImageFillRuleV2 = 67,
    TextSourceV3 = 68,
    TextPathOption = 69,
    TextAnimator = 70,
    TextRangeSelector = 71,
    TextAnimatorPropertiesTrackingType = 72,
    TextAnimatorPropertiesTrackingAmount = 73,
    TextAnimatorPropertiesFillColor = 74,
    TextAnimatorPropertiesStrokeColor = 75,
    TextAnimatorPropertiesPosition = 76,
    TextAnimatorPropertiesScale = 77,
    TextAnimatorPropertiesRotation = 78,
    TextAnimatorPropertiesOpacity = 79,
    TextWigglySelector = 80,
    RadialBlurEffect = 81,
    MosaicEffect = 82,
    EditableIndices = 83,
    /// Mask with feather.
    MaskBlockV2 = 84,
    Transform3D = 85,
    CameraOption = 86,
}

impl TagCode {
    /// The newest code this build understands.
    pub const MAX: TagCode = TagCode::CameraOption;

    /// The code's position in the introduction order, used as a player level threshold.
    pub fn ordinal(self) -> u16 {
        self as u16
    }
}

impl std::fmt::Display for TagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.ordinal())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/tag_code.rs"]
mod tests;
