use crate::foundation::core::{Color, Opacity, Point};
use crate::model::property::Property;

wire_enum! {
    pub enum Justification {
        LeftJustify = 0,
        CenterJustify = 1,
        RightJustify = 2,
        FullJustifyLastLineLeft = 3,
        FullJustifyLastLineRight = 4,
        FullJustifyLastLineCenter = 5,
        FullJustifyLastLineFull = 6,
    }
    default = LeftJustify;
}

wire_enum! {
    pub enum TextDirection {
        Default = 0,
        Horizontal = 1,
        Vertical = 2,
    }
    default = Default;
}

wire_enum! {
    pub enum AnchorPointGrouping {
        Character = 0,
        Word = 1,
        Line = 2,
        All = 3,
    }
    default = Character;
}

wire_enum! {
    pub enum TrackingType {
        BeforeAndAfter = 0,
        Before = 1,
        After = 2,
    }
    default = BeforeAndAfter;
}

wire_enum! {
    pub enum SelectorUnits {
        Percentage = 0,
        Index = 1,
    }
    default = Percentage;
}

wire_enum! {
    pub enum SelectorBasedOn {
        Characters = 0,
        CharactersExcludingSpaces = 1,
        Words = 2,
        Lines = 3,
    }
    default = Characters;
}

wire_enum! {
    pub enum SelectorMode {
        None = 0,
        Add = 1,
        Subtract = 2,
        Intersect = 3,
        Min = 4,
        Max = 5,
        Difference = 6,
    }
    default = Add;
}

wire_enum! {
    pub enum SelectorShape {
        Square = 0,
        RampUp = 1,
        RampDown = 2,
        Triangle = 3,
        Round = 4,
        Smooth = 5,
    }
    default = Square;
}

/// Styled text of a text layer at one point in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextDocument {
    pub text: String,
    pub apply_fill: bool,
    pub apply_stroke: bool,
    pub baseline_shift: f32,
    /// Paragraph text laid out inside `box_text_pos`/`box_text_size`.
    pub box_text: bool,
    pub box_text_pos: Point,
    pub box_text_size: Point,
    pub first_baseline: f32,
    pub faux_bold: bool,
    pub faux_italic: bool,
    pub fill_color: Color,
    pub font_family: String,
    pub font_style: String,
    pub font_size: f32,
    pub stroke_color: Color,
    pub stroke_over_fill: bool,
    pub stroke_width: f32,
    pub justification: Justification,
    pub leading: f32,
    pub tracking: f32,
    pub background_color: Color,
    pub background_alpha: Opacity,
    pub direction: TextDirection,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self {
            text: String::new(),
            apply_fill: true,
            apply_stroke: false,
            baseline_shift: 0.0,
            box_text: false,
            box_text_pos: Point::ZERO,
            box_text_size: Point::ZERO,
            first_baseline: 0.0,
            faux_bold: false,
            faux_italic: false,
            fill_color: Color::BLACK,
            font_family: String::new(),
            font_style: String::new(),
            font_size: 24.0,
            stroke_color: Color::BLACK,
            stroke_over_fill: true,
            stroke_width: 1.0,
            justification: Justification::LeftJustify,
            leading: 0.0,
            tracking: 0.0,
            background_color: Color::WHITE,
            background_alpha: 0,
            direction: TextDirection::Default,
        }
    }
}

impl TextDocument {
    pub fn has_background(&self) -> bool {
        self.background_alpha != 0
    }

    pub fn has_direction(&self) -> bool {
        self.direction != TextDirection::Default
    }
}

/// Lays text along one of the layer's masks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextPathOption {
    /// Index into the owning layer's masks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_mask: Option<u32>,
    pub reversed_path: Property<bool>,
    pub perpendicular_to_path: Property<bool>,
    pub force_alignment: Property<bool>,
    pub first_margin: Property<f32>,
    pub last_margin: Property<f32>,
}

impl Default for TextPathOption {
    fn default() -> Self {
        Self {
            path_mask: None,
            reversed_path: Property::Value(false),
            perpendicular_to_path: Property::Value(true),
            force_alignment: Property::Value(false),
            first_margin: Property::Value(0.0),
            last_margin: Property::Value(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextMoreOption {
    pub anchor_point_grouping: AnchorPointGrouping,
    /// Percentages of the grouping box.
    pub grouping_alignment: Property<Point>,
}

impl Default for TextMoreOption {
    fn default() -> Self {
        Self {
            anchor_point_grouping: AnchorPointGrouping::Character,
            grouping_alignment: Property::Value(Point::ZERO),
        }
    }
}

/// A set of selectors plus the properties they drive.
///
/// Absent properties are not animated by this animator.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextAnimator {
    pub selectors: Vec<TextSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Property<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Property<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_type: Option<Property<TrackingType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_amount: Option<Property<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Property<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Property<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Property<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Property<Opacity>>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextSelector {
    Range(TextRangeSelector),
    Wiggly(TextWigglySelector),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextRangeSelector {
    pub start: Property<f32>,
    pub end: Property<f32>,
    pub offset: Property<f32>,
    pub units: SelectorUnits,
    pub based_on: SelectorBasedOn,
    pub mode: Property<SelectorMode>,
    pub amount: Property<f32>,
    pub shape: SelectorShape,
    pub smoothness: Property<f32>,
    pub ease_high: Property<f32>,
    pub ease_low: Property<f32>,
    pub randomize_order: bool,
    pub random_seed: Property<u16>,
}

impl Default for TextRangeSelector {
    fn default() -> Self {
        Self {
            start: Property::Value(0.0),
            end: Property::Value(1.0),
            offset: Property::Value(0.0),
            units: SelectorUnits::Percentage,
            based_on: SelectorBasedOn::Characters,
            mode: Property::Value(SelectorMode::Add),
            amount: Property::Value(1.0),
            shape: SelectorShape::Square,
            smoothness: Property::Value(1.0),
            ease_high: Property::Value(0.0),
            ease_low: Property::Value(0.0),
            randomize_order: false,
            random_seed: Property::Value(0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextWigglySelector {
    pub mode: Property<SelectorMode>,
    pub max_amount: Property<f32>,
    pub min_amount: Property<f32>,
    pub based_on: SelectorBasedOn,
    pub wiggles_per_second: Property<f32>,
    pub correlation: Property<f32>,
    pub temporal_phase: Property<f32>,
    pub spatial_phase: Property<f32>,
    pub lock_dimensions: Property<bool>,
    pub random_seed: Property<u16>,
}

impl Default for TextWigglySelector {
    fn default() -> Self {
        Self {
            mode: Property::Value(SelectorMode::Intersect),
            max_amount: Property::Value(1.0),
            min_amount: Property::Value(-1.0),
            based_on: SelectorBasedOn::Characters,
            wiggles_per_second: Property::Value(2.0),
            correlation: Property::Value(0.5),
            temporal_phase: Property::Value(0.0),
            spatial_phase: Property::Value(0.0),
            lock_dimensions: Property::Value(false),
            random_seed: Property::Value(0),
        }
    }
}
