use crate::foundation::core::{BlendMode, Color, OPAQUE, Opacity, PathData, Point};
use crate::model::property::Property;

wire_enum! {
    pub enum FillRule {
        NonZeroWinding = 0,
        EvenOdd = 1,
    }
    default = NonZeroWinding;
}

wire_enum! {
    pub enum LineCap {
        Butt = 0,
        Round = 1,
        Square = 2,
    }
    default = Butt;
}

wire_enum! {
    pub enum LineJoin {
        Miter = 0,
        Round = 1,
        Bevel = 2,
    }
    default = Miter;
}

wire_enum! {
    pub enum PolyStarType {
        Star = 0,
        Polygon = 1,
    }
    default = Star;
}

wire_enum! {
    pub enum GradientFillType {
        Linear = 0,
        Radial = 1,
    }
    default = Linear;
}

wire_enum! {
    pub enum MergePathsMode {
        Merge = 0,
        Add = 1,
        Subtract = 2,
        Intersect = 3,
        ExcludeIntersections = 4,
    }
    default = Add;
}

wire_enum! {
    pub enum TrimPathsType {
        Simultaneously = 0,
        Individually = 1,
    }
    default = Simultaneously;
}

wire_enum! {
    /// Whether each copy is painted below or above the previous one.
    pub enum RepeaterOrder {
        Below = 0,
        Above = 1,
    }
    default = Below;
}

wire_enum! {
    /// Paint order of a fill or stroke relative to the previous one in its group.
    pub enum CompositeOrder {
        BelowPreviousInSameGroup = 0,
        AbovePreviousInSameGroup = 1,
    }
    default = BelowPreviousInSameGroup;
}

/// One node of a shape layer's content tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeElement {
    Group(ShapeGroup),
    Rectangle(RectangleElement),
    Ellipse(EllipseElement),
    Path(ShapePathElement),
    PolyStar(PolyStarElement),
    Fill(FillElement),
    Stroke(StrokeElement),
    GradientFill(GradientFillElement),
    GradientStroke(GradientStrokeElement),
    MergePaths(MergePathsElement),
    TrimPaths(TrimPathsElement),
    Repeater(RepeaterElement),
    RoundCorners(RoundCornersElement),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeGroup {
    pub blend_mode: BlendMode,
    pub transform: ShapeTransform,
    pub elements: Vec<ShapeElement>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeTransform {
    pub anchor_point: Property<Point>,
    pub position: Property<Point>,
    pub scale: Property<Point>,
    pub skew: Property<f32>,
    pub skew_axis: Property<f32>,
    pub rotation: Property<f32>,
    pub opacity: Property<Opacity>,
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self {
            anchor_point: Property::Value(Point::ZERO),
            position: Property::Value(Point::ZERO),
            scale: Property::Value(Point::new(1.0, 1.0)),
            skew: Property::Value(0.0),
            skew_axis: Property::Value(0.0),
            rotation: Property::Value(0.0),
            opacity: Property::Value(OPAQUE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RectangleElement {
    pub reversed: bool,
    pub size: Property<Point>,
    pub position: Property<Point>,
    pub roundness: Property<f32>,
}

impl Default for RectangleElement {
    fn default() -> Self {
        Self {
            reversed: false,
            size: Property::Value(Point::new(100.0, 100.0)),
            position: Property::Value(Point::ZERO),
            roundness: Property::Value(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EllipseElement {
    pub reversed: bool,
    pub size: Property<Point>,
    pub position: Property<Point>,
}

impl Default for EllipseElement {
    fn default() -> Self {
        Self {
            reversed: false,
            size: Property::Value(Point::new(100.0, 100.0)),
            position: Property::Value(Point::ZERO),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapePathElement {
    pub path: Property<PathData>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FillElement {
    pub blend_mode: BlendMode,
    pub composite: CompositeOrder,
    pub fill_rule: FillRule,
    pub color: Property<Color>,
    pub opacity: Property<Opacity>,
}

impl Default for FillElement {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            composite: CompositeOrder::BelowPreviousInSameGroup,
            fill_rule: FillRule::NonZeroWinding,
            color: Property::Value(Color::RED),
            opacity: Property::Value(OPAQUE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeElement {
    pub blend_mode: BlendMode,
    pub composite: CompositeOrder,
    pub color: Property<Color>,
    pub opacity: Property<Opacity>,
    pub stroke_width: Property<f32>,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: Property<f32>,
    pub dash_offset: Property<f32>,
    /// Alternating dash and gap lengths.
    pub dashes: Vec<Property<f32>>,
}

impl Default for StrokeElement {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            composite: CompositeOrder::BelowPreviousInSameGroup,
            color: Property::Value(Color::WHITE),
            opacity: Property::Value(OPAQUE),
            stroke_width: Property::Value(2.0),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: Property::Value(4.0),
            dash_offset: Property::Value(0.0),
            dashes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolyStarElement {
    pub reversed: bool,
    pub poly_type: PolyStarType,
    pub points: Property<f32>,
    pub position: Property<Point>,
    pub rotation: Property<f32>,
    pub inner_radius: Property<f32>,
    pub outer_radius: Property<f32>,
    /// Percentages in `0.0..=1.0`.
    pub inner_roundness: Property<f32>,
    pub outer_roundness: Property<f32>,
}

impl Default for PolyStarElement {
    fn default() -> Self {
        Self {
            reversed: false,
            poly_type: PolyStarType::Star,
            points: Property::Value(5.0),
            position: Property::Value(Point::ZERO),
            rotation: Property::Value(0.0),
            inner_radius: Property::Value(50.0),
            outer_radius: Property::Value(100.0),
            inner_roundness: Property::Value(0.0),
            outer_roundness: Property::Value(0.0),
        }
    }
}

/// Opacity at one point of a gradient. `position` and `midpoint` are in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlphaStop {
    pub position: f32,
    pub midpoint: f32,
    pub opacity: Opacity,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub midpoint: f32,
    pub color: Color,
}

/// Gradient ramp. Stops are kept sorted by position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientColor {
    pub alpha_stops: Vec<AlphaStop>,
    pub color_stops: Vec<ColorStop>,
}

impl Default for GradientColor {
    fn default() -> Self {
        Self {
            alpha_stops: vec![
                AlphaStop {
                    position: 0.0,
                    midpoint: 0.5,
                    opacity: OPAQUE,
                },
                AlphaStop {
                    position: 1.0,
                    midpoint: 0.5,
                    opacity: OPAQUE,
                },
            ],
            color_stops: vec![
                ColorStop {
                    position: 0.0,
                    midpoint: 0.5,
                    color: Color::WHITE,
                },
                ColorStop {
                    position: 1.0,
                    midpoint: 0.5,
                    color: Color::BLACK,
                },
            ],
        }
    }
}

impl GradientColor {
    pub fn sort_stops(&mut self) {
        self.alpha_stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        self.color_stops.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientFillElement {
    pub blend_mode: BlendMode,
    pub composite: CompositeOrder,
    pub fill_rule: FillRule,
    pub fill_type: GradientFillType,
    pub opacity: Property<Opacity>,
    pub start_point: Property<Point>,
    pub end_point: Property<Point>,
    pub colors: Property<GradientColor>,
}

impl Default for GradientFillElement {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            composite: CompositeOrder::BelowPreviousInSameGroup,
            fill_rule: FillRule::NonZeroWinding,
            fill_type: GradientFillType::Linear,
            opacity: Property::Value(OPAQUE),
            start_point: Property::Value(Point::ZERO),
            end_point: Property::Value(Point::new(100.0, 0.0)),
            colors: Property::Value(GradientColor::default()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientStrokeElement {
    pub blend_mode: BlendMode,
    pub composite: CompositeOrder,
    pub fill_type: GradientFillType,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: Property<f32>,
    pub start_point: Property<Point>,
    pub end_point: Property<Point>,
    pub colors: Property<GradientColor>,
    pub opacity: Property<Opacity>,
    pub stroke_width: Property<f32>,
    pub dash_offset: Property<f32>,
    pub dashes: Vec<Property<f32>>,
}

impl Default for GradientStrokeElement {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            composite: CompositeOrder::BelowPreviousInSameGroup,
            fill_type: GradientFillType::Linear,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: Property::Value(4.0),
            start_point: Property::Value(Point::ZERO),
            end_point: Property::Value(Point::new(100.0, 0.0)),
            colors: Property::Value(GradientColor::default()),
            opacity: Property::Value(OPAQUE),
            stroke_width: Property::Value(2.0),
            dash_offset: Property::Value(0.0),
            dashes: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MergePathsElement {
    pub mode: MergePathsMode,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrimPathsElement {
    /// Percentages in `0.0..=1.0`.
    pub start: Property<f32>,
    pub end: Property<f32>,
    /// Degrees.
    pub offset: Property<f32>,
    pub trim_type: TrimPathsType,
}

impl Default for TrimPathsElement {
    fn default() -> Self {
        Self {
            start: Property::Value(0.0),
            end: Property::Value(1.0),
            offset: Property::Value(0.0),
            trim_type: TrimPathsType::Simultaneously,
        }
    }
}

/// Offset applied cumulatively to each copy of a repeater.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RepeaterTransform {
    pub anchor_point: Property<Point>,
    pub position: Property<Point>,
    pub scale: Property<Point>,
    pub rotation: Property<f32>,
    pub start_opacity: Property<Opacity>,
    pub end_opacity: Property<Opacity>,
}

impl Default for RepeaterTransform {
    fn default() -> Self {
        Self {
            anchor_point: Property::Value(Point::ZERO),
            position: Property::Value(Point::new(100.0, 0.0)),
            scale: Property::Value(Point::new(1.0, 1.0)),
            rotation: Property::Value(0.0),
            start_opacity: Property::Value(OPAQUE),
            end_opacity: Property::Value(OPAQUE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RepeaterElement {
    pub copies: Property<f32>,
    pub offset: Property<f32>,
    pub composite: RepeaterOrder,
    pub transform: RepeaterTransform,
}

impl Default for RepeaterElement {
    fn default() -> Self {
        Self {
            copies: Property::Value(3.0),
            offset: Property::Value(0.0),
            composite: RepeaterOrder::Below,
            transform: RepeaterTransform::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoundCornersElement {
    pub radius: Property<f32>,
}

impl Default for RoundCornersElement {
    fn default() -> Self {
        Self {
            radius: Property::Value(10.0),
        }
    }
}
