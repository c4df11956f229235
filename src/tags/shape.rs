use crate::codec::attributes::{AttributeKind as K, AttributeValue, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::{read_tags, write_end_tag, write_tag_bytes};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{BlendMode, Color, OPAQUE, PathData, Point};
use crate::foundation::error::{PagError, PagResult};
use crate::model::property::Property;
use crate::model::shape::{
    AlphaStop, ColorStop, CompositeOrder, EllipseElement, FillElement, FillRule, GradientColor,
    GradientFillElement, GradientFillType, GradientStrokeElement, LineCap, LineJoin,
    MergePathsElement, MergePathsMode, PolyStarElement, PolyStarType, RectangleElement,
    RepeaterElement, RepeaterOrder, RepeaterTransform, RoundCornersElement, ShapeElement,
    ShapeGroup, ShapePathElement, ShapeTransform, StrokeElement, TrimPathsElement, TrimPathsType,
};
use crate::tags::write_block;

const GROUP: &[K] = &[
    K::Value,
    K::SpatialProperty,
    K::SpatialProperty,
    K::MultiDimensionProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];
const RECTANGLE: &[K] = &[
    K::BitFlag,
    K::MultiDimensionProperty,
    K::SpatialProperty,
    K::SimpleProperty,
];
const ELLIPSE: &[K] = &[K::BitFlag, K::MultiDimensionProperty, K::SpatialProperty];
const SHAPE_PATH: &[K] = &[K::SimpleProperty];
const FILL: &[K] = &[
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
];
const STROKE: &[K] = &[
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

const POLY_STAR: &[K] = &[
    K::BitFlag,
    K::Value,
    K::SimpleProperty,
    K::SpatialProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];
const GRADIENT_FILL: &[K] = &[
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::SpatialProperty,
    K::SpatialProperty,
    K::SimpleProperty,
];
const GRADIENT_STROKE: &[K] = &[
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::SpatialProperty,
    K::SpatialProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];
const MERGE_PATHS: &[K] = &[K::Value];
const TRIM_PATHS: &[K] = &[
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::Value,
];
const REPEATER: &[K] = &[
    K::SimpleProperty,
    K::SimpleProperty,
    K::Value,
    K::SpatialProperty,
    K::SpatialProperty,
    K::MultiDimensionProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];
const ROUND_CORNERS: &[K] = &[K::SimpleProperty];

const UNIT_SCALE: Point = Point::new(1.0, 1.0);
const DEFAULT_SIZE: Point = Point::new(100.0, 100.0);
const GRADIENT_END: Point = Point::new(100.0, 0.0);
const REPEATER_OFFSET: Point = Point::new(100.0, 0.0);

/// Gradient stop positions are stored as multiples of this step.
const GRADIENT_PRECISION: f32 = 1.0 / 32768.0;

fn read_gradient_fraction(stream: &mut DecodeStream<'_>) -> PagResult<f32> {
    Ok(f32::from(stream.read_u16()?) * GRADIENT_PRECISION)
}

fn write_gradient_fraction(stream: &mut EncodeStream, value: f32) {
    let steps = (value / GRADIENT_PRECISION).round().clamp(0.0, f32::from(u16::MAX));
    stream.write_u16(steps as u16);
}

/// Alpha and color stop counts, then each stop's position, midpoint and opacity or color.
impl AttributeValue for GradientColor {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        let alpha_count = stream.read_encoded_u32()? as usize;
        let color_count = stream.read_encoded_u32()? as usize;
        // an alpha stop takes 5 bytes, a color stop 7
        if alpha_count * 5 + color_count * 7 > stream.bytes_available() {
            return Err(PagError::corrupt(format!(
                "gradient claims {alpha_count} alpha and {color_count} color stops"
            )));
        }
        let mut gradient = GradientColor {
            alpha_stops: Vec::with_capacity(alpha_count),
            color_stops: Vec::with_capacity(color_count),
        };
        for _ in 0..alpha_count {
            gradient.alpha_stops.push(AlphaStop {
                position: read_gradient_fraction(stream)?,
                midpoint: read_gradient_fraction(stream)?,
                opacity: stream.read_u8()?,
            });
        }
        for _ in 0..color_count {
            gradient.color_stops.push(ColorStop {
                position: read_gradient_fraction(stream)?,
                midpoint: read_gradient_fraction(stream)?,
                color: Color::read_value(stream)?,
            });
        }
        gradient.sort_stops();
        Ok(gradient)
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_u32(self.alpha_stops.len() as u32);
        stream.write_encoded_u32(self.color_stops.len() as u32);
        for stop in &self.alpha_stops {
            write_gradient_fraction(stream, stop.position);
            write_gradient_fraction(stream, stop.midpoint);
            stream.write_u8(stop.opacity);
        }
        for stop in &self.color_stops {
            write_gradient_fraction(stream, stop.position);
            write_gradient_fraction(stream, stop.midpoint);
            stop.color.write_value(stream);
        }
    }
}

/// Decode a shape content tag; `None` when `code` is not a shape element.
///
/// Groups recurse into their nested tag sequence, skipping tags they do not know.
pub(crate) fn read_shape(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
) -> PagResult<Option<ShapeElement>> {
    let element = match code {
        TagCode::ShapeGroup => ShapeElement::Group(read_group(stream)?),
        TagCode::Rectangle => {
            let mut r = BlockReader::new(stream, RECTANGLE)?;
            ShapeElement::Rectangle(RectangleElement {
                reversed: r.bit_flag()?,
                size: r.property(DEFAULT_SIZE)?,
                position: r.property(Point::ZERO)?,
                roundness: r.property(0.0)?,
            })
        }
        TagCode::Ellipse => {
            let mut r = BlockReader::new(stream, ELLIPSE)?;
            ShapeElement::Ellipse(EllipseElement {
                reversed: r.bit_flag()?,
                size: r.property(DEFAULT_SIZE)?,
                position: r.property(Point::ZERO)?,
            })
        }
        TagCode::ShapePath => {
            let mut r = BlockReader::new(stream, SHAPE_PATH)?;
            ShapeElement::Path(ShapePathElement {
                path: r.property(PathData::new())?,
            })
        }
        TagCode::Fill => {
            let mut r = BlockReader::new(stream, FILL)?;
            ShapeElement::Fill(FillElement {
                blend_mode: r.value(BlendMode::Normal)?,
                composite: r.value(CompositeOrder::BelowPreviousInSameGroup)?,
                fill_rule: r.value(FillRule::NonZeroWinding)?,
                color: r.property(Color::RED)?,
                opacity: r.property(OPAQUE)?,
            })
        }
        TagCode::PolyStar => {
            let mut r = BlockReader::new(stream, POLY_STAR)?;
            ShapeElement::PolyStar(PolyStarElement {
                reversed: r.bit_flag()?,
                poly_type: r.value(PolyStarType::Star)?,
                points: r.property(5.0)?,
                position: r.property(Point::ZERO)?,
                rotation: r.property(0.0)?,
                inner_radius: r.property(50.0)?,
                outer_radius: r.property(100.0)?,
                inner_roundness: r.property(0.0)?,
                outer_roundness: r.property(0.0)?,
            })
        }
        TagCode::Stroke => ShapeElement::Stroke(read_stroke(stream)?),
        TagCode::GradientFill => {
            let mut r = BlockReader::new(stream, GRADIENT_FILL)?;
            ShapeElement::GradientFill(GradientFillElement {
                blend_mode: r.value(BlendMode::Normal)?,
                composite: r.value(CompositeOrder::BelowPreviousInSameGroup)?,
                fill_rule: r.value(FillRule::NonZeroWinding)?,
                fill_type: r.value(GradientFillType::Linear)?,
                opacity: r.property(OPAQUE)?,
                start_point: r.property(Point::ZERO)?,
                end_point: r.property(GRADIENT_END)?,
                colors: r.property(GradientColor::default())?,
            })
        }
        TagCode::GradientStroke => ShapeElement::GradientStroke(read_gradient_stroke(stream)?),
        TagCode::MergePaths => {
            let mut r = BlockReader::new(stream, MERGE_PATHS)?;
            ShapeElement::MergePaths(MergePathsElement {
                mode: r.value(MergePathsMode::Add)?,
            })
        }
        TagCode::TrimPaths => {
            let mut r = BlockReader::new(stream, TRIM_PATHS)?;
            ShapeElement::TrimPaths(TrimPathsElement {
                start: r.property(0.0)?,
                end: r.property(1.0)?,
                offset: r.property(0.0)?,
                trim_type: r.value(TrimPathsType::Simultaneously)?,
            })
        }
        TagCode::Repeater => {
            let mut r = BlockReader::new(stream, REPEATER)?;
            ShapeElement::Repeater(RepeaterElement {
                copies: r.property(3.0)?,
                offset: r.property(0.0)?,
                composite: r.value(RepeaterOrder::Below)?,
                transform: RepeaterTransform {
                    anchor_point: r.property(Point::ZERO)?,
                    position: r.property(REPEATER_OFFSET)?,
                    scale: r.property(UNIT_SCALE)?,
                    rotation: r.property(0.0)?,
                    start_opacity: r.property(OPAQUE)?,
                    end_opacity: r.property(OPAQUE)?,
                },
            })
        }
        TagCode::RoundCorners => {
            let mut r = BlockReader::new(stream, ROUND_CORNERS)?;
            ShapeElement::RoundCorners(RoundCornersElement {
                radius: r.property(10.0)?,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(element))
}

fn read_group(stream: &mut DecodeStream<'_>) -> PagResult<ShapeGroup> {
    let mut r = BlockReader::new(stream, GROUP)?;
    let blend_mode = r.value(BlendMode::Normal)?;
    let transform = ShapeTransform {
        anchor_point: r.property(Point::ZERO)?,
        position: r.property(Point::ZERO)?,
        scale: r.property(UNIT_SCALE)?,
        skew: r.property(0.0)?,
        skew_axis: r.property(0.0)?,
        rotation: r.property(0.0)?,
        opacity: r.property(OPAQUE)?,
    };
    let mut elements = Vec::new();
    read_tags(stream, |code, payload| {
        let element = read_shape(payload, code)?;
        let claimed = element.is_some();
        elements.extend(element);
        Ok(claimed)
    })?;
    Ok(ShapeGroup {
        blend_mode,
        transform,
        elements,
    })
}

fn read_stroke(stream: &mut DecodeStream<'_>) -> PagResult<StrokeElement> {
    let mut r = BlockReader::new(stream, STROKE)?;
    let stroke = StrokeElement {
        blend_mode: r.value(BlendMode::Normal)?,
        composite: r.value(CompositeOrder::BelowPreviousInSameGroup)?,
        line_cap: r.value(LineCap::Butt)?,
        line_join: r.value(LineJoin::Miter)?,
        miter_limit: r.property(4.0)?,
        color: r.property(Color::WHITE)?,
        opacity: r.property(OPAQUE)?,
        stroke_width: r.property(2.0)?,
        dash_offset: r.property(0.0)?,
        dashes: read_dashes(stream)?,
    };
    Ok(stroke)
}

fn read_gradient_stroke(stream: &mut DecodeStream<'_>) -> PagResult<GradientStrokeElement> {
    let mut r = BlockReader::new(stream, GRADIENT_STROKE)?;
    let stroke = GradientStrokeElement {
        blend_mode: r.value(BlendMode::Normal)?,
        composite: r.value(CompositeOrder::BelowPreviousInSameGroup)?,
        fill_type: r.value(GradientFillType::Linear)?,
        line_cap: r.value(LineCap::Butt)?,
        line_join: r.value(LineJoin::Miter)?,
        miter_limit: r.property(4.0)?,
        start_point: r.property(Point::ZERO)?,
        end_point: r.property(GRADIENT_END)?,
        colors: r.property(GradientColor::default())?,
        opacity: r.property(OPAQUE)?,
        stroke_width: r.property(2.0)?,
        dash_offset: r.property(0.0)?,
        dashes: read_dashes(stream)?,
    };
    Ok(stroke)
}

/// Dash count, then a block holding that many dash properties.
fn read_dashes(stream: &mut DecodeStream<'_>) -> PagResult<Vec<Property<f32>>> {
    let count = stream.read_encoded_u32()? as usize;
    if count == 0 {
        return Ok(Vec::new());
    }
    // one flag bit per dash at the very least
    if count > stream.bytes_available() * 8 {
        return Err(PagError::corrupt(format!("dash count {count} exceeds payload")));
    }
    let kinds = vec![K::SimpleProperty; count];
    let mut r = BlockReader::new(stream, &kinds)?;
    let mut dashes = Vec::with_capacity(count);
    for _ in 0..count {
        dashes.push(r.property(0.0)?);
    }
    Ok(dashes)
}

/// Append one tag per element, in order. Elements the gate rejects are left out.
pub(crate) fn write_shapes(
    stream: &mut EncodeStream,
    elements: &[ShapeElement],
    gate: &CompatibilityGate,
) {
    for element in elements {
        match element {
            ShapeElement::Group(group) => write_group(stream, group, gate),
            ShapeElement::Rectangle(rect) => {
                let mut w = BlockWriter::new();
                w.bit_flag(rect.reversed);
                w.property(K::MultiDimensionProperty, &rect.size, &DEFAULT_SIZE);
                w.property(K::SpatialProperty, &rect.position, &Point::ZERO);
                w.property(K::SimpleProperty, &rect.roundness, &0.0);
                write_gated(stream, TagCode::Rectangle, w, gate);
            }
            ShapeElement::Ellipse(ellipse) => {
                let mut w = BlockWriter::new();
                w.bit_flag(ellipse.reversed);
                w.property(K::MultiDimensionProperty, &ellipse.size, &DEFAULT_SIZE);
                w.property(K::SpatialProperty, &ellipse.position, &Point::ZERO);
                write_gated(stream, TagCode::Ellipse, w, gate);
            }
            ShapeElement::Path(path) => {
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &path.path, &PathData::new());
                write_gated(stream, TagCode::ShapePath, w, gate);
            }
            ShapeElement::Fill(fill) => {
                let mut w = BlockWriter::new();
                w.value(&fill.blend_mode, &BlendMode::Normal);
                w.value(&fill.composite, &CompositeOrder::BelowPreviousInSameGroup);
                w.value(&fill.fill_rule, &FillRule::NonZeroWinding);
                w.property(K::SimpleProperty, &fill.color, &Color::RED);
                w.property(K::SimpleProperty, &fill.opacity, &OPAQUE);
                write_gated(stream, TagCode::Fill, w, gate);
            }
            ShapeElement::PolyStar(star) => {
                let mut w = BlockWriter::new();
                w.bit_flag(star.reversed);
                w.value(&star.poly_type, &PolyStarType::Star);
                w.property(K::SimpleProperty, &star.points, &5.0);
                w.property(K::SpatialProperty, &star.position, &Point::ZERO);
                w.property(K::SimpleProperty, &star.rotation, &0.0);
                w.property(K::SimpleProperty, &star.inner_radius, &50.0);
                w.property(K::SimpleProperty, &star.outer_radius, &100.0);
                w.property(K::SimpleProperty, &star.inner_roundness, &0.0);
                w.property(K::SimpleProperty, &star.outer_roundness, &0.0);
                write_gated(stream, TagCode::PolyStar, w, gate);
            }
            ShapeElement::Stroke(stroke) => write_stroke(stream, stroke, gate),
            ShapeElement::GradientFill(fill) => {
                let mut w = BlockWriter::new();
                w.value(&fill.blend_mode, &BlendMode::Normal);
                w.value(&fill.composite, &CompositeOrder::BelowPreviousInSameGroup);
                w.value(&fill.fill_rule, &FillRule::NonZeroWinding);
                w.value(&fill.fill_type, &GradientFillType::Linear);
                w.property(K::SimpleProperty, &fill.opacity, &OPAQUE);
                w.property(K::SpatialProperty, &fill.start_point, &Point::ZERO);
                w.property(K::SpatialProperty, &fill.end_point, &GRADIENT_END);
                w.property(K::SimpleProperty, &fill.colors, &GradientColor::default());
                write_gated(stream, TagCode::GradientFill, w, gate);
            }
            ShapeElement::GradientStroke(stroke) => write_gradient_stroke(stream, stroke, gate),
            ShapeElement::MergePaths(merge) => {
                let mut w = BlockWriter::new();
                w.value(&merge.mode, &MergePathsMode::Add);
                write_gated(stream, TagCode::MergePaths, w, gate);
            }
            ShapeElement::TrimPaths(trim) => {
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &trim.start, &0.0);
                w.property(K::SimpleProperty, &trim.end, &1.0);
                w.property(K::SimpleProperty, &trim.offset, &0.0);
                w.value(&trim.trim_type, &TrimPathsType::Simultaneously);
                write_gated(stream, TagCode::TrimPaths, w, gate);
            }
            ShapeElement::Repeater(repeater) => {
                let t = &repeater.transform;
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &repeater.copies, &3.0);
                w.property(K::SimpleProperty, &repeater.offset, &0.0);
                w.value(&repeater.composite, &RepeaterOrder::Below);
                w.property(K::SpatialProperty, &t.anchor_point, &Point::ZERO);
                w.property(K::SpatialProperty, &t.position, &REPEATER_OFFSET);
                w.property(K::MultiDimensionProperty, &t.scale, &UNIT_SCALE);
                w.property(K::SimpleProperty, &t.rotation, &0.0);
                w.property(K::SimpleProperty, &t.start_opacity, &OPAQUE);
                w.property(K::SimpleProperty, &t.end_opacity, &OPAQUE);
                write_gated(stream, TagCode::Repeater, w, gate);
            }
            ShapeElement::RoundCorners(corners) => {
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &corners.radius, &10.0);
                write_gated(stream, TagCode::RoundCorners, w, gate);
            }
        }
    }
}

fn write_gated(
    stream: &mut EncodeStream,
    code: TagCode,
    block: BlockWriter,
    gate: &CompatibilityGate,
) {
    if gate.admit(code) {
        write_block(stream, code, block);
    }
}

fn write_group(stream: &mut EncodeStream, group: &ShapeGroup, gate: &CompatibilityGate) {
    if !gate.admit(TagCode::ShapeGroup) {
        return;
    }
    let t = &group.transform;
    let mut w = BlockWriter::new();
    w.value(&group.blend_mode, &BlendMode::Normal);
    w.property(K::SpatialProperty, &t.anchor_point, &Point::ZERO);
    w.property(K::SpatialProperty, &t.position, &Point::ZERO);
    w.property(K::MultiDimensionProperty, &t.scale, &UNIT_SCALE);
    w.property(K::SimpleProperty, &t.skew, &0.0);
    w.property(K::SimpleProperty, &t.skew_axis, &0.0);
    w.property(K::SimpleProperty, &t.rotation, &0.0);
    w.property(K::SimpleProperty, &t.opacity, &OPAQUE);
    let mut payload = EncodeStream::new();
    payload.write_bytes(&w.finish());
    write_shapes(&mut payload, &group.elements, gate);
    write_end_tag(&mut payload);
    write_tag_bytes(stream, TagCode::ShapeGroup, payload.as_bytes());
}

fn write_stroke(stream: &mut EncodeStream, stroke: &StrokeElement, gate: &CompatibilityGate) {
    if !gate.admit(TagCode::Stroke) {
        return;
    }
    let mut w = BlockWriter::new();
    w.value(&stroke.blend_mode, &BlendMode::Normal);
    w.value(&stroke.composite, &CompositeOrder::BelowPreviousInSameGroup);
    w.value(&stroke.line_cap, &LineCap::Butt);
    w.value(&stroke.line_join, &LineJoin::Miter);
    w.property(K::SimpleProperty, &stroke.miter_limit, &4.0);
    w.property(K::SimpleProperty, &stroke.color, &Color::WHITE);
    w.property(K::SimpleProperty, &stroke.opacity, &OPAQUE);
    w.property(K::SimpleProperty, &stroke.stroke_width, &2.0);
    w.property(K::SimpleProperty, &stroke.dash_offset, &0.0);
    write_with_dashes(stream, TagCode::Stroke, w, &stroke.dashes);
}

fn write_gradient_stroke(
    stream: &mut EncodeStream,
    stroke: &GradientStrokeElement,
    gate: &CompatibilityGate,
) {
    if !gate.admit(TagCode::GradientStroke) {
        return;
    }
    let mut w = BlockWriter::new();
    w.value(&stroke.blend_mode, &BlendMode::Normal);
    w.value(&stroke.composite, &CompositeOrder::BelowPreviousInSameGroup);
    w.value(&stroke.fill_type, &GradientFillType::Linear);
    w.value(&stroke.line_cap, &LineCap::Butt);
    w.value(&stroke.line_join, &LineJoin::Miter);
    w.property(K::SimpleProperty, &stroke.miter_limit, &4.0);
    w.property(K::SpatialProperty, &stroke.start_point, &Point::ZERO);
    w.property(K::SpatialProperty, &stroke.end_point, &GRADIENT_END);
    w.property(K::SimpleProperty, &stroke.colors, &GradientColor::default());
    w.property(K::SimpleProperty, &stroke.opacity, &OPAQUE);
    w.property(K::SimpleProperty, &stroke.stroke_width, &2.0);
    w.property(K::SimpleProperty, &stroke.dash_offset, &0.0);
    write_with_dashes(stream, TagCode::GradientStroke, w, &stroke.dashes);
}

fn write_with_dashes(
    stream: &mut EncodeStream,
    code: TagCode,
    block: BlockWriter,
    dashes: &[Property<f32>],
) {
    let mut payload = EncodeStream::new();
    payload.write_bytes(&block.finish());
    payload.write_encoded_u32(dashes.len() as u32);
    if !dashes.is_empty() {
        let mut w = BlockWriter::new();
        for dash in dashes {
            w.property(K::SimpleProperty, dash, &0.0);
        }
        payload.write_bytes(&w.finish());
    }
    write_tag_bytes(stream, code, payload.as_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/tags/shape.rs"]
mod tests;
