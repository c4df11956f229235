//! Attribute blocks: the payload format shared by most entity tags.
//!
//! A block is a flag section followed by a content section:
//!
//! ```text
//! Block   ::= flags (bit-packed, padded to a byte) content
//! flags   ::= per attribute: exist [animatable [has_spatial]]
//! content ::= values of the attributes whose exist flag is set, in declaration order
//! ```
//!
//! The flag layout depends only on each attribute's [`AttributeKind`], so a reader is built
//! from the list of kinds and then pulls values in the same order the writer pushed them.

use kurbo::{BezPath, PathEl, Point as KurboPoint};

use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::foundation::core::{Color, Point, Point3D, Ratio};
use crate::foundation::error::{PagError, PagResult};
use crate::model::property::{Keyframe, KeyframeInterpolation, Property};

/// Files never carry more keyframes than a day of animation at 60fps.
pub const MAX_KEYFRAMES: u32 = 5_184_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Plain value, omitted when equal to its default.
    Value,
    /// Plain value that is always written and has no flag.
    FixedValue,
    /// A boolean stored entirely in its flag bit.
    BitFlag,
    SimpleProperty,
    /// Animatable property whose keyframes always hold.
    DiscreteProperty,
    /// Animatable property with one easing curve per value dimension.
    MultiDimensionProperty,
    /// Animatable point property that may carry spatial tangents.
    SpatialProperty,
}

impl AttributeKind {
    fn is_property(self) -> bool {
        matches!(
            self,
            Self::SimpleProperty
                | Self::DiscreteProperty
                | Self::MultiDimensionProperty
                | Self::SpatialProperty
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeFlag {
    pub exist: bool,
    pub animatable: bool,
    pub has_spatial: bool,
}

/// A value type that can be stored in an attribute block.
pub trait AttributeValue: Clone + PartialEq {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self>;

    fn write_value(&self, stream: &mut EncodeStream);

    /// Number of independently eased components.
    fn dimensionality() -> usize {
        1
    }
}

impl AttributeValue for bool {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_bool()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_bool(*self);
    }
}

impl AttributeValue for u8 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_u8()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_u8(*self);
    }
}

impl AttributeValue for u16 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        let value = stream.read_encoded_u32()?;
        u16::try_from(value).map_err(|_| PagError::corrupt("varint overflows u16"))
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_u32(u32::from(*self));
    }
}

impl AttributeValue for u32 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_encoded_u32()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_u32(*self);
    }
}

impl AttributeValue for i32 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_encoded_i32()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_i32(*self);
    }
}

impl AttributeValue for i64 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_encoded_i64()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_i64(*self);
    }
}

impl AttributeValue for f32 {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_f32()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_f32(*self);
    }
}

impl AttributeValue for String {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        stream.read_utf8_string()
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_utf8_string(self);
    }
}

impl AttributeValue for Point {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        Ok(Point::new(stream.read_f32()?, stream.read_f32()?))
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_f32(self.x);
        stream.write_f32(self.y);
    }

    fn dimensionality() -> usize {
        2
    }
}

impl AttributeValue for Point3D {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        Ok(Point3D::new(
            stream.read_f32()?,
            stream.read_f32()?,
            stream.read_f32()?,
        ))
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_f32(self.x);
        stream.write_f32(self.y);
        stream.write_f32(self.z);
    }

    fn dimensionality() -> usize {
        3
    }
}

impl AttributeValue for Color {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        Ok(Color::new(
            stream.read_u8()?,
            stream.read_u8()?,
            stream.read_u8()?,
        ))
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_u8(self.red);
        stream.write_u8(self.green);
        stream.write_u8(self.blue);
    }
}

impl AttributeValue for Ratio {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        Ok(Ratio {
            numerator: stream.read_encoded_i32()?,
            denominator: stream.read_encoded_u32()?,
        })
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        stream.write_encoded_i32(self.numerator);
        stream.write_encoded_u32(self.denominator);
    }
}

const VERB_CLOSE: u8 = 0;
const VERB_MOVE: u8 = 1;
const VERB_LINE: u8 = 2;
const VERB_QUAD: u8 = 3;
const VERB_CUBIC: u8 = 4;

fn read_kurbo_point(stream: &mut DecodeStream<'_>) -> PagResult<KurboPoint> {
    Ok(KurboPoint::new(stream.read_f64()?, stream.read_f64()?))
}

fn write_kurbo_point(stream: &mut EncodeStream, point: KurboPoint) {
    stream.write_f64(point.x);
    stream.write_f64(point.y);
}

/// Paths are stored as a verb list followed by the points each verb consumes.
impl AttributeValue for BezPath {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        let count = stream.read_encoded_u32()? as usize;
        if count > stream.bytes_available() {
            return Err(PagError::corrupt(format!(
                "path claims {count} verbs, {} bytes available",
                stream.bytes_available()
            )));
        }
        let mut verbs = Vec::with_capacity(count);
        for _ in 0..count {
            verbs.push(stream.read_u8()?);
        }
        let mut path = BezPath::new();
        for verb in verbs {
            let element = match verb {
                VERB_CLOSE => PathEl::ClosePath,
                VERB_MOVE => PathEl::MoveTo(read_kurbo_point(stream)?),
                VERB_LINE => PathEl::LineTo(read_kurbo_point(stream)?),
                VERB_QUAD => PathEl::QuadTo(read_kurbo_point(stream)?, read_kurbo_point(stream)?),
                VERB_CUBIC => PathEl::CurveTo(
                    read_kurbo_point(stream)?,
                    read_kurbo_point(stream)?,
                    read_kurbo_point(stream)?,
                ),
                other => return Err(PagError::corrupt(format!("unknown path verb {other}"))),
            };
            path.push(element);
        }
        Ok(path)
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        let elements = self.elements();
        stream.write_encoded_u32(elements.len() as u32);
        for element in elements {
            stream.write_u8(match element {
                PathEl::ClosePath => VERB_CLOSE,
                PathEl::MoveTo(_) => VERB_MOVE,
                PathEl::LineTo(_) => VERB_LINE,
                PathEl::QuadTo(..) => VERB_QUAD,
                PathEl::CurveTo(..) => VERB_CUBIC,
            });
        }
        for element in elements {
            match *element {
                PathEl::ClosePath => {}
                PathEl::MoveTo(p) | PathEl::LineTo(p) => write_kurbo_point(stream, p),
                PathEl::QuadTo(p1, p2) => {
                    write_kurbo_point(stream, p1);
                    write_kurbo_point(stream, p2);
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    write_kurbo_point(stream, p1);
                    write_kurbo_point(stream, p2);
                    write_kurbo_point(stream, p3);
                }
            }
        }
    }
}

fn ease_dimensions<T: AttributeValue>(kind: AttributeKind) -> usize {
    if kind == AttributeKind::MultiDimensionProperty {
        T::dimensionality()
    } else {
        1
    }
}

fn spatial_dimensions<T: AttributeValue>() -> usize {
    T::dimensionality().clamp(2, 3)
}

fn read_spatial_point(stream: &mut DecodeStream<'_>, dims: usize) -> PagResult<Point3D> {
    let x = stream.read_f32()?;
    let y = stream.read_f32()?;
    let z = if dims == 3 { stream.read_f32()? } else { 0.0 };
    Ok(Point3D::new(x, y, z))
}

fn write_spatial_point(stream: &mut EncodeStream, point: Point3D, dims: usize) {
    stream.write_f32(point.x);
    stream.write_f32(point.y);
    if dims == 3 {
        stream.write_f32(point.z);
    }
}

fn read_keyframes<T: AttributeValue>(
    stream: &mut DecodeStream<'_>,
    kind: AttributeKind,
    flag: AttributeFlag,
) -> PagResult<Vec<Keyframe<T>>> {
    let count = stream.read_encoded_u32()?;
    if count == 0 || count > MAX_KEYFRAMES {
        return Err(PagError::corrupt(format!("invalid keyframe count {count}")));
    }
    let count = count as usize;

    // Every keyframe costs at least one byte of content, which bounds the allocation.
    let capacity = count.min(stream.bytes_available());
    let mut interpolations = Vec::with_capacity(capacity);
    for _ in 0..count {
        interpolations.push(if kind == AttributeKind::DiscreteProperty {
            KeyframeInterpolation::Hold
        } else {
            KeyframeInterpolation::from_u8(stream.read_ubits(2)? as u8)
        });
    }

    let mut start_time = stream.read_encoded_i64()?;
    let mut start_value = T::read_value(stream)?;
    let mut keyframes = Vec::with_capacity(capacity);
    for interpolation in interpolations {
        let end_time = stream.read_encoded_i64()?;
        let end_value = T::read_value(stream)?;
        keyframes.push(Keyframe {
            start_value: start_value.clone(),
            end_value: end_value.clone(),
            start_time,
            end_time,
            interpolation,
            bezier_out: Vec::new(),
            bezier_in: Vec::new(),
            spatial_out: Point3D::ZERO,
            spatial_in: Point3D::ZERO,
        });
        start_time = end_time;
        start_value = end_value;
    }

    let dims = ease_dimensions::<T>(kind);
    for keyframe in keyframes
        .iter_mut()
        .filter(|k| k.interpolation == KeyframeInterpolation::Bezier)
    {
        for _ in 0..dims {
            keyframe.bezier_out.push(Point::read_value(stream)?);
            keyframe.bezier_in.push(Point::read_value(stream)?);
        }
    }

    if flag.has_spatial {
        let mut present = Vec::with_capacity(keyframes.len());
        for _ in 0..keyframes.len() {
            present.push((stream.read_bit_boolean()?, stream.read_bit_boolean()?));
        }
        let dims = spatial_dimensions::<T>();
        for (keyframe, (has_out, has_in)) in keyframes.iter_mut().zip(present) {
            if has_out {
                keyframe.spatial_out = read_spatial_point(stream, dims)?;
            }
            if has_in {
                keyframe.spatial_in = read_spatial_point(stream, dims)?;
            }
        }
    }
    Ok(keyframes)
}

fn write_keyframes<T: AttributeValue>(
    stream: &mut EncodeStream,
    kind: AttributeKind,
    keyframes: &[Keyframe<T>],
    has_spatial: bool,
) {
    let Some(first) = keyframes.first() else {
        return;
    };
    stream.write_encoded_u32(keyframes.len() as u32);
    if kind != AttributeKind::DiscreteProperty {
        for keyframe in keyframes {
            stream.write_ubits(u32::from(keyframe.interpolation.to_u8()), 2);
        }
    }

    stream.write_encoded_i64(first.start_time);
    first.start_value.write_value(stream);
    for keyframe in keyframes {
        stream.write_encoded_i64(keyframe.end_time);
        keyframe.end_value.write_value(stream);
    }

    let dims = ease_dimensions::<T>(kind);
    for keyframe in keyframes
        .iter()
        .filter(|_| kind != AttributeKind::DiscreteProperty)
        .filter(|k| k.interpolation == KeyframeInterpolation::Bezier)
    {
        for i in 0..dims {
            let ease_out = keyframe.bezier_out.get(i).copied().unwrap_or_default();
            let ease_in = keyframe.bezier_in.get(i).copied().unwrap_or_default();
            ease_out.write_value(stream);
            ease_in.write_value(stream);
        }
    }

    if has_spatial {
        for keyframe in keyframes {
            stream.write_bit_boolean(keyframe.spatial_out != Point3D::ZERO);
            stream.write_bit_boolean(keyframe.spatial_in != Point3D::ZERO);
        }
        let dims = spatial_dimensions::<T>();
        for keyframe in keyframes {
            if keyframe.spatial_out != Point3D::ZERO {
                write_spatial_point(stream, keyframe.spatial_out, dims);
            }
            if keyframe.spatial_in != Point3D::ZERO {
                write_spatial_point(stream, keyframe.spatial_in, dims);
            }
        }
    }
}

/// Pulls attributes out of a block in declaration order.
pub struct BlockReader<'s, 'a> {
    stream: &'s mut DecodeStream<'a>,
    flags: std::vec::IntoIter<(AttributeKind, AttributeFlag)>,
}

impl<'s, 'a> BlockReader<'s, 'a> {
    /// Read the flag section for `kinds` and position the stream at the content section.
    pub fn new(stream: &'s mut DecodeStream<'a>, kinds: &[AttributeKind]) -> PagResult<Self> {
        stream.align_with_bytes();
        let mut flags = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let mut flag = AttributeFlag::default();
            match kind {
                AttributeKind::FixedValue => flag.exist = true,
                AttributeKind::Value | AttributeKind::BitFlag => {
                    flag.exist = stream.read_bit_boolean()?;
                }
                _ => {
                    flag.exist = stream.read_bit_boolean()?;
                    if flag.exist {
                        flag.animatable = stream.read_bit_boolean()?;
                        if flag.animatable && kind == AttributeKind::SpatialProperty {
                            flag.has_spatial = stream.read_bit_boolean()?;
                        }
                    }
                }
            }
            flags.push((kind, flag));
        }
        stream.align_with_bytes();
        Ok(Self {
            stream,
            flags: flags.into_iter(),
        })
    }

    fn next(&mut self) -> PagResult<(AttributeKind, AttributeFlag)> {
        self.flags
            .next()
            .ok_or_else(|| PagError::corrupt("attribute block read past its layout"))
    }

    pub fn value<T: AttributeValue>(&mut self, default: T) -> PagResult<T> {
        Ok(self.optional_value()?.unwrap_or(default))
    }

    /// A value whose absence is meaningful; `None` when the writer left it out.
    pub fn optional_value<T: AttributeValue>(&mut self) -> PagResult<Option<T>> {
        let (_, flag) = self.next()?;
        if !flag.exist {
            return Ok(None);
        }
        T::read_value(self.stream).map(Some)
    }

    pub fn fixed<T: AttributeValue>(&mut self) -> PagResult<T> {
        self.next()?;
        T::read_value(self.stream)
    }

    pub fn bit_flag(&mut self) -> PagResult<bool> {
        Ok(self.next()?.1.exist)
    }

    pub fn property<T: AttributeValue>(&mut self, default: T) -> PagResult<Property<T>> {
        Ok(self
            .optional_property()?
            .unwrap_or(Property::Value(default)))
    }

    pub fn optional_property<T: AttributeValue>(&mut self) -> PagResult<Option<Property<T>>> {
        let (kind, flag) = self.next()?;
        if !kind.is_property() {
            return Err(PagError::corrupt(format!(
                "attribute of kind {kind:?} read as a property"
            )));
        }
        if !flag.exist {
            return Ok(None);
        }
        if !flag.animatable {
            return T::read_value(self.stream).map(|v| Some(Property::Value(v)));
        }
        read_keyframes(self.stream, kind, flag).map(|k| Some(Property::Animated(k)))
    }
}

/// Collects attribute flags and content side by side, then concatenates them.
#[derive(Debug, Default)]
pub struct BlockWriter {
    flags: EncodeStream,
    content: EncodeStream,
}

impl BlockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: AttributeValue>(&mut self, value: &T, default: &T) {
        self.optional_value(Some(value).filter(|v| *v != default));
    }

    pub fn optional_value<T: AttributeValue>(&mut self, value: Option<&T>) {
        self.flags.write_bit_boolean(value.is_some());
        if let Some(value) = value {
            value.write_value(&mut self.content);
        }
    }

    pub fn fixed<T: AttributeValue>(&mut self, value: &T) {
        value.write_value(&mut self.content);
    }

    pub fn bit_flag(&mut self, value: bool) {
        self.flags.write_bit_boolean(value);
    }

    /// Write a property, leaving it out entirely when it is a constant equal to `default`.
    pub fn property<T: AttributeValue>(
        &mut self,
        kind: AttributeKind,
        property: &Property<T>,
        default: &T,
    ) {
        let omit = match property {
            Property::Value(v) => v == default,
            Property::Animated(keyframes) => keyframes.is_empty(),
        };
        self.optional_property(kind, Some(property).filter(|_| !omit));
    }

    pub fn optional_property<T: AttributeValue>(
        &mut self,
        kind: AttributeKind,
        property: Option<&Property<T>>,
    ) {
        let property = property.filter(|p| !matches!(p, Property::Animated(k) if k.is_empty()));
        let Some(property) = property else {
            self.flags.write_bit_boolean(false);
            return;
        };
        self.flags.write_bit_boolean(true);
        match property {
            Property::Value(value) => {
                self.flags.write_bit_boolean(false);
                value.write_value(&mut self.content);
            }
            Property::Animated(keyframes) => {
                self.flags.write_bit_boolean(true);
                let has_spatial = kind == AttributeKind::SpatialProperty
                    && keyframes.iter().any(Keyframe::has_spatial);
                if kind == AttributeKind::SpatialProperty {
                    self.flags.write_bit_boolean(has_spatial);
                }
                write_keyframes(&mut self.content, kind, keyframes, has_spatial);
            }
        }
    }

    /// The encoded block: flag bytes followed by content bytes.
    pub fn finish(self) -> Vec<u8> {
        let mut bytes = self.flags.into_bytes();
        bytes.extend_from_slice(self.content.as_bytes());
        bytes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/attributes.rs"]
mod tests;
