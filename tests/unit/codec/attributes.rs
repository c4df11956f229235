use super::*;
use crate::foundation::core::BlendMode;

const KINDS: &[AttributeKind] = &[
    AttributeKind::Value,
    AttributeKind::FixedValue,
    AttributeKind::BitFlag,
    AttributeKind::SimpleProperty,
    AttributeKind::SpatialProperty,
];

#[test]
fn defaults_cost_only_flag_bits() {
    let mut w = BlockWriter::new();
    w.value(&String::new(), &String::new());
    w.fixed(&7u32);
    w.bit_flag(false);
    w.property(AttributeKind::SimpleProperty, &Property::Value(1.0f32), &1.0);
    w.property(
        AttributeKind::SpatialProperty,
        &Property::Value(Point::ZERO),
        &Point::ZERO,
    );
    let bytes = w.finish();
    // Four flag bits pad to one byte, then the fixed varint.
    assert_eq!(bytes, vec![0, 7]);

    let mut s = DecodeStream::new(&bytes);
    let mut r = BlockReader::new(&mut s, KINDS).unwrap();
    assert_eq!(r.value(String::new()).unwrap(), "");
    assert_eq!(r.fixed::<u32>().unwrap(), 7);
    assert!(!r.bit_flag().unwrap());
    assert_eq!(r.property(1.0f32).unwrap(), Property::Value(1.0));
    assert_eq!(r.property(Point::ZERO).unwrap(), Property::Value(Point::ZERO));
    assert_eq!(s.bytes_available(), 0);
}

#[test]
fn animated_spatial_property_keeps_keyframes() {
    let mut first = Keyframe::linear(Point::new(0.0, 0.0), Point::new(10.0, 5.0), 0, 12);
    first.interpolation = KeyframeInterpolation::Bezier;
    first.bezier_out = vec![Point::new(0.3, 0.0)];
    first.bezier_in = vec![Point::new(0.7, 1.0)];
    first.spatial_out = Point3D::new(2.0, 1.0, 0.0);
    let second = Keyframe::hold(Point::new(10.0, 5.0), Point::new(-4.0, 3.5), 12, 30);
    let animated = Property::Animated(vec![first, second]);

    let mut w = BlockWriter::new();
    w.value(&String::from("layer"), &String::new());
    w.fixed(&0u32);
    w.bit_flag(true);
    w.property(AttributeKind::SimpleProperty, &Property::Value(0.5f32), &1.0);
    w.property(AttributeKind::SpatialProperty, &animated, &Point::ZERO);
    let bytes = w.finish();

    let mut s = DecodeStream::new(&bytes);
    let mut r = BlockReader::new(&mut s, KINDS).unwrap();
    assert_eq!(r.value(String::new()).unwrap(), "layer");
    assert_eq!(r.fixed::<u32>().unwrap(), 0);
    assert!(r.bit_flag().unwrap());
    assert_eq!(r.property(1.0f32).unwrap(), Property::Value(0.5));
    assert_eq!(r.property(Point::ZERO).unwrap(), animated);
    assert_eq!(s.bytes_available(), 0);
}

#[test]
fn multi_dimension_properties_ease_each_axis() {
    let mut keyframe = Keyframe::linear(Point::new(1.0, 1.0), Point::new(2.0, 0.5), 0, 10);
    keyframe.interpolation = KeyframeInterpolation::Bezier;
    keyframe.bezier_out = vec![Point::new(0.1, 0.2), Point::new(0.3, 0.4)];
    keyframe.bezier_in = vec![Point::new(0.5, 0.6), Point::new(0.7, 0.8)];
    let scale = Property::Animated(vec![keyframe]);

    let mut w = BlockWriter::new();
    w.property(AttributeKind::MultiDimensionProperty, &scale, &Point::new(1.0, 1.0));
    let bytes = w.finish();
    let mut s = DecodeStream::new(&bytes);
    let mut r = BlockReader::new(&mut s, &[AttributeKind::MultiDimensionProperty]).unwrap();
    assert_eq!(r.property(Point::new(1.0, 1.0)).unwrap(), scale);
}

#[test]
fn discrete_properties_always_hold() {
    let blend = Property::Animated(vec![Keyframe::hold(
        BlendMode::Normal,
        BlendMode::Screen,
        0,
        5,
    )]);
    let mut w = BlockWriter::new();
    w.property(AttributeKind::DiscreteProperty, &blend, &BlendMode::Normal);
    let bytes = w.finish();
    let mut s = DecodeStream::new(&bytes);
    let mut r = BlockReader::new(&mut s, &[AttributeKind::DiscreteProperty]).unwrap();
    assert_eq!(r.property(BlendMode::Normal).unwrap(), blend);
}

#[test]
fn optional_values_distinguish_absent_from_default() {
    let mut w = BlockWriter::new();
    w.optional_value::<u32>(None);
    w.optional_value(Some(&0u32));
    w.optional_property(AttributeKind::SimpleProperty, Some(&Property::Value(0.0f32)));
    let bytes = w.finish();

    let kinds = [
        AttributeKind::Value,
        AttributeKind::Value,
        AttributeKind::SimpleProperty,
    ];
    let mut s = DecodeStream::new(&bytes);
    let mut r = BlockReader::new(&mut s, &kinds).unwrap();
    assert_eq!(r.optional_value::<u32>().unwrap(), None);
    assert_eq!(r.optional_value::<u32>().unwrap(), Some(0));
    assert_eq!(
        r.optional_property::<f32>().unwrap(),
        Some(Property::Value(0.0))
    );
}

#[test]
fn zero_or_huge_keyframe_counts_are_corrupt() {
    for count in [0u32, MAX_KEYFRAMES + 1] {
        let mut content = EncodeStream::new();
        // exist + animatable
        content.write_ubits(0b11, 2);
        content.write_encoded_u32(count);
        let bytes = content.into_bytes();
        let mut s = DecodeStream::new(&bytes);
        let mut r = BlockReader::new(&mut s, &[AttributeKind::SimpleProperty]).unwrap();
        assert!(r.property(0.0f32).unwrap_err().is_corrupt());
    }
}

#[test]
fn reading_past_layout_is_corrupt() {
    let mut s = DecodeStream::new(&[]);
    let mut r = BlockReader::new(&mut s, &[]).unwrap();
    assert!(r.value(0u8).unwrap_err().is_corrupt());
}

#[test]
fn paths_keep_every_verb() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((10.5, 0.0));
    path.quad_to((12.0, 2.0), (12.0, 4.0));
    path.curve_to((12.0, 8.0), (4.0, 8.0), (0.0, 4.0));
    path.close_path();

    let mut s = EncodeStream::new();
    path.write_value(&mut s);
    let mut r = DecodeStream::new(s.as_bytes());
    assert_eq!(BezPath::read_value(&mut r).unwrap(), path);
    assert_eq!(r.bytes_available(), 0);
}

#[test]
fn unknown_path_verb_is_corrupt() {
    let bytes = [1u8, 9];
    let mut r = DecodeStream::new(&bytes);
    assert!(BezPath::read_value(&mut r).unwrap_err().is_corrupt());
}
