use super::*;

#[test]
fn constant_and_start_values() {
    let p = Property::Value(3.0f32);
    assert_eq!(p.constant(), Some(&3.0));
    assert!(p.is_constant(&3.0));
    assert!(!p.is_animatable());

    let a = Property::Animated(vec![Keyframe::linear(1.0f32, 2.0, 0, 10)]);
    assert!(a.is_animatable());
    assert_eq!(a.constant(), None);
    assert_eq!(a.value_at_start(), Some(&1.0));
    assert_eq!(a.keyframes().len(), 1);
}

#[test]
fn empty_animation_has_no_start_value() {
    let a: Property<f32> = Property::Animated(Vec::new());
    assert_eq!(a.value_at_start(), None);
}

#[test]
fn spatial_tangents_are_detected() {
    let mut k = Keyframe::linear(Point::ZERO, Point::new(5.0, 5.0), 0, 4);
    assert!(!k.has_spatial());
    k.spatial_in = Point3D::new(1.0, 0.0, 0.0);
    assert!(k.has_spatial());
}

#[test]
fn interpolation_defaults_to_hold_for_unknown_bits() {
    assert_eq!(
        KeyframeInterpolation::from_u8(9),
        KeyframeInterpolation::Hold
    );
    assert_eq!(
        KeyframeInterpolation::from_u8(2),
        KeyframeInterpolation::Bezier
    );
}

#[test]
fn map_keeps_timing() {
    let mut k = Keyframe::linear(1u8, 3u8, 2, 9);
    k.interpolation = KeyframeInterpolation::Bezier;
    k.bezier_out = vec![Point::new(0.2, 0.0)];
    let p = Property::Animated(vec![k]);
    let mapped = p.map(|v| f32::from(*v) * 2.0);
    let k = &mapped.keyframes()[0];
    assert_eq!((k.start_value, k.end_value), (2.0, 6.0));
    assert_eq!((k.start_time, k.end_time), (2, 9));
    assert_eq!(k.bezier_out, vec![Point::new(0.2, 0.0)]);
}
