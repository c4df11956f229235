use super::*;
use crate::model::property::Keyframe;

#[test]
fn combined_position_drops_axes() {
    let mut t = Transform2D {
        position: Some(Property::Value(Point::new(10.0, 20.0))),
        x_position: Some(Property::Value(3.0)),
        y_position: None,
        ..Transform2D::default()
    };
    t.repair_position();
    assert_eq!(t.position, Some(Property::Value(Point::new(10.0, 20.0))));
    assert_eq!(t.x_position, None);
    assert_eq!(t.y_position, None);
}

#[test]
fn empty_position_with_animated_axis_keeps_axes() {
    let mut t = Transform2D {
        position: Some(Property::Value(Point::ZERO)),
        x_position: Some(Property::Animated(vec![Keyframe::linear(0.0, 5.0, 0, 10)])),
        y_position: None,
        ..Transform2D::default()
    };
    t.repair_position();
    assert_eq!(t.position, None);
    assert!(t.x_position.as_ref().is_some_and(Property::is_animatable));
    assert_eq!(t.y_position, Some(Property::Value(0.0)));
}

#[test]
fn nothing_set_means_zero_position() {
    let mut t = Transform2D {
        position: None,
        ..Transform2D::default()
    };
    t.repair_position();
    assert_eq!(t.position, Some(Property::Value(Point::ZERO)));
}

#[test]
fn canonical_collapses_static_axes() {
    let t = Transform2D {
        position: None,
        x_position: Some(Property::Value(4.0)),
        y_position: Some(Property::Value(-2.0)),
        ..Transform2D::default()
    };
    let c = t.canonical();
    assert_eq!(c.position, Some(Property::Value(Point::new(4.0, -2.0))));
    assert_eq!(c.x_position, None);
    assert_eq!(c.canonical(), c);
}

#[test]
fn canonical_keeps_independent_animation() {
    let t = Transform2D {
        position: None,
        x_position: Some(Property::Animated(vec![Keyframe::linear(0.0, 5.0, 0, 10)])),
        y_position: Some(Property::Animated(vec![Keyframe::linear(1.0, 2.0, 3, 8)])),
        ..Transform2D::default()
    };
    assert_eq!(t.canonical(), t);
}

#[test]
fn three_d_repair_covers_z() {
    let mut t = Transform3D {
        position: None,
        z_position: Some(Property::Animated(vec![Keyframe::linear(0.0, -50.0, 0, 10)])),
        ..Transform3D::default()
    };
    t.repair_position();
    assert_eq!(t.position, None);
    assert_eq!(t.x_position, Some(Property::Value(0.0)));
    assert!(t.z_position.as_ref().is_some_and(Property::is_animatable));

    let flat = Transform3D {
        position: None,
        x_position: Some(Property::Value(1.0)),
        ..Transform3D::default()
    }
    .canonical();
    assert_eq!(flat.position, Some(Property::Value(Point3D::new(1.0, 0.0, 0.0))));
}
