use super::*;
use crate::model::property::Keyframe;

#[test]
fn zero_feather_is_not_meaningful() {
    let mut mask = Mask::default();
    assert!(!mask.has_feather());
    mask.feather = Some(Property::Value(Point::ZERO));
    assert!(!mask.has_feather());
    mask.feather = Some(Property::Value(Point::new(2.0, 3.0)));
    assert!(mask.has_feather());
    mask.feather = Some(Property::Animated(vec![Keyframe::linear(
        Point::ZERO,
        Point::ZERO,
        0,
        1,
    )]));
    assert!(mask.has_feather());
}

#[test]
fn unknown_mode_falls_back_to_add() {
    assert_eq!(MaskMode::from_u8(42), MaskMode::Add);
    assert_eq!(MaskMode::from_u8(2), MaskMode::Subtract);
}
