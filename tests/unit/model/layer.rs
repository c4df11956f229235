use super::*;
use crate::model::property::Keyframe;

#[test]
fn new_layer_matches_its_type() {
    for t in [
        LayerType::Null,
        LayerType::Solid,
        LayerType::Text,
        LayerType::Shape,
        LayerType::Image,
        LayerType::PreCompose,
        LayerType::Camera,
        LayerType::Unknown,
    ] {
        let layer = Layer::new(7, t);
        assert_eq!(layer.layer_type(), t);
        assert_eq!(layer.id, 7);
        assert_eq!(layer.duration, 1);
    }
}

#[test]
fn unknown_type_byte_maps_to_unknown() {
    assert_eq!(LayerType::from_u8(200), LayerType::Unknown);
}

#[test]
fn text_feature_detection_looks_at_every_keyframe() {
    let plain = TextDocument::default();
    let vertical = TextDocument {
        direction: crate::model::text::TextDirection::Vertical,
        ..TextDocument::default()
    };
    let content = TextContent {
        source_text: Property::Animated(vec![Keyframe::hold(plain.clone(), vertical, 0, 10)]),
        ..TextContent::default()
    };
    assert!(content.uses_direction());
    assert!(!content.uses_background());
    assert_eq!(content.document(), Some(&plain));
}

#[test]
fn default_fill_rule_is_not_written() {
    assert!(ImageFillRule::default().is_default());
    let zoom = ImageFillRule {
        scale_mode: ScaleMode::Zoom,
        time_remap: None,
    };
    assert!(!zoom.is_default());
}
