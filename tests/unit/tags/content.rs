use super::*;
use crate::codec::tag_block::{read_tags, write_end_tag};
use crate::model::layer::{LayerType, ShapeContent, TextContent};
use crate::model::property::{Keyframe, Property};
use crate::model::shape::{EllipseElement, ShapeElement};

fn round_trip(content: &LayerContent, gate: &CompatibilityGate) -> (Vec<TagCode>, LayerContent) {
    let mut s = EncodeStream::new();
    write_content(&mut s, content, gate);
    write_end_tag(&mut s);
    let bytes = s.into_bytes();
    let mut r = DecodeStream::new(&bytes);
    let mut codes = Vec::new();
    let mut decoded = LayerContent::empty(content.layer_type());
    read_tags(&mut r, |code, payload| {
        codes.push(code);
        if let LayerContent::Shape(shape) = &mut decoded {
            let element = shape::read_shape(payload, code)?;
            let claimed = element.is_some();
            shape.contents.extend(element);
            return Ok(claimed);
        }
        read_content_tag(payload, code, &mut decoded)
    })
    .unwrap();
    (codes, decoded)
}

#[test]
fn solid_round_trips() {
    let content = LayerContent::Solid(SolidContent {
        color: Color::new(1, 2, 3),
        width: 1920,
        height: 1080,
    });
    let (codes, decoded) = round_trip(&content, &CompatibilityGate::beta());
    assert_eq!(codes, vec![TagCode::SolidColor]);
    assert_eq!(decoded, content);
}

#[test]
fn precompose_reference_round_trips() {
    let content = LayerContent::PreCompose(PreComposeContent {
        composition_id: Some(7),
        composition_start_time: -30,
    });
    assert_eq!(round_trip(&content, &CompatibilityGate::beta()).1, content);

    let unbound = LayerContent::PreCompose(PreComposeContent::default());
    assert!(round_trip(&unbound, &CompatibilityGate::beta()).0.is_empty());
}

#[test]
fn default_fill_rule_is_not_written() {
    let content = LayerContent::Image(ImageContent {
        image_id: Some(3),
        fill_rule: Some(ImageFillRule::default()),
    });
    let (codes, decoded) = round_trip(&content, &CompatibilityGate::beta());
    assert_eq!(codes, vec![TagCode::ImageReference]);
    assert_eq!(
        decoded,
        LayerContent::Image(ImageContent {
            image_id: Some(3),
            fill_rule: None,
        })
    );
}

#[test]
fn fill_rule_with_time_remap_prefers_v2() {
    let rule = ImageFillRule {
        scale_mode: ScaleMode::Zoom,
        time_remap: Some(Property::Animated(vec![Keyframe::linear(0, 90, 0, 90)])),
    };
    let content = LayerContent::Image(ImageContent {
        image_id: Some(1),
        fill_rule: Some(rule),
    });
    let (codes, decoded) = round_trip(&content, &CompatibilityGate::beta());
    assert_eq!(codes, vec![TagCode::ImageReference, TagCode::ImageFillRuleV2]);
    assert_eq!(decoded, content);

    let gate = CompatibilityGate::custom(TagCode::ImageFillRule.ordinal()).unwrap();
    let (codes, decoded) = round_trip(&content, &gate);
    assert_eq!(codes, vec![TagCode::ImageReference, TagCode::ImageFillRule]);
    let LayerContent::Image(image) = decoded else {
        panic!("expected an image payload");
    };
    assert_eq!(
        image.fill_rule,
        Some(ImageFillRule {
            scale_mode: ScaleMode::Zoom,
            time_remap: None,
        })
    );
}

#[test]
fn camera_is_gated_out_of_stable_files() {
    let content = LayerContent::Camera(CameraOption {
        zoom: Property::Value(800.0),
        depth_of_field: Property::Value(true),
        ..CameraOption::default()
    });
    let (codes, decoded) = round_trip(&content, &CompatibilityGate::beta());
    assert_eq!(codes, vec![TagCode::CameraOption]);
    assert_eq!(decoded, content);

    let (codes, decoded) = round_trip(&content, &CompatibilityGate::stable());
    assert!(codes.is_empty());
    assert_eq!(decoded, LayerContent::empty(LayerType::Camera));
}

#[test]
fn tags_for_other_layer_types_are_unclaimed() {
    let mut content = LayerContent::Null;
    let mut s = DecodeStream::new(&[0, 0, 0, 0, 0]);
    assert!(!read_content_tag(&mut s, TagCode::SolidColor, &mut content).unwrap());
    assert_eq!(content, LayerContent::Null);
}

#[test]
fn text_and_shape_payloads_delegate() {
    let text = LayerContent::Text(TextContent::default());
    assert_eq!(round_trip(&text, &CompatibilityGate::beta()).0, vec![TagCode::TextSource]);

    let shape = LayerContent::Shape(ShapeContent {
        contents: vec![ShapeElement::Ellipse(EllipseElement::default())],
    });
    let (codes, decoded) = round_trip(&shape, &CompatibilityGate::beta());
    assert_eq!(codes, vec![TagCode::Ellipse]);
    assert_eq!(decoded, shape);
}
