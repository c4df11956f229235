use super::*;
use crate::foundation::core::{Point, Point3D};
use crate::model::effect::{Effect, GlowEffect};
use crate::model::layer::SolidContent;
use crate::model::mask::Mask;
use crate::model::property::{Keyframe, Property};
use crate::codec::tag_block::write_tag_bytes;
use crate::model::style::{DropShadowStyle, LayerStyle};
use crate::model::transform::Transform3D;

fn encode(layer: &Layer, gate: &CompatibilityGate) -> Vec<u8> {
    let mut s = EncodeStream::new();
    write_layer(&mut s, layer, gate);
    s.into_bytes()
}

fn decode(bytes: &[u8]) -> Layer {
    let mut s = DecodeStream::new(bytes);
    let layer = read_layer(&mut s).unwrap();
    assert_eq!(s.bytes_available(), 0);
    layer
}

/// Tag codes of an encoded layer, in order.
fn tag_codes(bytes: &[u8]) -> Vec<TagCode> {
    let mut s = DecodeStream::new(bytes);
    s.read_u8().unwrap();
    s.read_encoded_u32().unwrap();
    let mut codes = Vec::new();
    read_tags(&mut s, |code, _| {
        codes.push(code);
        Ok(true)
    })
    .unwrap();
    codes
}

#[test]
fn unnamed_layer_uses_first_attribute_tag() {
    let layer = Layer::new(1, LayerType::Null);
    let bytes = encode(&layer, &CompatibilityGate::beta());
    assert_eq!(tag_codes(&bytes), vec![TagCode::LayerAttributes]);
    assert_eq!(decode(&bytes), layer);
}

#[test]
fn named_layer_switches_to_v2() {
    let layer = Layer {
        name: "Foo".to_owned(),
        ..Layer::new(2, LayerType::Null)
    };
    let bytes = encode(&layer, &CompatibilityGate::beta());
    assert_eq!(tag_codes(&bytes)[0], TagCode::LayerAttributesV2);
    assert_eq!(decode(&bytes).name, "Foo");
}

#[test]
fn motion_blur_uses_the_extra_tag() {
    let layer = Layer {
        name: "Blurry".to_owned(),
        motion_blur: true,
        ..Layer::new(3, LayerType::Null)
    };
    let bytes = encode(&layer, &CompatibilityGate::beta());
    assert_eq!(
        &tag_codes(&bytes)[..2],
        &[TagCode::LayerAttributes, TagCode::LayerAttributesExtra]
    );
    assert_eq!(decode(&bytes), layer);

    // without the extra tag the name survives and motion blur is dropped
    let gate = CompatibilityGate::custom(TagCode::LayerAttributesExtra.ordinal() - 1).unwrap();
    let bytes = encode(&layer, &gate);
    assert_eq!(tag_codes(&bytes)[0], TagCode::LayerAttributesV2);
    let decoded = decode(&bytes);
    assert_eq!(decoded.name, "Blurry");
    assert!(!decoded.motion_blur);
}

#[test]
fn zero_duration_is_repaired() {
    let layer = Layer {
        duration: 0,
        ..Layer::new(4, LayerType::Null)
    };
    assert_eq!(decode(&encode(&layer, &CompatibilityGate::beta())).duration, 1);
}

#[test]
fn legacy_v3_attributes_decode() {
    let mut w = BlockWriter::new();
    w.bit_flag(true);
    w.bit_flag(false);
    w.optional_value(Some(&9u32));
    w.value(&Ratio::ONE, &Ratio::ONE);
    w.value(&-12i64, &0);
    w.value(&BlendMode::Screen, &BlendMode::Normal);
    w.value(&TrackMatteType::Alpha, &TrackMatteType::None);
    w.optional_property::<f32>(K::SimpleProperty, None);
    w.fixed(&90i64);
    w.value(&"legacy".to_owned(), &String::new());
    w.bit_flag(true);
    let mut s = EncodeStream::new();
    s.write_u8(LayerType::Null.to_u8());
    s.write_encoded_u32(5);
    write_block(&mut s, TagCode::LayerAttributesV3, w);
    write_end_tag(&mut s);

    let layer = decode(s.as_bytes());
    assert_eq!(layer.parent, Some(9));
    assert_eq!(layer.start_time, -12);
    assert_eq!(layer.blend_mode, BlendMode::Screen);
    assert_eq!(layer.track_matte_type, TrackMatteType::Alpha);
    assert_eq!(layer.duration, 90);
    assert_eq!(layer.name, "legacy");
    assert!(layer.motion_blur);
}

#[test]
fn full_layer_round_trips_and_reencodes_identically() {
    let layer = Layer {
        parent: Some(1),
        start_time: 10,
        duration: 120,
        time_remap: Some(Property::Animated(vec![Keyframe::linear(0.0, 4.0, 10, 130)])),
        transform: LayerTransform::TwoD(Transform2D {
            position: None,
            x_position: Some(Property::Animated(vec![Keyframe::linear(0.0, 50.0, 0, 30)])),
            y_position: Some(Property::Value(25.0)),
            ..Transform2D::default()
        }),
        masks: vec![
            Mask::default(),
            Mask {
                feather: Some(Property::Value(Point::new(2.0, 3.0))),
                ..Mask::default()
            },
        ],
        effects: vec![Effect::Glow(GlowEffect::default())],
        layer_styles: vec![LayerStyle::DropShadow(DropShadowStyle::default())],
        cache_policy: CachePolicy::Disable,
        content: LayerContent::Solid(SolidContent {
            width: 64,
            height: 32,
            ..SolidContent::default()
        }),
        ..Layer::new(7, LayerType::Solid)
    };
    let gate = CompatibilityGate::beta();
    let bytes = encode(&layer, &gate);
    let decoded = decode(&bytes);
    assert_eq!(decoded, layer);
    assert_eq!(encode(&decoded, &gate), bytes);
}

#[test]
fn three_d_transform_is_gated_out() {
    let layer = Layer {
        transform: LayerTransform::ThreeD(Transform3D {
            position: Some(Property::Value(Point3D::new(1.0, 2.0, 3.0))),
            ..Transform3D::default()
        }),
        ..Layer::new(8, LayerType::Null)
    };
    let beta = encode(&layer, &CompatibilityGate::beta());
    assert!(tag_codes(&beta).contains(&TagCode::Transform3D));
    assert_eq!(decode(&beta), layer);

    let stable = encode(&layer, &CompatibilityGate::stable());
    let codes = tag_codes(&stable);
    assert!(!codes.contains(&TagCode::Transform3D));
    assert!(!codes.contains(&TagCode::Transform2D));
    assert_eq!(decode(&stable).transform, LayerTransform::default());
}

#[test]
fn mismatched_payload_tags_are_ignored() {
    let solid = Layer {
        content: LayerContent::Solid(SolidContent {
            width: 10,
            height: 10,
            ..SolidContent::default()
        }),
        ..Layer::new(9, LayerType::Solid)
    };
    let mut bytes = encode(&solid, &CompatibilityGate::beta());
    bytes[0] = LayerType::Null.to_u8();
    let decoded = decode(&bytes);
    assert_eq!(decoded.content, LayerContent::Null);
    assert_eq!(decoded.id, 9);
}

#[test]
fn unknown_layer_type_keeps_common_fields() {
    let layer = Layer {
        name: "future".to_owned(),
        ..Layer::new(11, LayerType::Null)
    };
    let mut bytes = encode(&layer, &CompatibilityGate::beta());
    bytes[0] = 200;
    let decoded = decode(&bytes);
    assert_eq!(decoded.layer_type(), LayerType::Unknown);
    assert_eq!(decoded.name, "future");
}

#[test]
fn truncated_header_is_an_error() {
    let bytes = [LayerType::Solid.to_u8()];
    let mut s = DecodeStream::new(&bytes);
    assert!(read_layer(&mut s).is_err());
}

#[test]
fn truncated_attributes_leave_the_layer_untouched() {
    let mut w = BlockWriter::new();
    w.bit_flag(true);
    w.bit_flag(false);
    w.optional_value::<u32>(None);
    w.value(&Ratio::ONE, &Ratio::ONE);
    w.value(&0i64, &0);
    w.value(&BlendMode::Normal, &BlendMode::Normal);
    w.value(&TrackMatteType::None, &TrackMatteType::None);
    w.optional_property::<f32>(K::SimpleProperty, None);
    w.fixed(&0i64);
    w.value(&"Foo".to_owned(), &String::new());
    let mut payload = w.finish();
    payload.pop();

    let mut s = EncodeStream::new();
    s.write_u8(LayerType::Null.to_u8());
    s.write_encoded_u32(9);
    write_tag_bytes(&mut s, TagCode::LayerAttributesV2, &payload);
    write_end_tag(&mut s);

    let layer = decode(s.as_bytes());
    assert_eq!(layer.duration, 1);
    assert_eq!(layer.name, "");
    assert_eq!(layer, Layer::new(9, LayerType::Null));
}
