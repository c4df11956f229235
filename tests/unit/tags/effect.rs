use super::*;
use crate::codec::tag_block::{read_tags, write_end_tag};
use crate::model::property::{Keyframe, Property};

fn round_trip(effects: &[Effect], gate: &CompatibilityGate) -> Vec<Effect> {
    let mut s = EncodeStream::new();
    write_effects(&mut s, effects, gate);
    write_end_tag(&mut s);
    let bytes = s.into_bytes();
    let mut r = DecodeStream::new(&bytes);
    let mut out = Vec::new();
    read_tags(&mut r, |code, payload| match read_effect(payload, code)? {
        Some(effect) => {
            out.push(effect);
            Ok(true)
        }
        None => Ok(false),
    })
    .unwrap();
    out
}

#[test]
fn effects_keep_order_and_values() {
    let effects = vec![
        Effect::Mosaic(MosaicEffect {
            horizontal_blocks: Property::Value(4),
            ..MosaicEffect::default()
        }),
        Effect::FastBlur(FastBlurEffect {
            blurriness: Property::Animated(vec![Keyframe::linear(0.0, 20.0, 0, 15)]),
            blur_dimensions: Property::Value(BlurDimensions::Vertical),
            repeat_edge_pixels: Property::Value(true),
        }),
        Effect::Glow(GlowEffect::default()),
    ];
    assert_eq!(round_trip(&effects, &CompatibilityGate::beta()), effects);
}

#[test]
fn gate_omits_newer_effects_only() {
    let effects = vec![
        Effect::Mosaic(MosaicEffect::default()),
        Effect::Glow(GlowEffect::default()),
    ];
    let decoded = round_trip(&effects, &CompatibilityGate::stable());
    assert_eq!(decoded, vec![Effect::Glow(GlowEffect::default())]);
}

#[test]
fn other_effect_codes_are_unclaimed() {
    let mut s = DecodeStream::new(&[]);
    assert!(read_effect(&mut s, TagCode::BulgeEffect).unwrap().is_none());
}
