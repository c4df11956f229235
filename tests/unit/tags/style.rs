use super::*;
use crate::codec::tag_block::{read_tags, write_end_tag};
use crate::model::property::Property;

fn round_trip(styles: &[LayerStyle], gate: &CompatibilityGate) -> Vec<(TagCode, LayerStyle)> {
    let mut s = EncodeStream::new();
    write_layer_styles(&mut s, styles, gate);
    write_end_tag(&mut s);
    let bytes = s.into_bytes();
    let mut r = DecodeStream::new(&bytes);
    let mut out = Vec::new();
    read_tags(&mut r, |code, payload| {
        let style = read_layer_style(payload, code)?;
        out.extend(style.map(|s| (code, s)));
        Ok(true)
    })
    .unwrap();
    out
}

#[test]
fn plain_shadow_uses_first_tag() {
    let style = LayerStyle::DropShadow(DropShadowStyle {
        color: Property::Value(Color::RED),
        distance: Property::Value(12.0),
        ..DropShadowStyle::default()
    });
    let decoded = round_trip(std::slice::from_ref(&style), &CompatibilityGate::beta());
    assert_eq!(decoded, vec![(TagCode::DropShadowStyle, style)]);
}

#[test]
fn spread_needs_extended_tag() {
    let style = LayerStyle::DropShadow(DropShadowStyle {
        spread: Property::Value(0.25),
        size: Property::Value(9.0),
        ..DropShadowStyle::default()
    });
    let decoded = round_trip(std::slice::from_ref(&style), &CompatibilityGate::beta());
    assert_eq!(decoded, vec![(TagCode::DropShadowStyleV2, style)]);
}

#[test]
fn old_gate_falls_back_without_spread() {
    let style = DropShadowStyle {
        spread: Property::Value(0.25),
        ..DropShadowStyle::default()
    };
    let gate = CompatibilityGate::custom(TagCode::DropShadowStyle.ordinal()).unwrap();
    let decoded = round_trip(&[LayerStyle::DropShadow(style)], &gate);
    assert_eq!(
        decoded,
        vec![(
            TagCode::DropShadowStyle,
            LayerStyle::DropShadow(DropShadowStyle::default())
        )]
    );
}
