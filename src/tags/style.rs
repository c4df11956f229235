use crate::codec::attributes::{AttributeKind as K, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{BlendMode, Color};
use crate::foundation::error::PagResult;
use crate::model::style::{
    DEFAULT_SHADOW_ANGLE, DEFAULT_SHADOW_DISTANCE, DEFAULT_SHADOW_OPACITY, DEFAULT_SHADOW_SIZE,
    DropShadowStyle, LayerStyle,
};
use crate::tags::write_block;

const DROP_SHADOW: &[K] = &[
    K::DiscreteProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

const DROP_SHADOW_V2: &[K] = &[
    K::DiscreteProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

/// Decode a layer style tag; `None` when `code` is not a style.
pub(crate) fn read_layer_style(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
) -> PagResult<Option<LayerStyle>> {
    let extended = match code {
        TagCode::DropShadowStyle => false,
        TagCode::DropShadowStyleV2 => true,
        _ => return Ok(None),
    };
    let mut r = BlockReader::new(stream, if extended { DROP_SHADOW_V2 } else { DROP_SHADOW })?;
    let mut style = DropShadowStyle {
        blend_mode: r.property(BlendMode::Multiply)?,
        color: r.property(Color::BLACK)?,
        opacity: r.property(DEFAULT_SHADOW_OPACITY)?,
        angle: r.property(DEFAULT_SHADOW_ANGLE)?,
        distance: r.property(DEFAULT_SHADOW_DISTANCE)?,
        ..DropShadowStyle::default()
    };
    if extended {
        style.size = r.property(DEFAULT_SHADOW_SIZE)?;
        style.spread = r.property(0.0)?;
    }
    Ok(Some(LayerStyle::DropShadow(style)))
}

pub(crate) fn write_layer_styles(
    stream: &mut EncodeStream,
    styles: &[LayerStyle],
    gate: &CompatibilityGate,
) {
    for LayerStyle::DropShadow(style) in styles {
        let preference: &[TagCode] = if style.needs_extended_tag() {
            &[TagCode::DropShadowStyleV2, TagCode::DropShadowStyle]
        } else {
            &[TagCode::DropShadowStyle]
        };
        let Some(code) = gate.select(preference) else {
            continue;
        };
        let mut w = BlockWriter::new();
        w.property(K::DiscreteProperty, &style.blend_mode, &BlendMode::Multiply);
        w.property(K::SimpleProperty, &style.color, &Color::BLACK);
        w.property(K::SimpleProperty, &style.opacity, &DEFAULT_SHADOW_OPACITY);
        w.property(K::SimpleProperty, &style.angle, &DEFAULT_SHADOW_ANGLE);
        w.property(K::SimpleProperty, &style.distance, &DEFAULT_SHADOW_DISTANCE);
        if code == TagCode::DropShadowStyleV2 {
            w.property(K::SimpleProperty, &style.size, &DEFAULT_SHADOW_SIZE);
            w.property(K::SimpleProperty, &style.spread, &0.0);
        }
        write_block(stream, code, w);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tags/style.rs"]
mod tests;
