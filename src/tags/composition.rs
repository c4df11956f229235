//! Vector composition blocks.
//!
//! ```text
//! VectorCompositionBlock ::= id:varint TagSequence
//! ```

use crate::codec::attributes::AttributeValue;
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::{read_tags, write_end_tag, write_tag};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::Color;
use crate::foundation::error::PagResult;
use crate::model::composition::Composition;
use crate::tags::layer::{read_layer, write_layer};

/// Decode a composition and its layers.
///
/// A layer block that fails to decode is dropped; the remaining layers are kept.
pub fn read_composition(stream: &mut DecodeStream<'_>) -> PagResult<Composition> {
    let mut composition = Composition {
        id: stream.read_encoded_u32()?,
        ..Composition::default()
    };
    read_tags(stream, |code, payload| {
        match code {
            TagCode::CompositionAttributes => {
                composition.width = payload.read_encoded_i32()?;
                composition.height = payload.read_encoded_i32()?;
                composition.duration = payload.read_encoded_i64()?;
                composition.frame_rate = payload.read_f32()?;
                composition.background_color = Color::read_value(payload)?;
            }
            TagCode::LayerBlock => composition.layers.push(read_layer(payload)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(composition)
}

pub fn write_composition(
    stream: &mut EncodeStream,
    composition: &Composition,
    gate: &CompatibilityGate,
) {
    stream.write_encoded_u32(composition.id);
    write_tag(stream, TagCode::CompositionAttributes, |s| {
        s.write_encoded_i32(composition.width);
        s.write_encoded_i32(composition.height);
        s.write_encoded_i64(composition.duration);
        s.write_f32(composition.frame_rate);
        composition.background_color.write_value(s);
    });
    for layer in &composition.layers {
        write_tag(stream, TagCode::LayerBlock, |s| write_layer(s, layer, gate));
    }
    write_end_tag(stream);
}

#[cfg(test)]
#[path = "../../tests/unit/tags/composition.rs"]
mod tests;
