use crate::codec::attributes::{AttributeKind as K, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_code::TagCode;
use crate::foundation::error::PagResult;
use crate::model::effect::{BlurDimensions, Effect, FastBlurEffect, GlowEffect, MosaicEffect};
use crate::tags::write_block;

const FAST_BLUR: &[K] = &[K::SimpleProperty, K::DiscreteProperty, K::DiscreteProperty];
const GLOW: &[K] = &[K::SimpleProperty, K::SimpleProperty, K::SimpleProperty];
const MOSAIC: &[K] = &[K::SimpleProperty, K::SimpleProperty, K::DiscreteProperty];

/// Decode an effect tag; `None` when `code` is not an effect this build reads.
pub(crate) fn read_effect(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
) -> PagResult<Option<Effect>> {
    let effect = match code {
        TagCode::FastBlurEffect => {
            let mut r = BlockReader::new(stream, FAST_BLUR)?;
            Effect::FastBlur(FastBlurEffect {
                blurriness: r.property(0.0)?,
                blur_dimensions: r.property(BlurDimensions::All)?,
                repeat_edge_pixels: r.property(false)?,
            })
        }
        TagCode::GlowEffect => {
            let mut r = BlockReader::new(stream, GLOW)?;
            Effect::Glow(GlowEffect {
                glow_threshold: r.property(1.0)?,
                glow_radius: r.property(0.0)?,
                glow_intensity: r.property(0.0)?,
            })
        }
        TagCode::MosaicEffect => {
            let mut r = BlockReader::new(stream, MOSAIC)?;
            Effect::Mosaic(MosaicEffect {
                horizontal_blocks: r.property(10)?,
                vertical_blocks: r.property(10)?,
                sharp_colors: r.property(true)?,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(effect))
}

pub(crate) fn write_effects(
    stream: &mut EncodeStream,
    effects: &[Effect],
    gate: &CompatibilityGate,
) {
    for effect in effects {
        let mut w = BlockWriter::new();
        let code = match effect {
            Effect::FastBlur(e) => {
                w.property(K::SimpleProperty, &e.blurriness, &0.0);
                w.property(K::DiscreteProperty, &e.blur_dimensions, &BlurDimensions::All);
                w.property(K::DiscreteProperty, &e.repeat_edge_pixels, &false);
                TagCode::FastBlurEffect
            }
            Effect::Glow(e) => {
                w.property(K::SimpleProperty, &e.glow_threshold, &1.0);
                w.property(K::SimpleProperty, &e.glow_radius, &0.0);
                w.property(K::SimpleProperty, &e.glow_intensity, &0.0);
                TagCode::GlowEffect
            }
            Effect::Mosaic(e) => {
                w.property(K::SimpleProperty, &e.horizontal_blocks, &10);
                w.property(K::SimpleProperty, &e.vertical_blocks, &10);
                w.property(K::DiscreteProperty, &e.sharp_colors, &true);
                TagCode::MosaicEffect
            }
        };
        if gate.admit(code) {
            write_block(stream, code, w);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tags/effect.rs"]
mod tests;
