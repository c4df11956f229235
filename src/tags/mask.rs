use crate::codec::attributes::{AttributeKind as K, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{OPAQUE, PathData, Point};
use crate::foundation::error::PagResult;
use crate::model::mask::{Mask, MaskMode};
use crate::tags::write_block;

const MASK: &[K] = &[
    K::BitFlag,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

const MASK_V2: &[K] = &[
    K::BitFlag,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::MultiDimensionProperty,
];

/// Decode a `MaskBlock` or `MaskBlockV2` payload.
pub(crate) fn read_mask(stream: &mut DecodeStream<'_>, code: TagCode) -> PagResult<Mask> {
    let with_feather = code == TagCode::MaskBlockV2;
    let mut r = BlockReader::new(stream, if with_feather { MASK_V2 } else { MASK })?;
    Ok(Mask {
        inverted: r.bit_flag()?,
        mode: r.value(MaskMode::Add)?,
        path: r.property(PathData::new())?,
        opacity: r.property(OPAQUE)?,
        expansion: r.property(0.0)?,
        feather: if with_feather {
            Some(r.property(Point::ZERO)?)
        } else {
            None
        },
    })
}

/// Write one mask, using the feather-carrying tag only when the feather matters.
pub(crate) fn write_mask(stream: &mut EncodeStream, mask: &Mask, gate: &CompatibilityGate) {
    let preference: &[TagCode] = if mask.has_feather() {
        &[TagCode::MaskBlockV2, TagCode::MaskBlock]
    } else {
        &[TagCode::MaskBlock]
    };
    let Some(code) = gate.select(preference) else {
        return;
    };
    let mut w = BlockWriter::new();
    w.bit_flag(mask.inverted);
    w.value(&mask.mode, &MaskMode::Add);
    w.property(K::SimpleProperty, &mask.path, &PathData::new());
    w.property(K::SimpleProperty, &mask.opacity, &OPAQUE);
    w.property(K::SimpleProperty, &mask.expansion, &0.0);
    if code == TagCode::MaskBlockV2
        && let Some(feather) = &mask.feather
    {
        w.property(K::MultiDimensionProperty, feather, &Point::ZERO);
    }
    write_block(stream, code, w);
}

#[cfg(test)]
#[path = "../../tests/unit/tags/mask.rs"]
mod tests;
