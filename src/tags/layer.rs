//! Layer blocks.
//!
//! ```text
//! Layer ::= layerType:u8 id:varint TagSequence
//! ```
//!
//! The encoder always picks the smallest tag variants that still carry the layer's state, so
//! a decoded layer re-encodes to the same bytes.

use crate::codec::attributes::{AttributeKind as K, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::{read_tags, write_end_tag, write_tag};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{BlendMode, Frame, Id, Ratio};
use crate::foundation::error::PagResult;
use crate::model::layer::{
    CachePolicy, Layer, LayerContent, LayerTransform, LayerType, TrackMatteType,
};
use crate::model::property::Property;
use crate::model::transform::Transform2D;
use crate::tags::content::{read_content_tag, write_content};
use crate::tags::effect::{read_effect, write_effects};
use crate::tags::marker::{read_markers, write_markers};
use crate::tags::mask::{read_mask, write_mask};
use crate::tags::shape::read_shape;
use crate::tags::style::{read_layer_style, write_layer_styles};
use crate::tags::transform::{
    read_transform_2d, read_transform_3d, write_transform_2d, write_transform_3d,
};
use crate::tags::write_block;

const ATTRIBUTES: &[K] = &[
    K::BitFlag,
    K::BitFlag,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::FixedValue,
];
const ATTRIBUTES_V2: &[K] = &[
    K::BitFlag,
    K::BitFlag,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::FixedValue,
    K::Value,
];
const ATTRIBUTES_V3: &[K] = &[
    K::BitFlag,
    K::BitFlag,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::Value,
    K::SimpleProperty,
    K::FixedValue,
    K::Value,
    K::BitFlag,
];
const ATTRIBUTES_EXTRA: &[K] = &[K::BitFlag, K::Value];

/// Decode one layer block: type byte, id, then the layer's tag sequence.
///
/// An unknown type byte yields a layer with [`LayerContent::Unknown`]; its common tags are still
/// read. Tags that do not apply to the layer's type are skipped.
pub fn read_layer(stream: &mut DecodeStream<'_>) -> PagResult<Layer> {
    let layer_type = stream.read_u8()?;
    let id = stream.read_encoded_u32()?;
    let mut layer = Layer::new(id, LayerType::from_u8(layer_type));
    if layer.layer_type().to_u8() != layer_type {
        tracing::debug!(layer = id, layer_type, "unknown layer type");
    }
    read_tags(stream, |code, payload| {
        match code {
            TagCode::LayerAttributes | TagCode::LayerAttributesV2 | TagCode::LayerAttributesV3 => {
                read_attributes(payload, code, &mut layer)?;
            }
            TagCode::LayerAttributesExtra => {
                let mut r = BlockReader::new(payload, ATTRIBUTES_EXTRA)?;
                layer.motion_blur = r.bit_flag()?;
                layer.name = r.value(String::new())?;
            }
            TagCode::MaskBlock | TagCode::MaskBlockV2 => {
                layer.masks.push(read_mask(payload, code)?);
            }
            TagCode::MarkerList => layer.markers = read_markers(payload)?,
            TagCode::Transform2D => {
                // a 3D transform takes precedence wherever it appears
                if !matches!(layer.transform, LayerTransform::ThreeD(_)) {
                    layer.transform = LayerTransform::TwoD(read_transform_2d(payload)?);
                }
            }
            TagCode::Transform3D => {
                layer.transform = LayerTransform::ThreeD(read_transform_3d(payload)?);
            }
            TagCode::CachePolicy => {
                layer.cache_policy = CachePolicy::from_u8(payload.read_u8()?);
            }
            _ => return read_secondary(payload, code, &mut layer),
        }
        Ok(true)
    })?;
    Ok(layer)
}

/// Type payload first, then effects, styles and, for shape layers, shape content.
fn read_secondary(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
    layer: &mut Layer,
) -> PagResult<bool> {
    if read_content_tag(stream, code, &mut layer.content)? {
        return Ok(true);
    }
    if let Some(effect) = read_effect(stream, code)? {
        layer.effects.push(effect);
        return Ok(true);
    }
    if let Some(style) = read_layer_style(stream, code)? {
        layer.layer_styles.push(style);
        return Ok(true);
    }
    if let LayerContent::Shape(shape) = &mut layer.content
        && let Some(element) = read_shape(stream, code)?
    {
        shape.contents.push(element);
        return Ok(true);
    }
    Ok(false)
}

/// Fields carried by the base attribute tags.
struct Attributes {
    is_active: bool,
    auto_orientation: bool,
    parent: Option<Id>,
    stretch: Ratio,
    start_time: Frame,
    blend_mode: BlendMode,
    track_matte_type: TrackMatteType,
    time_remap: Option<Property<f32>>,
    duration: Frame,
    name: Option<String>,
    motion_blur: Option<bool>,
}

impl Attributes {
    fn apply(self, layer: &mut Layer) {
        layer.is_active = self.is_active;
        layer.auto_orientation = self.auto_orientation;
        layer.parent = self.parent;
        layer.stretch = self.stretch;
        layer.start_time = self.start_time;
        layer.blend_mode = self.blend_mode;
        layer.track_matte_type = self.track_matte_type;
        layer.time_remap = self.time_remap;
        layer.duration = self.duration;
        if let Some(name) = self.name {
            layer.name = name;
        }
        if let Some(motion_blur) = self.motion_blur {
            layer.motion_blur = motion_blur;
        }
        if layer.duration <= 0 {
            tracing::debug!(
                layer = layer.id,
                duration = layer.duration,
                "repairing layer duration"
            );
            layer.duration = 1;
        }
    }
}

/// Decode a base attribute block. The layer is only touched once the whole block has been read.
fn read_attributes(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
    layer: &mut Layer,
) -> PagResult<()> {
    let kinds = match code {
        TagCode::LayerAttributesV2 => ATTRIBUTES_V2,
        TagCode::LayerAttributesV3 => ATTRIBUTES_V3,
        _ => ATTRIBUTES,
    };
    let mut r = BlockReader::new(stream, kinds)?;
    let attributes = Attributes {
        is_active: r.bit_flag()?,
        auto_orientation: r.bit_flag()?,
        parent: r.optional_value()?,
        stretch: r.value(Ratio::ONE)?,
        start_time: r.value(0)?,
        blend_mode: r.value(BlendMode::Normal)?,
        track_matte_type: r.value(TrackMatteType::None)?,
        time_remap: r.optional_property()?,
        duration: r.fixed::<Frame>()?,
        name: if code != TagCode::LayerAttributes {
            Some(r.value(String::new())?)
        } else {
            None
        },
        motion_blur: if code == TagCode::LayerAttributesV3 {
            Some(r.bit_flag()?)
        } else {
            None
        },
    };
    attributes.apply(layer);
    Ok(())
}

/// Encode one layer block, End tag included.
pub fn write_layer(stream: &mut EncodeStream, layer: &Layer, gate: &CompatibilityGate) {
    stream.write_u8(layer.layer_type().to_u8());
    stream.write_encoded_u32(layer.id);
    write_attributes(stream, layer, gate);
    for mask in &layer.masks {
        write_mask(stream, mask, gate);
    }
    write_markers(stream, &layer.markers, gate);
    match &layer.transform {
        LayerTransform::TwoD(t) => {
            // the default transform is what a missing tag decodes to
            if t.canonical() != Transform2D::default() && gate.admit(TagCode::Transform2D) {
                write_transform_2d(stream, t);
            }
        }
        LayerTransform::ThreeD(t) => {
            if gate.admit(TagCode::Transform3D) {
                write_transform_3d(stream, t);
            }
        }
    }
    write_effects(stream, &layer.effects, gate);
    write_layer_styles(stream, &layer.layer_styles, gate);
    if layer.cache_policy != CachePolicy::Auto && gate.admit(TagCode::CachePolicy) {
        write_tag(stream, TagCode::CachePolicy, |s| s.write_u8(layer.cache_policy.to_u8()));
    }
    write_content(stream, &layer.content, gate);
    write_end_tag(stream);
}

/// Base attributes, never gated. Motion blur rides in the extra tag, which also carries the
/// name; when the gate rejects it the name falls back to the second generation tag.
fn write_attributes(stream: &mut EncodeStream, layer: &Layer, gate: &CompatibilityGate) {
    let with_extra = layer.motion_blur && gate.admit(TagCode::LayerAttributesExtra);
    let code = if with_extra || layer.name.is_empty() {
        TagCode::LayerAttributes
    } else {
        gate.select(&[TagCode::LayerAttributesV2])
            .unwrap_or(TagCode::LayerAttributes)
    };
    let mut w = BlockWriter::new();
    w.bit_flag(layer.is_active);
    w.bit_flag(layer.auto_orientation);
    w.optional_value(layer.parent.as_ref());
    w.value(&layer.stretch, &Ratio::ONE);
    w.value(&layer.start_time, &0);
    w.value(&layer.blend_mode, &BlendMode::Normal);
    w.value(&layer.track_matte_type, &TrackMatteType::None);
    w.optional_property(K::SimpleProperty, layer.time_remap.as_ref());
    w.fixed(&layer.duration);
    if code == TagCode::LayerAttributesV2 {
        w.value(&layer.name, &String::new());
    }
    write_block(stream, code, w);
    if with_extra {
        let mut w = BlockWriter::new();
        w.bit_flag(true);
        w.value(&layer.name, &String::new());
        write_block(stream, TagCode::LayerAttributesExtra, w);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tags/layer.rs"]
mod tests;
