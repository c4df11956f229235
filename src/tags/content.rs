//! Tags that fill a layer's type-specific payload.

use crate::codec::attributes::{AttributeKind as K, AttributeValue, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::write_tag;
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{Color, Point};
use crate::foundation::error::PagResult;
use crate::model::layer::{
    CameraOption, DEFAULT_APERTURE, DEFAULT_BLUR_LEVEL, DEFAULT_CAMERA_ZOOM,
    DEFAULT_FOCUS_DISTANCE, ImageContent, ImageFillRule, LayerContent, PreComposeContent,
    ScaleMode, SolidContent,
};
use crate::tags::{shape, text, write_block};

const CAMERA: &[K] = &[
    K::SimpleProperty,
    K::DiscreteProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::MultiDimensionProperty,
];
const FILL_RULE: &[K] = &[K::Value];
const FILL_RULE_V2: &[K] = &[K::Value, K::SimpleProperty];

/// Apply a payload tag to `content`.
///
/// Returns `false` when the tag does not belong to this kind of layer, so the caller can skip it.
pub(crate) fn read_content_tag(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
    content: &mut LayerContent,
) -> PagResult<bool> {
    match (code, content) {
        (TagCode::SolidColor, LayerContent::Solid(solid)) => {
            *solid = SolidContent {
                color: Color::read_value(stream)?,
                width: stream.read_encoded_i32()?,
                height: stream.read_encoded_i32()?,
            };
        }
        (TagCode::ImageReference, LayerContent::Image(image)) => {
            image.image_id = Some(stream.read_encoded_u32()?);
        }
        (TagCode::ImageFillRule | TagCode::ImageFillRuleV2, LayerContent::Image(image)) => {
            let with_remap = code == TagCode::ImageFillRuleV2;
            let kinds = if with_remap { FILL_RULE_V2 } else { FILL_RULE };
            let mut r = BlockReader::new(stream, kinds)?;
            image.fill_rule = Some(ImageFillRule {
                scale_mode: r.value(ScaleMode::LetterBox)?,
                time_remap: if with_remap {
                    r.optional_property()?
                } else {
                    None
                },
            });
        }
        (TagCode::CompositionReference, LayerContent::PreCompose(pre)) => {
            *pre = PreComposeContent {
                composition_id: Some(stream.read_encoded_u32()?),
                composition_start_time: stream.read_encoded_i64()?,
            };
        }
        (TagCode::CameraOption, LayerContent::Camera(camera)) => {
            let mut r = BlockReader::new(stream, CAMERA)?;
            *camera = CameraOption {
                zoom: r.property(DEFAULT_CAMERA_ZOOM)?,
                depth_of_field: r.property(false)?,
                focus_distance: r.property(DEFAULT_FOCUS_DISTANCE)?,
                aperture: r.property(DEFAULT_APERTURE)?,
                blur_level: r.property(DEFAULT_BLUR_LEVEL)?,
                iris_rotation: r.property(0.0)?,
                highlight: r.property(Point::ZERO)?,
            };
        }
        (_, LayerContent::Text(text)) => return text::read_text_tag(stream, code, text),
        _ => return Ok(false),
    }
    Ok(true)
}

/// Write the payload tags of `content`. Null and unknown layers have none.
pub(crate) fn write_content(
    stream: &mut EncodeStream,
    content: &LayerContent,
    gate: &CompatibilityGate,
) {
    match content {
        LayerContent::Unknown | LayerContent::Null => {}
        LayerContent::Solid(solid) => {
            if gate.admit(TagCode::SolidColor) {
                write_tag(stream, TagCode::SolidColor, |s| {
                    solid.color.write_value(s);
                    s.write_encoded_i32(solid.width);
                    s.write_encoded_i32(solid.height);
                });
            }
        }
        LayerContent::Text(content) => text::write_text(stream, content, gate),
        LayerContent::Shape(content) => shape::write_shapes(stream, &content.contents, gate),
        LayerContent::Image(image) => write_image(stream, image, gate),
        LayerContent::PreCompose(pre) => {
            if let Some(id) = pre.composition_id
                && gate.admit(TagCode::CompositionReference)
            {
                write_tag(stream, TagCode::CompositionReference, |s| {
                    s.write_encoded_u32(id);
                    s.write_encoded_i64(pre.composition_start_time);
                });
            }
        }
        LayerContent::Camera(camera) => {
            if gate.admit(TagCode::CameraOption) {
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &camera.zoom, &DEFAULT_CAMERA_ZOOM);
                w.property(K::DiscreteProperty, &camera.depth_of_field, &false);
                w.property(K::SimpleProperty, &camera.focus_distance, &DEFAULT_FOCUS_DISTANCE);
                w.property(K::SimpleProperty, &camera.aperture, &DEFAULT_APERTURE);
                w.property(K::SimpleProperty, &camera.blur_level, &DEFAULT_BLUR_LEVEL);
                w.property(K::SimpleProperty, &camera.iris_rotation, &0.0);
                w.property(K::MultiDimensionProperty, &camera.highlight, &Point::ZERO);
                write_block(stream, TagCode::CameraOption, w);
            }
        }
    }
}

fn write_image(stream: &mut EncodeStream, image: &ImageContent, gate: &CompatibilityGate) {
    if let Some(id) = image.image_id
        && gate.admit(TagCode::ImageReference)
    {
        write_tag(stream, TagCode::ImageReference, |s| s.write_encoded_u32(id));
    }
    let Some(rule) = image.fill_rule.as_ref().filter(|rule| !rule.is_default()) else {
        return;
    };
    let preference: &[TagCode] = if rule.time_remap.is_some() {
        &[TagCode::ImageFillRuleV2, TagCode::ImageFillRule]
    } else {
        &[TagCode::ImageFillRule]
    };
    let Some(code) = gate.select(preference) else {
        return;
    };
    let mut w = BlockWriter::new();
    w.value(&rule.scale_mode, &ScaleMode::LetterBox);
    if code == TagCode::ImageFillRuleV2 {
        w.optional_property(K::SimpleProperty, rule.time_remap.as_ref());
    }
    write_block(stream, code, w);
}

#[cfg(test)]
#[path = "../../tests/unit/tags/content.rs"]
mod tests;
