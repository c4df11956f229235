use crate::codec::attributes::{AttributeKind as K, AttributeValue, BlockReader, BlockWriter};
use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::{read_tags, write_end_tag, write_tag_bytes};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::Point;
use crate::foundation::error::PagResult;
use crate::model::layer::TextContent;
use crate::model::property::Property;
use crate::model::text::{
    AnchorPointGrouping, SelectorBasedOn, SelectorMode, SelectorShape, SelectorUnits,
    TextAnimator, TextDocument, TextMoreOption, TextPathOption, TextRangeSelector, TextSelector,
    TextWigglySelector,
};
use crate::tags::write_block;

/// A text document in the layout of one `TextSource` generation.
///
/// Version 2 adds the background, version 3 the writing direction.
#[derive(Clone, Debug, PartialEq)]
struct VersionedDocument<const V: u8>(TextDocument);

fn document_kinds(version: u8) -> Vec<K> {
    let mut kinds = vec![K::BitFlag; 6];
    kinds.extend([K::Value; 12]);
    if version >= 2 {
        kinds.extend([K::Value; 2]);
    }
    if version >= 3 {
        kinds.push(K::Value);
    }
    kinds.extend([K::FixedValue; 2]);
    kinds
}

impl<const V: u8> AttributeValue for VersionedDocument<V> {
    fn read_value(stream: &mut DecodeStream<'_>) -> PagResult<Self> {
        let kinds = document_kinds(V);
        let mut r = BlockReader::new(stream, &kinds)?;
        let d = TextDocument::default();
        let mut doc = TextDocument {
            apply_fill: r.bit_flag()?,
            apply_stroke: r.bit_flag()?,
            box_text: r.bit_flag()?,
            faux_bold: r.bit_flag()?,
            faux_italic: r.bit_flag()?,
            stroke_over_fill: r.bit_flag()?,
            baseline_shift: r.value(d.baseline_shift)?,
            first_baseline: r.value(d.first_baseline)?,
            box_text_pos: r.value(d.box_text_pos)?,
            box_text_size: r.value(d.box_text_size)?,
            fill_color: r.value(d.fill_color)?,
            font_size: r.value(d.font_size)?,
            stroke_color: r.value(d.stroke_color)?,
            stroke_width: r.value(d.stroke_width)?,
            text: r.value(String::new())?,
            justification: r.value(d.justification)?,
            leading: r.value(d.leading)?,
            tracking: r.value(d.tracking)?,
            ..TextDocument::default()
        };
        if V >= 2 {
            doc.background_color = r.value(d.background_color)?;
            doc.background_alpha = r.value(d.background_alpha)?;
        }
        if V >= 3 {
            doc.direction = r.value(d.direction)?;
        }
        doc.font_family = r.fixed()?;
        doc.font_style = r.fixed()?;
        Ok(Self(doc))
    }

    fn write_value(&self, stream: &mut EncodeStream) {
        let doc = &self.0;
        let d = TextDocument::default();
        let mut w = BlockWriter::new();
        w.bit_flag(doc.apply_fill);
        w.bit_flag(doc.apply_stroke);
        w.bit_flag(doc.box_text);
        w.bit_flag(doc.faux_bold);
        w.bit_flag(doc.faux_italic);
        w.bit_flag(doc.stroke_over_fill);
        w.value(&doc.baseline_shift, &d.baseline_shift);
        w.value(&doc.first_baseline, &d.first_baseline);
        w.value(&doc.box_text_pos, &d.box_text_pos);
        w.value(&doc.box_text_size, &d.box_text_size);
        w.value(&doc.fill_color, &d.fill_color);
        w.value(&doc.font_size, &d.font_size);
        w.value(&doc.stroke_color, &d.stroke_color);
        w.value(&doc.stroke_width, &d.stroke_width);
        w.value(&doc.text, &d.text);
        w.value(&doc.justification, &d.justification);
        w.value(&doc.leading, &d.leading);
        w.value(&doc.tracking, &d.tracking);
        if V >= 2 {
            w.value(&doc.background_color, &d.background_color);
            w.value(&doc.background_alpha, &d.background_alpha);
        }
        if V >= 3 {
            w.value(&doc.direction, &d.direction);
        }
        w.fixed(&doc.font_family);
        w.fixed(&doc.font_style);
        stream.write_bytes(&w.finish());
    }
}

fn read_source<const V: u8>(stream: &mut DecodeStream<'_>) -> PagResult<Property<TextDocument>> {
    let mut r = BlockReader::new(stream, &[K::DiscreteProperty])?;
    let source: Property<VersionedDocument<V>> =
        r.property(VersionedDocument(TextDocument::default()))?;
    Ok(source.map(|doc| doc.0.clone()))
}

fn write_source<const V: u8>(
    stream: &mut EncodeStream,
    code: TagCode,
    source: &Property<TextDocument>,
) {
    let versioned = source.map(|doc| VersionedDocument::<V>(doc.clone()));
    let mut w = BlockWriter::new();
    w.property(
        K::DiscreteProperty,
        &versioned,
        &VersionedDocument(TextDocument::default()),
    );
    write_block(stream, code, w);
}

const PATH_OPTION: &[K] = &[
    K::Value,
    K::DiscreteProperty,
    K::DiscreteProperty,
    K::DiscreteProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];
const MORE_OPTION: &[K] = &[K::Value, K::MultiDimensionProperty];
const RANGE_SELECTOR: &[K] = &[
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::Value,
    K::Value,
    K::DiscreteProperty,
    K::SimpleProperty,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::BitFlag,
    K::SimpleProperty,
];
const WIGGLY_SELECTOR: &[K] = &[
    K::DiscreteProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::Value,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::DiscreteProperty,
    K::SimpleProperty,
];

/// Apply a text-layer tag to `text`. Returns `false` for tags that are not text tags.
pub(crate) fn read_text_tag(
    stream: &mut DecodeStream<'_>,
    code: TagCode,
    text: &mut TextContent,
) -> PagResult<bool> {
    match code {
        TagCode::TextSource => text.source_text = read_source::<1>(stream)?,
        TagCode::TextSourceV2 => text.source_text = read_source::<2>(stream)?,
        TagCode::TextSourceV3 => text.source_text = read_source::<3>(stream)?,
        TagCode::TextPathOption => text.path_option = Some(read_path_option(stream)?),
        TagCode::TextMoreOption => {
            let mut r = BlockReader::new(stream, MORE_OPTION)?;
            text.more_option = Some(TextMoreOption {
                anchor_point_grouping: r.value(AnchorPointGrouping::Character)?,
                grouping_alignment: r.property(Point::ZERO)?,
            });
        }
        TagCode::TextAnimator => text.animators.push(read_animator(stream)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_path_option(stream: &mut DecodeStream<'_>) -> PagResult<TextPathOption> {
    let mut r = BlockReader::new(stream, PATH_OPTION)?;
    Ok(TextPathOption {
        path_mask: r.optional_value()?,
        reversed_path: r.property(false)?,
        perpendicular_to_path: r.property(true)?,
        force_alignment: r.property(false)?,
        first_margin: r.property(0.0)?,
        last_margin: r.property(0.0)?,
    })
}

fn read_animator(stream: &mut DecodeStream<'_>) -> PagResult<TextAnimator> {
    let mut animator = TextAnimator::default();
    read_tags(stream, |code, payload| {
        match code {
            TagCode::TextRangeSelector => animator
                .selectors
                .push(TextSelector::Range(read_range_selector(payload)?)),
            TagCode::TextWigglySelector => animator
                .selectors
                .push(TextSelector::Wiggly(read_wiggly_selector(payload)?)),
            TagCode::TextAnimatorPropertiesTrackingType => {
                animator.tracking_type = read_single(payload, K::DiscreteProperty)?;
            }
            TagCode::TextAnimatorPropertiesTrackingAmount => {
                animator.tracking_amount = read_single(payload, K::SimpleProperty)?;
            }
            TagCode::TextAnimatorPropertiesFillColor => {
                animator.fill_color = read_single(payload, K::SimpleProperty)?;
            }
            TagCode::TextAnimatorPropertiesStrokeColor => {
                animator.stroke_color = read_single(payload, K::SimpleProperty)?;
            }
            TagCode::TextAnimatorPropertiesPosition => {
                animator.position = read_single(payload, K::SpatialProperty)?;
            }
            TagCode::TextAnimatorPropertiesScale => {
                animator.scale = read_single(payload, K::MultiDimensionProperty)?;
            }
            TagCode::TextAnimatorPropertiesRotation => {
                animator.rotation = read_single(payload, K::SimpleProperty)?;
            }
            TagCode::TextAnimatorPropertiesOpacity => {
                animator.opacity = read_single(payload, K::SimpleProperty)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(animator)
}

fn read_single<T: AttributeValue>(
    stream: &mut DecodeStream<'_>,
    kind: K,
) -> PagResult<Option<Property<T>>> {
    BlockReader::new(stream, &[kind])?.optional_property()
}

fn read_range_selector(stream: &mut DecodeStream<'_>) -> PagResult<TextRangeSelector> {
    let mut r = BlockReader::new(stream, RANGE_SELECTOR)?;
    Ok(TextRangeSelector {
        start: r.property(0.0)?,
        end: r.property(1.0)?,
        offset: r.property(0.0)?,
        units: r.value(SelectorUnits::Percentage)?,
        based_on: r.value(SelectorBasedOn::Characters)?,
        mode: r.property(SelectorMode::Add)?,
        amount: r.property(1.0)?,
        shape: r.value(SelectorShape::Square)?,
        smoothness: r.property(1.0)?,
        ease_high: r.property(0.0)?,
        ease_low: r.property(0.0)?,
        randomize_order: r.bit_flag()?,
        random_seed: r.property(0)?,
    })
}

fn read_wiggly_selector(stream: &mut DecodeStream<'_>) -> PagResult<TextWigglySelector> {
    let mut r = BlockReader::new(stream, WIGGLY_SELECTOR)?;
    Ok(TextWigglySelector {
        mode: r.property(SelectorMode::Intersect)?,
        max_amount: r.property(1.0)?,
        min_amount: r.property(-1.0)?,
        based_on: r.value(SelectorBasedOn::Characters)?,
        wiggles_per_second: r.property(2.0)?,
        correlation: r.property(0.5)?,
        temporal_phase: r.property(0.0)?,
        spatial_phase: r.property(0.0)?,
        lock_dimensions: r.property(false)?,
        random_seed: r.property(0)?,
    })
}

/// Write every tag of a text layer's payload.
///
/// The source uses the oldest `TextSource` generation that still carries every field in use,
/// falling back to older ones when the gate requires it.
pub(crate) fn write_text(
    stream: &mut EncodeStream,
    text: &TextContent,
    gate: &CompatibilityGate,
) {
    let preference: &[TagCode] = if text.uses_direction() {
        &[TagCode::TextSourceV3, TagCode::TextSourceV2, TagCode::TextSource]
    } else if text.uses_background() {
        &[TagCode::TextSourceV2, TagCode::TextSource]
    } else {
        &[TagCode::TextSource]
    };
    let source = &text.source_text;
    match gate.select(preference) {
        Some(code @ TagCode::TextSourceV3) => write_source::<3>(stream, code, source),
        Some(code @ TagCode::TextSourceV2) => write_source::<2>(stream, code, source),
        Some(code) => write_source::<1>(stream, code, source),
        None => {}
    }
    if let Some(option) = &text.path_option
        && option.path_mask.is_some()
        && gate.admit(TagCode::TextPathOption)
    {
        let mut w = BlockWriter::new();
        w.optional_value(option.path_mask.as_ref());
        w.property(K::DiscreteProperty, &option.reversed_path, &false);
        w.property(K::DiscreteProperty, &option.perpendicular_to_path, &true);
        w.property(K::DiscreteProperty, &option.force_alignment, &false);
        w.property(K::SimpleProperty, &option.first_margin, &0.0);
        w.property(K::SimpleProperty, &option.last_margin, &0.0);
        write_block(stream, TagCode::TextPathOption, w);
    }
    if let Some(option) = &text.more_option
        && gate.admit(TagCode::TextMoreOption)
    {
        let mut w = BlockWriter::new();
        w.value(&option.anchor_point_grouping, &AnchorPointGrouping::Character);
        w.property(K::MultiDimensionProperty, &option.grouping_alignment, &Point::ZERO);
        write_block(stream, TagCode::TextMoreOption, w);
    }
    if gate.admit(TagCode::TextAnimator) {
        for animator in &text.animators {
            write_animator(stream, animator, gate);
        }
    }
}

fn write_animator(stream: &mut EncodeStream, animator: &TextAnimator, gate: &CompatibilityGate) {
    let mut payload = EncodeStream::new();
    for selector in &animator.selectors {
        match selector {
            TextSelector::Range(s) if gate.admit(TagCode::TextRangeSelector) => {
                let mut w = BlockWriter::new();
                w.property(K::SimpleProperty, &s.start, &0.0);
                w.property(K::SimpleProperty, &s.end, &1.0);
                w.property(K::SimpleProperty, &s.offset, &0.0);
                w.value(&s.units, &SelectorUnits::Percentage);
                w.value(&s.based_on, &SelectorBasedOn::Characters);
                w.property(K::DiscreteProperty, &s.mode, &SelectorMode::Add);
                w.property(K::SimpleProperty, &s.amount, &1.0);
                w.value(&s.shape, &SelectorShape::Square);
                w.property(K::SimpleProperty, &s.smoothness, &1.0);
                w.property(K::SimpleProperty, &s.ease_high, &0.0);
                w.property(K::SimpleProperty, &s.ease_low, &0.0);
                w.bit_flag(s.randomize_order);
                w.property(K::SimpleProperty, &s.random_seed, &0);
                write_block(&mut payload, TagCode::TextRangeSelector, w);
            }
            TextSelector::Wiggly(s) if gate.admit(TagCode::TextWigglySelector) => {
                let mut w = BlockWriter::new();
                w.property(K::DiscreteProperty, &s.mode, &SelectorMode::Intersect);
                w.property(K::SimpleProperty, &s.max_amount, &1.0);
                w.property(K::SimpleProperty, &s.min_amount, &-1.0);
                w.value(&s.based_on, &SelectorBasedOn::Characters);
                w.property(K::SimpleProperty, &s.wiggles_per_second, &2.0);
                w.property(K::SimpleProperty, &s.correlation, &0.5);
                w.property(K::SimpleProperty, &s.temporal_phase, &0.0);
                w.property(K::SimpleProperty, &s.spatial_phase, &0.0);
                w.property(K::DiscreteProperty, &s.lock_dimensions, &false);
                w.property(K::SimpleProperty, &s.random_seed, &0);
                write_block(&mut payload, TagCode::TextWigglySelector, w);
            }
            _ => {}
        }
    }
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesTrackingType,
        K::DiscreteProperty,
        animator.tracking_type.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesTrackingAmount,
        K::SimpleProperty,
        animator.tracking_amount.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesFillColor,
        K::SimpleProperty,
        animator.fill_color.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesStrokeColor,
        K::SimpleProperty,
        animator.stroke_color.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesPosition,
        K::SpatialProperty,
        animator.position.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesScale,
        K::MultiDimensionProperty,
        animator.scale.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesRotation,
        K::SimpleProperty,
        animator.rotation.as_ref(),
        gate,
    );
    write_single(
        &mut payload,
        TagCode::TextAnimatorPropertiesOpacity,
        K::SimpleProperty,
        animator.opacity.as_ref(),
        gate,
    );
    write_end_tag(&mut payload);
    write_tag_bytes(stream, TagCode::TextAnimator, payload.as_bytes());
}

/// One animator property tag; absent properties write no tag at all.
fn write_single<T: AttributeValue>(
    stream: &mut EncodeStream,
    code: TagCode,
    kind: K,
    property: Option<&Property<T>>,
    gate: &CompatibilityGate,
) {
    if property.is_none() || !gate.admit(code) {
        return;
    }
    let mut w = BlockWriter::new();
    w.optional_property(kind, property);
    write_block(stream, code, w);
}

#[cfg(test)]
#[path = "../../tests/unit/tags/text.rs"]
mod tests;
