use crate::codec::compat::CompatibilityGate;
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::write_tag;
use crate::codec::tag_code::TagCode;
use crate::foundation::error::{PagError, PagResult};
use crate::model::marker::Marker;

pub(crate) fn read_markers(stream: &mut DecodeStream<'_>) -> PagResult<Vec<Marker>> {
    let count = stream.read_encoded_u32()? as usize;
    // start time, duration and comment take at least one byte each
    if count > stream.bytes_available() / 3 {
        return Err(PagError::corrupt(format!("marker count {count} exceeds payload")));
    }
    let mut markers = Vec::with_capacity(count);
    for _ in 0..count {
        markers.push(Marker {
            start_time: stream.read_encoded_i64()?,
            duration: stream.read_encoded_i64()?,
            comment: stream.read_utf8_string()?,
        });
    }
    Ok(markers)
}

pub(crate) fn write_markers(
    stream: &mut EncodeStream,
    markers: &[Marker],
    gate: &CompatibilityGate,
) {
    if markers.is_empty() || !gate.admit(TagCode::MarkerList) {
        return;
    }
    write_tag(stream, TagCode::MarkerList, |s| {
        s.write_encoded_u32(markers.len() as u32);
        for marker in markers {
            s.write_encoded_i64(marker.start_time);
            s.write_encoded_i64(marker.duration);
            s.write_utf8_string(&marker.comment);
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/tags/marker.rs"]
mod tests;
