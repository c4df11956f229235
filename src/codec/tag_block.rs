//! Framing of tag sequences.
//!
//! ```text
//! TagSequence ::= (code:varint length:varint payload)* End
//! End         ::= code=0, no length, no payload
//! ```
//!
//! Every payload is length-prefixed, so a reader can step over tags it does not know.

use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_code::TagCode;
use crate::foundation::error::PagResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagHeader {
    /// Raw wire code; may be newer than [`TagCode::MAX`].
    pub code: u32,
    pub length: u32,
}

impl TagHeader {
    pub fn is_end(&self) -> bool {
        self.code == u32::from(TagCode::End.ordinal())
    }
}

pub fn read_tag_header(stream: &mut DecodeStream<'_>) -> PagResult<TagHeader> {
    let code = stream.read_encoded_u32()?;
    if code == u32::from(TagCode::End.ordinal()) {
        return Ok(TagHeader { code, length: 0 });
    }
    let length = stream.read_encoded_u32()?;
    Ok(TagHeader { code, length })
}

/// Run a tag sequence through `handler` until the End tag.
///
/// `handler` returns `Ok(false)` for a tag it does not claim. Unknown and unclaimed tags are
/// skipped; a tag whose payload turns out to be corrupt is dropped and decoding continues with
/// the next tag. Failing to frame the sequence itself is returned to the caller.
pub fn read_tags<'a>(
    stream: &mut DecodeStream<'a>,
    mut handler: impl FnMut(TagCode, &mut DecodeStream<'a>) -> PagResult<bool>,
) -> PagResult<()> {
    loop {
        let header = read_tag_header(stream)?;
        if header.is_end() {
            return Ok(());
        }
        let mut payload = stream.read_bytes(header.length as usize)?;
        stream.note_tag_code(header.code);
        let Some(code) = TagCode::from_raw(header.code) else {
            tracing::debug!(
                code = header.code,
                length = header.length,
                "skipping unknown tag"
            );
            continue;
        };
        match handler(code, &mut payload) {
            Ok(true) => {}
            Ok(false) => tracing::debug!(tag = %code, "skipping unclaimed tag"),
            Err(err) if err.is_corrupt() => {
                tracing::warn!(tag = %code, error = %err, "dropping malformed tag");
            }
            Err(err) => return Err(err),
        }
    }
}

pub fn write_tag_header(stream: &mut EncodeStream, code: TagCode, length: u32) {
    stream.write_encoded_u32(u32::from(code.ordinal()));
    stream.write_encoded_u32(length);
}

/// Frame one tag: the payload is encoded into a scratch buffer first so its length is known.
pub fn write_tag(stream: &mut EncodeStream, code: TagCode, encode: impl FnOnce(&mut EncodeStream)) {
    let mut payload = EncodeStream::new();
    encode(&mut payload);
    write_tag_bytes(stream, code, payload.as_bytes());
}

pub fn write_tag_bytes(stream: &mut EncodeStream, code: TagCode, payload: &[u8]) {
    write_tag_header(stream, code, payload.len() as u32);
    stream.write_bytes(payload);
}

pub fn write_end_tag(stream: &mut EncodeStream) {
    stream.write_encoded_u32(u32::from(TagCode::End.ordinal()));
}

#[cfg(test)]
#[path = "../../tests/unit/codec/tag_block.rs"]
mod tests;
