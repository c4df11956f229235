//! Per-entity tag codecs built on [`crate::codec`].
//!
//! Readers take the payload stream of one tag; writers append complete tags (header included)
//! to the parent's stream and consult the compatibility gate for every optional tag.

use crate::codec::attributes::BlockWriter;
use crate::codec::stream::EncodeStream;
use crate::codec::tag_block::write_tag_bytes;
use crate::codec::tag_code::TagCode;

pub mod composition;
pub(crate) mod content;
pub(crate) mod effect;
pub mod file;
pub mod layer;
pub(crate) mod marker;
pub(crate) mod mask;
pub(crate) mod shape;
pub(crate) mod style;
pub(crate) mod text;
pub(crate) mod transform;

pub(crate) fn write_block(stream: &mut EncodeStream, code: TagCode, block: BlockWriter) {
    write_tag_bytes(stream, code, &block.finish());
}
