//! The file container.
//!
//! ```text
//! File ::= 'P' 'A' 'G' version:u8 bodyLength:u32 compression:u8 TagSequence
//! ```
//!
//! File-level tags are compositions and image assets; everything else is skipped.

use crate::codec::compat::{CURRENT_VERSION, CompatibilityGate, EncodeOptions};
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_block::{read_tags, write_end_tag, write_tag};
use crate::codec::tag_code::TagCode;
use crate::foundation::error::{PagError, PagResult};
use crate::model::composition::{File, ImageAsset};
use crate::tags::composition::{read_composition, write_composition};

pub const MAGIC: [u8; 3] = *b"PAG";

/// Magic, version, body length and compression.
pub const HEADER_LEN: usize = 9;

/// Shortest input worth parsing.
pub const MIN_FILE_LEN: usize = 11;

const COMPRESSION_NONE: u8 = 0;

/// Decode a complete file.
///
/// References between layers, compositions and images are resolved once everything is read;
/// dangling ones are dropped. The result must contain at least one composition.
#[tracing::instrument(skip_all, fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> PagResult<File> {
    if bytes.len() < MIN_FILE_LEN {
        return Err(PagError::header(format!(
            "{} bytes is too short for a file",
            bytes.len()
        )));
    }
    let mut header = DecodeStream::new(bytes);
    let magic = [header.read_u8()?, header.read_u8()?, header.read_u8()?];
    if magic != MAGIC {
        return Err(PagError::header("missing PAG signature"));
    }
    let version = header.read_u8()?;
    if version > CURRENT_VERSION {
        return Err(PagError::header(format!(
            "file version {version} is newer than {CURRENT_VERSION}"
        )));
    }
    let body_len = header.read_u32()? as usize;
    let compression = header.read_u8()?;
    if compression != COMPRESSION_NONE {
        return Err(PagError::header(format!(
            "unsupported compression method {compression}"
        )));
    }
    let available = header.bytes_available();
    if body_len > available {
        tracing::debug!(body_len, available, "clamping body length");
    }
    let mut body = header.read_bytes(body_len.min(available))?;

    let mut file = File {
        version,
        ..File::default()
    };
    read_tags(&mut body, |code, payload| {
        match code {
            TagCode::VectorCompositionBlock => {
                file.compositions.push(read_composition(payload)?);
            }
            TagCode::ImageBytes | TagCode::ImageBytesV2 | TagCode::ImageBytesV3 => {
                file.images.push(read_image(payload, code)?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    file.tag_level = body.tag_level();
    file.resolve_references();
    file.verify()?;
    tracing::debug!(
        compositions = file.compositions.len(),
        layers = file.layer_count(),
        tag_level = file.tag_level,
        "decoded file"
    );
    Ok(file)
}

/// `ImageBytes` carries the id and the encoded bitmap. `V2` adds the scale factor and `V3` the
/// original bounds of a bitmap whose transparent border was stripped.
fn read_image(stream: &mut DecodeStream<'_>, code: TagCode) -> PagResult<ImageAsset> {
    let mut image = ImageAsset {
        id: stream.read_encoded_u32()?,
        bytes: stream.read_byte_data()?,
        ..ImageAsset::default()
    };
    if code != TagCode::ImageBytes {
        image.scale_factor = stream.read_f32()?;
    }
    if code == TagCode::ImageBytesV3 {
        image.width = stream.read_encoded_i32()?;
        image.height = stream.read_encoded_i32()?;
        image.anchor_x = stream.read_encoded_i32()?;
        image.anchor_y = stream.read_encoded_i32()?;
    }
    Ok(image)
}

fn write_image(stream: &mut EncodeStream, image: &ImageAsset, gate: &CompatibilityGate) {
    let preference: &[TagCode] = if image.is_stripped() {
        &[TagCode::ImageBytesV3, TagCode::ImageBytesV2, TagCode::ImageBytes]
    } else if image.is_scaled() {
        &[TagCode::ImageBytesV2, TagCode::ImageBytes]
    } else {
        &[TagCode::ImageBytes]
    };
    let Some(code) = gate.select(preference) else {
        return;
    };
    write_tag(stream, code, |s| {
        s.write_encoded_u32(image.id);
        s.write_byte_data(&image.bytes);
        if code != TagCode::ImageBytes {
            s.write_f32(image.scale_factor);
        }
        if code == TagCode::ImageBytesV3 {
            s.write_encoded_i32(image.width);
            s.write_encoded_i32(image.height);
            s.write_encoded_i32(image.anchor_x);
            s.write_encoded_i32(image.anchor_y);
        }
    });
}

/// Encode `file` at the current format version, omitting whatever `gate` rejects.
pub fn encode(file: &File, gate: &CompatibilityGate) -> Vec<u8> {
    encode_version(file, gate, CURRENT_VERSION)
}

/// Encode with options loaded from configuration.
pub fn encode_with_options(file: &File, options: &EncodeOptions) -> PagResult<Vec<u8>> {
    options.validate()?;
    let gate = options.gate.resolve()?;
    Ok(encode_version(file, &gate, options.version))
}

#[tracing::instrument(skip_all, fields(level = gate.level(), version = version))]
fn encode_version(file: &File, gate: &CompatibilityGate, version: u8) -> Vec<u8> {
    let mut body = EncodeStream::new();
    for image in &file.images {
        write_image(&mut body, image, gate);
    }
    for composition in &file.compositions {
        write_tag(&mut body, TagCode::VectorCompositionBlock, |s| {
            write_composition(s, composition, gate);
        });
    }
    write_end_tag(&mut body);

    let mut out = EncodeStream::new();
    out.write_bytes(&MAGIC);
    out.write_u8(version);
    out.write_u32(body.len() as u32);
    out.write_u8(COMPRESSION_NONE);
    out.write_bytes(body.as_bytes());
    tracing::debug!(bytes = out.len(), "encoded file");
    out.into_bytes()
}

#[cfg(test)]
#[path = "../../tests/unit/tags/file.rs"]
mod tests;
