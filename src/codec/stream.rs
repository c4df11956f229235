//! Cursor-based byte readers and writers.
//!
//! Both streams support byte-aligned values (fixed-width little-endian integers and floats,
//! LEB128 varints, length-prefixed strings and byte runs) and LSB-first bit fields. A byte
//! access after bit accesses always starts at the next whole byte.

use std::cell::Cell;
use std::rc::Rc;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::foundation::error::{PagError, PagResult};

const VARINT_VALUE_MASK: u8 = 0x7F;
const VARINT_HAS_NEXT: u8 = 0x80;

/// Read cursor over a borrowed byte buffer.
///
/// Sub-streams created with [`DecodeStream::read_bytes`] share the parent's record of the
/// highest tag code seen, so a whole file reports a single tag level.
#[derive(Debug, Clone)]
pub struct DecodeStream<'a> {
    bytes: &'a [u8],
    position: usize,
    bit_position: usize,
    tag_level: Rc<Cell<u32>>,
}

impl<'a> DecodeStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            bit_position: 0,
            tag_level: Rc::new(Cell::new(0)),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bytes_available(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Highest tag code recorded through [`DecodeStream::note_tag_code`] on this stream family.
    pub fn tag_level(&self) -> u32 {
        self.tag_level.get()
    }

    pub(crate) fn note_tag_code(&self, code: u32) {
        if code > self.tag_level.get() {
            self.tag_level.set(code);
        }
    }

    fn remaining(&self) -> &'a [u8] {
        let bytes: &'a [u8] = self.bytes;
        &bytes[self.position..]
    }

    fn advance(&mut self, count: usize) {
        self.position += count;
        self.bit_position = self.position * 8;
    }

    fn take<T>(
        &mut self,
        what: &str,
        read: impl FnOnce(&mut &'a [u8]) -> std::io::Result<T>,
    ) -> PagResult<T> {
        let mut rest = self.remaining();
        let before = rest.len();
        let value = read(&mut rest)
            .map_err(|_| PagError::corrupt(format!("end of data while reading {what}")))?;
        let consumed = before - rest.len();
        self.advance(consumed);
        Ok(value)
    }

    pub fn skip(&mut self, count: usize) -> PagResult<()> {
        if count > self.bytes_available() {
            return Err(PagError::corrupt(format!(
                "cannot skip {count} bytes, {} available",
                self.bytes_available()
            )));
        }
        self.advance(count);
        Ok(())
    }

    pub fn read_u8(&mut self) -> PagResult<u8> {
        self.take("u8", |r| r.read_u8())
    }

    pub fn read_i8(&mut self) -> PagResult<i8> {
        self.take("i8", |r| r.read_i8())
    }

    pub fn read_bool(&mut self) -> PagResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> PagResult<u16> {
        self.take("u16", |r| r.read_u16::<LittleEndian>())
    }

    pub fn read_u32(&mut self) -> PagResult<u32> {
        self.take("u32", |r| r.read_u32::<LittleEndian>())
    }

    pub fn read_i32(&mut self) -> PagResult<i32> {
        self.take("i32", |r| r.read_i32::<LittleEndian>())
    }

    pub fn read_f32(&mut self) -> PagResult<f32> {
        self.take("f32", |r| r.read_f32::<LittleEndian>())
    }

    pub fn read_f64(&mut self) -> PagResult<f64> {
        self.take("f64", |r| r.read_f64::<LittleEndian>())
    }

    fn read_varint(&mut self, max_bits: u32) -> PagResult<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8().map_err(|_| PagError::corrupt("truncated varint"))?;
            value |= u64::from(byte & VARINT_VALUE_MASK) << shift;
            if byte & VARINT_HAS_NEXT == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= max_bits {
                return Err(PagError::corrupt(format!(
                    "varint longer than {max_bits} bits"
                )));
            }
        }
    }

    pub fn read_encoded_u32(&mut self) -> PagResult<u32> {
        let value = self.read_varint(32)?;
        u32::try_from(value).map_err(|_| PagError::corrupt("varint overflows u32"))
    }

    pub fn read_encoded_u64(&mut self) -> PagResult<u64> {
        self.read_varint(64)
    }

    pub fn read_encoded_i64(&mut self) -> PagResult<i64> {
        let data = self.read_encoded_u64()?;
        Ok(((data >> 1) as i64) ^ -((data & 1) as i64))
    }

    pub fn read_encoded_i32(&mut self) -> PagResult<i32> {
        let value = self.read_encoded_i64()?;
        i32::try_from(value).map_err(|_| PagError::corrupt("varint overflows i32"))
    }

    /// Slice the next `length` bytes off as an independent sub-stream.
    pub fn read_bytes(&mut self, length: usize) -> PagResult<DecodeStream<'a>> {
        if length > self.bytes_available() {
            return Err(PagError::corrupt(format!(
                "block of {length} bytes exceeds the {} bytes available",
                self.bytes_available()
            )));
        }
        let bytes: &'a [u8] = self.bytes;
        let start = self.position;
        self.advance(length);
        Ok(DecodeStream {
            bytes: &bytes[start..start + length],
            position: 0,
            bit_position: 0,
            tag_level: Rc::clone(&self.tag_level),
        })
    }

    /// Read a varint-length-prefixed byte run.
    pub fn read_byte_data(&mut self) -> PagResult<Vec<u8>> {
        let length = self.read_encoded_u32()? as usize;
        let data = self.read_bytes(length)?;
        Ok(data.bytes.to_vec())
    }

    pub fn read_utf8_string(&mut self) -> PagResult<String> {
        let bytes = self.read_byte_data()?;
        String::from_utf8(bytes).map_err(|e| PagError::corrupt(format!("invalid UTF-8: {e}")))
    }

    pub fn read_bit_boolean(&mut self) -> PagResult<bool> {
        Ok(self.read_ubits(1)? != 0)
    }

    /// Read `num_bits` (at most 32) as an unsigned value, least significant bit first.
    pub fn read_ubits(&mut self, num_bits: u8) -> PagResult<u32> {
        let num_bits = usize::from(num_bits.min(32));
        if self.bit_position + num_bits > self.bytes.len() * 8 {
            return Err(PagError::corrupt("end of data while reading bits"));
        }
        let mut value = 0u32;
        for i in 0..num_bits {
            let byte = self.bytes[self.bit_position / 8];
            let bit = (byte >> (self.bit_position % 8)) & 1;
            value |= u32::from(bit) << i;
            self.bit_position += 1;
        }
        self.position = self.bit_position.div_ceil(8);
        Ok(value)
    }

    /// Move the bit cursor to the next byte boundary.
    pub fn align_with_bytes(&mut self) {
        self.bit_position = self.position * 8;
    }
}

/// Growable write buffer. Writers never fail.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodeStream {
    bytes: Vec<u8>,
    bit_position: usize,
}

impl EncodeStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
        self.bit_position = self.bytes.len() * 8;
    }

    pub fn write_u8(&mut self, value: u8) {
        self.append(&[value]);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.append(&[value as u8]);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut buf = [0; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.append(&buf);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut buf = [0; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.append(&buf);
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut buf = [0; 4];
        LittleEndian::write_i32(&mut buf, value);
        self.append(&buf);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut buf = [0; 4];
        LittleEndian::write_f32(&mut buf, value);
        self.append(&buf);
    }

    pub fn write_f64(&mut self, value: f64) {
        let mut buf = [0; 8];
        LittleEndian::write_f64(&mut buf, value);
        self.append(&buf);
    }

    fn write_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value as u8) & VARINT_VALUE_MASK;
            value >>= 7;
            if value == 0 {
                self.write_u8(byte);
                return;
            }
            self.write_u8(byte | VARINT_HAS_NEXT);
        }
    }

    pub fn write_encoded_u32(&mut self, value: u32) {
        self.write_varint(u64::from(value));
    }

    pub fn write_encoded_u64(&mut self, value: u64) {
        self.write_varint(value);
    }

    pub fn write_encoded_i64(&mut self, value: i64) {
        self.write_varint(((value << 1) ^ (value >> 63)) as u64);
    }

    pub fn write_encoded_i32(&mut self, value: i32) {
        self.write_encoded_i64(i64::from(value));
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.append(data);
    }

    pub fn write_byte_data(&mut self, data: &[u8]) {
        self.write_encoded_u32(data.len() as u32);
        self.append(data);
    }

    pub fn write_utf8_string(&mut self, value: &str) {
        self.write_byte_data(value.as_bytes());
    }

    pub fn write_bit_boolean(&mut self, value: bool) {
        self.write_ubits(u32::from(value), 1);
    }

    /// Write the low `num_bits` (at most 32) of `value`, least significant bit first.
    pub fn write_ubits(&mut self, value: u32, num_bits: u8) {
        for i in 0..u32::from(num_bits.min(32)) {
            if self.bit_position == self.bytes.len() * 8 {
                self.bytes.push(0);
            }
            let bit = ((value >> i) & 1) as u8;
            self.bytes[self.bit_position / 8] |= bit << (self.bit_position % 8);
            self.bit_position += 1;
        }
    }

    /// Pad the bit cursor to the next byte boundary.
    pub fn align_with_bytes(&mut self) {
        self.bit_position = self.bytes.len() * 8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/stream.rs"]
mod tests;
