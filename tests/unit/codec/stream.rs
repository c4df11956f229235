use super::*;

#[test]
fn varint_uses_fewer_bytes_for_smaller_values() {
    let mut s = EncodeStream::new();
    s.write_encoded_u32(5);
    assert_eq!(s.len(), 1);

    let mut s = EncodeStream::new();
    s.write_encoded_u32(300);
    assert_eq!(s.as_bytes(), &[0xAC, 0x02]);

    let mut s = EncodeStream::new();
    s.write_encoded_u32(u32::MAX);
    assert_eq!(s.len(), 5);
    let mut r = DecodeStream::new(s.as_bytes());
    assert_eq!(r.read_encoded_u32().unwrap(), u32::MAX);
    assert_eq!(r.bytes_available(), 0);
}

#[test]
fn signed_varints_keep_sign_and_extremes() {
    let mut s = EncodeStream::new();
    for v in [0i64, -1, 1, -64, i64::MIN, i64::MAX] {
        s.write_encoded_i64(v);
    }
    s.write_encoded_i32(-7);
    let mut r = DecodeStream::new(s.as_bytes());
    for v in [0i64, -1, 1, -64, i64::MIN, i64::MAX] {
        assert_eq!(r.read_encoded_i64().unwrap(), v);
    }
    assert_eq!(r.read_encoded_i32().unwrap(), -7);
}

#[test]
fn truncated_varint_is_corrupt() {
    let mut r = DecodeStream::new(&[0x80, 0x80]);
    let err = r.read_encoded_u32().unwrap_err();
    assert!(err.is_corrupt());
}

#[test]
fn overlong_varint_is_corrupt() {
    let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
    let mut r = DecodeStream::new(&bytes);
    assert!(r.read_encoded_u32().unwrap_err().is_corrupt());
}

#[test]
fn fixed_width_reads_fail_on_underrun() {
    let mut r = DecodeStream::new(&[1, 2, 3]);
    assert!(r.read_u32().unwrap_err().is_corrupt());
    assert_eq!(r.position(), 0);
    assert_eq!(r.read_u16().unwrap(), 0x0201);
    assert_eq!(r.read_u8().unwrap(), 3);
    assert!(r.read_u8().is_err());
}

#[test]
fn read_bytes_slices_and_advances() {
    let mut r = DecodeStream::new(&[9, 8, 7, 6]);
    let mut sub = r.read_bytes(3).unwrap();
    assert_eq!(sub.len(), 3);
    assert_eq!(sub.read_u8().unwrap(), 9);
    assert_eq!(r.read_u8().unwrap(), 6);
    assert!(r.read_bytes(1).is_err());
}

#[test]
fn sub_streams_share_tag_level() {
    let bytes = [0u8; 4];
    let mut r = DecodeStream::new(&bytes);
    let sub = r.read_bytes(2).unwrap();
    sub.note_tag_code(42);
    sub.note_tag_code(7);
    assert_eq!(r.tag_level(), 42);
}

#[test]
fn strings_are_length_prefixed_utf8() {
    let mut s = EncodeStream::new();
    s.write_utf8_string("héllo\0world");
    s.write_utf8_string("");
    let mut r = DecodeStream::new(s.as_bytes());
    assert_eq!(r.read_utf8_string().unwrap(), "héllo\0world");
    assert_eq!(r.read_utf8_string().unwrap(), "");
}

#[test]
fn bits_pack_lsb_first_and_bytes_follow_on_next_boundary() {
    let mut s = EncodeStream::new();
    s.write_bit_boolean(true);
    s.write_bit_boolean(false);
    s.write_ubits(0b11, 2);
    s.write_u8(0xAB);
    assert_eq!(s.as_bytes(), &[0b0000_1101, 0xAB]);

    let mut r = DecodeStream::new(s.as_bytes());
    assert!(r.read_bit_boolean().unwrap());
    assert!(!r.read_bit_boolean().unwrap());
    assert_eq!(r.read_ubits(2).unwrap(), 3);
    assert_eq!(r.read_u8().unwrap(), 0xAB);
    assert!(r.read_bit_boolean().is_err());
}

#[test]
fn fixed_width_writes_are_little_endian() {
    let mut s = EncodeStream::new();
    s.write_u16(0x0201);
    s.write_u32(0x0605_0403);
    s.write_i32(-2);
    s.write_f32(1.5);
    s.write_f64(-0.25);
    assert_eq!(&s.as_bytes()[..6], &[1, 2, 3, 4, 5, 6]);
    assert_eq!(&s.as_bytes()[6..10], &[0xfe, 0xff, 0xff, 0xff]);

    let mut r = DecodeStream::new(s.as_bytes());
    assert_eq!(r.read_u16().unwrap(), 0x0201);
    assert_eq!(r.read_u32().unwrap(), 0x0605_0403);
    assert_eq!(r.read_i32().unwrap(), -2);
    assert_eq!(r.read_f32().unwrap(), 1.5);
    assert_eq!(r.read_f64().unwrap(), -0.25);
    assert_eq!(r.bytes_available(), 0);
}
