use super::*;

fn sequence_with_future_tag() -> Vec<u8> {
    let mut s = EncodeStream::new();
    write_tag(&mut s, TagCode::CachePolicy, |p| p.write_u8(1));
    // A code no build knows yet, with an arbitrary payload.
    s.write_encoded_u32(900);
    s.write_encoded_u32(3);
    s.write_bytes(&[0xDE, 0xAD, 0xBE]);
    write_tag(&mut s, TagCode::SolidColor, |p| p.write_u8(7));
    write_end_tag(&mut s);
    s.into_bytes()
}

#[test]
fn future_tags_are_skipped_and_later_tags_still_parse() {
    let bytes = sequence_with_future_tag();
    let mut r = DecodeStream::new(&bytes);
    let mut seen = Vec::new();
    read_tags(&mut r, |code, payload| {
        seen.push((code, payload.read_u8()?));
        Ok(true)
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![(TagCode::CachePolicy, 1), (TagCode::SolidColor, 7)]
    );
    assert_eq!(r.bytes_available(), 0);
    assert_eq!(r.tag_level(), 900);
}

#[test]
fn unclaimed_tags_advance_the_cursor() {
    let bytes = sequence_with_future_tag();
    let mut r = DecodeStream::new(&bytes);
    let mut count = 0;
    read_tags(&mut r, |_, _| {
        count += 1;
        Ok(false)
    })
    .unwrap();
    assert_eq!(count, 2);
    assert_eq!(r.bytes_available(), 0);
}

#[test]
fn corrupt_payload_is_dropped_and_loop_continues() {
    let mut s = EncodeStream::new();
    write_tag(&mut s, TagCode::MarkerList, |_| {});
    write_tag(&mut s, TagCode::CachePolicy, |p| p.write_u8(2));
    write_end_tag(&mut s);
    let bytes = s.into_bytes();

    let mut r = DecodeStream::new(&bytes);
    let mut values = Vec::new();
    read_tags(&mut r, |_, payload| {
        values.push(payload.read_u8()?);
        Ok(true)
    })
    .unwrap();
    assert_eq!(values, vec![2]);
}

#[test]
fn end_tag_is_a_single_byte() {
    let mut s = EncodeStream::new();
    write_end_tag(&mut s);
    assert_eq!(s.as_bytes(), &[0]);
    let mut r = DecodeStream::new(s.as_bytes());
    assert!(read_tag_header(&mut r).unwrap().is_end());
}

#[test]
fn missing_end_tag_is_an_error() {
    let mut s = EncodeStream::new();
    write_tag(&mut s, TagCode::CachePolicy, |p| p.write_u8(2));
    let bytes = s.into_bytes();
    let mut r = DecodeStream::new(&bytes);
    assert!(read_tags(&mut r, |_, _| Ok(true)).is_err());
}

#[test]
fn length_past_end_of_stream_is_an_error() {
    let mut s = EncodeStream::new();
    write_tag_header(&mut s, TagCode::SolidColor, 10);
    s.write_u8(1);
    let bytes = s.into_bytes();
    let mut r = DecodeStream::new(&bytes);
    assert!(read_tags(&mut r, |_, _| Ok(true)).unwrap_err().is_corrupt());
}
