use super::*;

#[test]
fn markers_round_trip_in_order() {
    let markers = vec![
        Marker {
            start_time: 0,
            duration: 0,
            comment: "intro".to_owned(),
        },
        Marker {
            start_time: 48,
            duration: 12,
            comment: "\u{1F3AC} cut".to_owned(),
        },
    ];
    let mut s = EncodeStream::new();
    write_markers(&mut s, &markers, &CompatibilityGate::beta());
    let bytes = s.into_bytes();
    assert_eq!(bytes[0], TagCode::MarkerList.ordinal() as u8);

    // header is two single-byte varints here
    let mut r = DecodeStream::new(&bytes[2..]);
    assert_eq!(read_markers(&mut r).unwrap(), markers);
    assert_eq!(r.bytes_available(), 0);
}

#[test]
fn empty_list_writes_nothing() {
    let mut s = EncodeStream::new();
    write_markers(&mut s, &[], &CompatibilityGate::beta());
    assert!(s.is_empty());
}

#[test]
fn oversized_count_is_corrupt() {
    let mut r = DecodeStream::new(&[0xff, 0xff, 0x03, 0, 0, 0]);
    assert!(read_markers(&mut r).unwrap_err().is_corrupt());
}
