//! Primitive codec behavior: varints, zigzag, 5-bit packing.

use tinytz::binary::{
    decode_varint, encode_varint, pack_codes5, packed_codes5_len, unpack_codes5, zigzag_decode,
    zigzag_encode, ByteReader, MAX_VARINT_BYTES,
};
use tinytz::encode_codes;

#[test]
fn test_varint_empty_buffer() {
    assert!(decode_varint(&[]).is_err());
}

#[test]
fn test_varint_unterminated() {
    assert!(decode_varint(&[0x80, 0x80, 0x80]).is_err());
}

#[test]
fn test_varint_exceeds_max_bytes() {
    let bytes = vec![0x80; MAX_VARINT_BYTES + 1];
    assert!(decode_varint(&bytes).is_err());
}

#[test]
fn test_varint_sizes() {
    for (value, len) in [(0u64, 1), (127, 1), (128, 2), (16_383, 2), (16_384, 3)] {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        assert_eq!(buf.len(), len, "value {}", value);
        assert_eq!(decode_varint(&buf).unwrap(), (value, len));
    }
}

#[test]
fn test_zigzag_small_magnitudes_stay_small() {
    assert_eq!(zigzag_encode(0), 0);
    assert_eq!(zigzag_encode(-1), 1);
    assert_eq!(zigzag_encode(1), 2);
    assert_eq!(zigzag_encode(-2), 3);
    assert_eq!(zigzag_decode(zigzag_encode(i64::MIN)), i64::MIN);
    assert_eq!(zigzag_decode(zigzag_encode(i64::MAX)), i64::MAX);
}

#[test]
fn test_codes5_pack_density() {
    let codes = encode_codes("losangeles");
    let mut buf = Vec::new();
    pack_codes5(&codes, &mut buf);
    // 10 letters × 5 bits = 50 bits → 7 bytes
    assert_eq!(buf.len(), 7);
    assert_eq!(packed_codes5_len(10), 7);
    assert_eq!(unpack_codes5(&buf, 10).unwrap(), codes);
}

#[test]
fn test_codes5_truncated_input() {
    let codes = encode_codes("newyork");
    let mut buf = Vec::new();
    pack_codes5(&codes, &mut buf);
    assert!(unpack_codes5(&buf[..buf.len() - 1], codes.len()).is_err());
}

#[test]
fn test_byte_reader_tracks_position() {
    let mut buf = Vec::new();
    encode_varint(300, &mut buf);
    encode_varint(zigzag_encode(-7), &mut buf);
    buf.push(1);

    let mut reader = ByteReader::new(&buf);
    assert_eq!(reader.read_varint().unwrap(), 300);
    assert_eq!(reader.read_zigzag().unwrap(), -7);
    assert_eq!(reader.read_u8().unwrap(), 1);
    assert_eq!(reader.remaining(), 0);
    assert!(reader.read_u8().is_err());
}
