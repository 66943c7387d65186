use super::*;

#[test]
fn reads_little_endian() {
    let mut bytes = vec![0xAB];
    bytes.extend_from_slice(&0x1234_5678u32.to_le_bytes());
    bytes.extend_from_slice(&2.5f64.to_le_bytes());

    let mut r = ByteReader::new(&bytes);
    assert_eq!(r.read_u8().unwrap(), 0xAB);
    assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
    assert_eq!(r.read_f64().unwrap(), 2.5);
    assert!(r.is_at_end());
    assert_eq!(r.position(), 13);
}

#[test]
fn truncated_read_fails_without_advancing() {
    let bytes = [1, 2, 3];
    let mut r = ByteReader::at(&bytes, 1);

    assert_eq!(r.read_u32(), Err(DecodeError::UnexpectedEnd { offset: 1 }));
    assert_eq!(r.position(), 1);
    assert_eq!(r.remaining(), 2);
    assert_eq!(r.read_u8().unwrap(), 2);
}

#[test]
fn empty_reader() {
    let mut r = ByteReader::new(&[]);
    assert!(r.is_at_end());
    assert_eq!(r.read_u8(), Err(DecodeError::UnexpectedEnd { offset: 0 }));
}

#[test]
fn start_past_end() {
    let bytes = [0u8; 2];
    let mut r = ByteReader::at(&bytes, 5);
    assert_eq!(r.remaining(), 0);
    assert_eq!(r.read_f64(), Err(DecodeError::UnexpectedEnd { offset: 5 }));
}
