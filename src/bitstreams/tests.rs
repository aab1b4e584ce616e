use rand::Rng;

use super::*;

fn random_bit_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| if rng.gen_bool(0.5) { '1' } else { '0' }).collect()
}

#[test]
fn test_pack_msb_first_with_zero_padding() {
    let packed = pack("101").unwrap();

    assert_eq!(packed.as_bytes(), &[0b1010_0000]);
    assert_eq!(packed.bit_len(), 3);
}

#[test]
fn test_pack_full_bytes_adds_no_padding_byte() {
    let packed = pack("1111000000001111").unwrap();

    assert_eq!(packed.as_bytes(), &[0xF0, 0x0F]);
    assert_eq!(packed.bit_len(), 16);
}

#[test]
fn test_pack_empty() {
    let packed = pack("").unwrap();

    assert!(packed.is_empty());
    assert!(packed.as_bytes().is_empty());
    assert_eq!(unpack(&packed), "");
}

#[test]
fn test_packed_length_is_ceil_of_bit_length() {
    for len in 0..100 {
        let packed = pack(&random_bit_string(len)).unwrap();
        assert_eq!(packed.as_bytes().len(), (len + 7) / 8, "bit length {}", len);
    }
}

#[test]
fn test_unpack_reproduces_bit_string() {
    for len in [1, 7, 8, 9, 63, 64, 65, 1000, 4097] {
        let bits = random_bit_string(len);
        let packed = pack(&bits).unwrap();

        assert_eq!(unpack(&packed), bits);
    }
}

#[test]
fn test_pack_rejects_non_binary_characters() {
    assert!(matches!(pack("0110x1"), Err(HuffmanError::InvalidBit('x'))));
    assert!(matches!(pack("01 1"), Err(HuffmanError::InvalidBit(' '))));
}

#[test]
fn test_push_bit_across_byte_boundaries() {
    let mut writer = BitWriter::new();
    for i in 0..19 {
        writer.push_bit(i % 3 == 0);
    }

    assert_eq!(writer.written_bits(), 19);

    let packed = writer.build();
    assert_eq!(packed.as_bytes(), &[0b1001_0010, 0b0100_1001, 0b0010_0000]);
}

#[test]
fn test_reader_stops_at_bit_length() {
    let packed = pack("110").unwrap();
    let mut reader = packed.reader();

    assert_eq!(reader.len(), 3);
    assert_eq!(reader.read_bit(), Some(true));
    assert_eq!(reader.position(), 1);
    assert_eq!(reader.remaining(), 2);
    assert_eq!(reader.by_ref().collect::<Vec<_>>(), vec![true, false]);
    assert_eq!(reader.read_bit(), None);
    assert_eq!(reader.next(), None);
}

#[test]
fn test_packed_bits_new_checks_length() {
    assert!(PackedBits::new(vec![0xFF].into_boxed_slice(), 8).is_ok());
    assert!(PackedBits::new(vec![0xFF].into_boxed_slice(), 9).is_err());
    assert!(PackedBits::new(vec![0xFF, 0x00].into_boxed_slice(), 8).is_err());
    assert!(PackedBits::new(Box::default(), 0).is_ok());
}

#[test]
fn test_deserialize_checks_length() {
    let packed: PackedBits = serde_json::from_str(r#"{"bytes":[160],"bit_len":3}"#).unwrap();
    assert_eq!(unpack(&packed), "101");

    assert!(serde_json::from_str::<PackedBits>(r#"{"bytes":[],"bit_len":5}"#).is_err());
    assert!(serde_json::from_str::<PackedBits>(r#"{"bytes":[1,2],"bit_len":5}"#).is_err());
}
