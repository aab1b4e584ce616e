use super::*;
use crate::bitstreams::{pack, unpack};

#[test]
fn test_abacabad_end_to_end() {
    let compressed = compress("abacabad").unwrap();

    assert_eq!(compressed.characters, 8);
    assert_eq!(compressed.payload.bit_len(), 14);
    assert_eq!(compressed.payload.as_bytes(), &[0b0100_1100, 0b1001_1100]);
    assert_eq!(unpack(&compressed.payload), "01001100100111");
    assert_eq!(compressed.decompress().unwrap(), "abacabad");
}

#[test]
fn test_encode_bits_matches_packed_payload() {
    let text = "she sells sea shells by the sea shore";
    let compressed = compress(text).unwrap();
    let bits = encode_bits(text, &compressed.codes).unwrap();

    assert_eq!(bits.len(), compressed.payload.bit_len());
    assert_eq!(pack(&bits).unwrap(), compressed.payload);
}

#[test]
fn test_single_symbol_round_trip() {
    let compressed = compress("aaaa").unwrap();

    assert_eq!(compressed.codes.get('a'), Some("0"));
    assert_eq!(compressed.payload.bit_len(), 4);
    assert_eq!(compressed.payload.as_bytes(), &[0]);
    assert_eq!(compressed.decompress().unwrap(), "aaaa");
}

#[test]
fn test_empty_input() {
    let compressed = compress("").unwrap();

    assert!(compressed.codes.is_empty());
    assert!(compressed.payload.is_empty());
    assert!(compressed.payload.as_bytes().is_empty());
    assert_eq!(compressed.characters, 0);
    assert_eq!(compressed.decompress().unwrap(), "");
}

#[test]
fn test_unicode_round_trip() {
    let text = "Война и мир — «Ну, князь, Генуя и Лукка» 🙂🙂\r\n\ttabs\u{0}";
    let compressed = compress(text).unwrap();

    assert_eq!(compressed.characters, text.chars().count());
    assert_eq!(compressed.decompress().unwrap(), text);
}

#[test]
fn test_compresses_skewed_text() {
    let text = "e".repeat(900) + &"t".repeat(90) + "aoinshrd";
    let compressed = compress(&text).unwrap();

    assert!(compressed.payload.as_bytes().len() < text.len() / 4);
    assert_eq!(compressed.decompress().unwrap(), text);
}

#[test]
fn test_lookup_miss_fails_loudly() {
    let codes = compress("abc").unwrap().codes;

    assert!(matches!(encode_bits("abz", &codes), Err(HuffmanError::SymbolNotInTable('z'))));
    assert!(matches!(encode("xa", &codes), Err(HuffmanError::SymbolNotInTable('x'))));
}

#[test]
fn test_decompress_truncated_payload() {
    let compressed = compress("abacabad").unwrap();
    // Drop the last bit, cutting the code of 'd' short.
    let truncated = pack(&unpack(&compressed.payload)[..13]).unwrap();

    assert!(matches!(
        decompress(&truncated, &compressed.codes),
        Err(HuffmanError::TruncatedCode { consumed: 11 })
    ));
}

#[test]
fn test_decompress_unknown_code() {
    let codes = CodeTable::from_pairs([('a', "0".to_owned()), ('b', "10".to_owned())]).unwrap();

    assert!(matches!(decompress(&pack("011").unwrap(), &codes), Err(HuffmanError::InvalidCode(_))));
}

#[test]
fn test_decompress_with_empty_table() {
    let codes = CodeTable::default();

    assert!(matches!(decompress(&pack("0").unwrap(), &codes), Err(HuffmanError::InvalidCode(_))));
    assert_eq!(decompress(&PackedBits::default(), &codes).unwrap(), "");
}

#[test]
fn test_decompress_checks_character_count() {
    let mut compressed = compress("abacabad").unwrap();
    compressed.characters = 99;

    assert!(matches!(compressed.decompress(), Err(HuffmanError::InvalidCode(_))));
}

#[test]
fn test_deserialized_payload_never_overruns_its_bytes() {
    let codes = compress("abacabad").unwrap().codes;
    let json = format!(
        r#"{{"codes":{},"payload":{{"bytes":[],"bit_len":5}},"characters":5}}"#,
        serde_json::to_string(&codes).unwrap()
    );

    assert!(serde_json::from_str::<Compressed>(&json).is_err());
}
