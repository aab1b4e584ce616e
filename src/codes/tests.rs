use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};

use super::*;

fn codes_for(text: &str) -> (FrequencyTable, CodeTable) {
    let frequencies = FrequencyTable::from_text(text);
    let tree = HuffmanTree::build(&frequencies).unwrap();
    (frequencies, CodeTable::from_tree(&tree))
}

/// More frequent symbols must never get strictly longer codes.
fn assert_weak_huffman_property(frequencies: &FrequencyTable, codes: &CodeTable) {
    for (s, fs) in frequencies.iter() {
        for (t, ft) in frequencies.iter() {
            if fs > ft {
                assert!(
                    codes.get(s).unwrap().len() <= codes.get(t).unwrap().len(),
                    "{:?} (freq {}) has a longer code than {:?} (freq {})", s, fs, t, ft
                );
            }
        }
    }
}

#[test]
fn test_abacabad_codes() {
    let (frequencies, codes) = codes_for("abacabad");

    assert_eq!(codes.get('a'), Some("0"));
    assert_eq!(codes.get('b'), Some("10"));
    assert_eq!(codes.get('c'), Some("110"));
    assert_eq!(codes.get('d'), Some("111"));
    assert_eq!(codes.encoded_bit_len(&frequencies), 14);
    assert_eq!(codes.max_code_len(), 3);
    assert!(codes.is_prefix_free());
}

#[test]
fn test_single_symbol_gets_a_non_empty_code() {
    let (frequencies, codes) = codes_for("aaaa");

    assert_eq!(codes.len(), 1);
    assert_eq!(codes.get('a'), Some(SINGLE_SYMBOL_CODE));
    assert_eq!(codes.encoded_bit_len(&frequencies), 4);
}

#[test]
fn test_empty_tree_gives_empty_table() {
    let (_, codes) = codes_for("");

    assert!(codes.is_empty());
    assert_eq!(codes.max_code_len(), 0);
    assert_eq!(codes.to_string(), "{}");
}

#[test]
fn test_every_symbol_gets_exactly_one_code() {
    let text = "Happy families are all alike; every unhappy family is unhappy in its own way.\n";
    let (frequencies, codes) = codes_for(text);

    assert_eq!(codes.len(), frequencies.len());
    for (symbol, _) in frequencies.iter() {
        assert!(!codes.get(symbol).unwrap().is_empty());
    }
    assert!(codes.is_prefix_free());
    assert_weak_huffman_property(&frequencies, &codes);
}

#[test]
fn test_code_length_is_leaf_depth() {
    let (_, codes) = codes_for("abacabad");
    let tree = HuffmanTree::build(&FrequencyTable::from_text("abacabad")).unwrap();

    for (node, depth) in tree.nodes() {
        if let HuffmanNode::Leaf { symbol, .. } = node {
            assert_eq!(codes.get(*symbol).unwrap().len(), depth);
        }
    }
}

#[test]
fn test_random_texts_are_prefix_free_and_optimal_ordered() {
    let mut rng = rand::thread_rng();
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz .,\n".chars().collect();

    for _ in 0..30 {
        let weights: Vec<u32> = alphabet.iter().map(|_| rng.gen_range(1..100)).collect();
        let dist = WeightedIndex::new(&weights).unwrap();
        let text: String = (0..rng.gen_range(1..2000)).map(|_| alphabet[dist.sample(&mut rng)]).collect();

        let (frequencies, codes) = codes_for(&text);

        assert_eq!(codes.len(), frequencies.len());
        assert!(codes.is_prefix_free());
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        assert_weak_huffman_property(&frequencies, &codes);
    }
}

#[test]
fn test_skewed_tree_does_not_overflow_the_stack() {
    // Doubling counts make every merge take the whole previous subtree.
    let mut text = String::new();
    let symbols: Vec<char> = (0..24u32).map(|i| char::from_u32(0x41 + i).unwrap()).collect();
    for (i, &c) in symbols.iter().enumerate() {
        text.extend(std::iter::repeat(c).take(1 << i));
    }

    let (_, codes) = codes_for(&text);

    assert_eq!(codes.max_code_len(), 23);
    assert_eq!(codes.get('A').unwrap(), "0".repeat(23));
    assert!(codes.is_prefix_free());
}

#[test]
fn test_display_escapes_symbols() {
    let codes = CodeTable::from_pairs([
        ('\n', "00".to_owned()),
        ('=', "01".to_owned()),
        ('a', "1".to_owned()),
    ])
    .unwrap();

    assert_eq!(codes.to_string(), "{\\n=00, ==01, a=1}");
}

#[test]
fn test_from_pairs_rejects_bad_tables() {
    let prefixed = CodeTable::from_pairs([('a', "0".to_owned()), ('b', "01".to_owned())]);
    assert!(matches!(prefixed, Err(HuffmanError::InvalidCode(_))));

    let empty = CodeTable::from_pairs([('a', String::new())]);
    assert!(matches!(empty, Err(HuffmanError::InvalidCode(_))));

    let not_binary = CodeTable::from_pairs([('a', "02".to_owned())]);
    assert!(matches!(not_binary, Err(HuffmanError::InvalidBit('2'))));

    let duplicate = CodeTable::from_pairs([('a', "0".to_owned()), ('a', "1".to_owned())]);
    assert!(matches!(duplicate, Err(HuffmanError::InvalidCode(_))));
}

#[test]
fn test_json_representation() {
    let (_, codes) = codes_for("abacabad");

    let json = serde_json::to_string(&codes).unwrap();
    assert_eq!(json, r#"{"a":"0","b":"10","c":"110","d":"111"}"#);

    let back: CodeTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, codes);
}

#[test]
fn test_deserialize_validates_table() {
    let not_prefix_free = r#"{"a":"0","b":"01","c":"110","d":"111"}"#;
    assert!(serde_json::from_str::<CodeTable>(not_prefix_free).is_err());

    assert!(serde_json::from_str::<CodeTable>(r#"{"a":""}"#).is_err());
    assert!(serde_json::from_str::<CodeTable>(r#"{"a":"0","b":"12"}"#).is_err());
    assert!(serde_json::from_str::<CodeTable>("{}").unwrap().is_empty());
}
