//! Property tests for the compress/decompress pair.

use proptest::prelude::*;
use text_huffman::{CodeTable, Container, HuffmanCodec, HuffmanError, HuffmanTree};

/// Mostly small alphabets so trees get deep and ties get common.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::char::range('a', 'd'), 1..200)
            .prop_map(|chars| chars.into_iter().collect()),
        "\\PC{1,120}",
        any::<String>().prop_filter("non-empty", |s| !s.is_empty()),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(text in text_strategy()) {
        let compressed = HuffmanCodec::compress(&text).unwrap();
        prop_assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn prop_compress_is_deterministic(text in text_strategy()) {
        let first = HuffmanCodec::compress(&text).unwrap();
        let second = HuffmanCodec::compress(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_tables_are_prefix_free(text in text_strategy()) {
        let table = CodeTable::from_tree(&HuffmanTree::from_text(&text).unwrap());
        prop_assert!(table.iter().all(|(_, code)| !code.is_empty()));
        if table.len() >= 2 {
            for (a, code_a) in table.iter() {
                for (b, code_b) in table.iter() {
                    if a != b {
                        prop_assert!(!code_a.is_prefix_of(code_b));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_container_header_survives_parse(text in text_strategy()) {
        let compressed = HuffmanCodec::compress(&text).unwrap();
        let container = Container::parse(&compressed).unwrap();
        prop_assert_eq!(container.symbol_count, text.chars().count() as u64);
        prop_assert!(container.padding < 8);
    }

    #[test]
    fn prop_truncation_never_decodes(text in text_strategy()) {
        let mut compressed = HuffmanCodec::compress(&text).unwrap();
        compressed.pop();
        let result = HuffmanCodec::decompress(&compressed);
        prop_assert!(
            matches!(
                result,
                Err(HuffmanError::CorruptContainer { .. }) | Err(HuffmanError::MalformedContainer { .. })
            ),
            "truncated container decoded: {:?}",
            result
        );
    }
}

#[test]
fn single_symbol_file() {
    let compressed = HuffmanCodec::compress("aaaa").unwrap();
    let container = Container::parse(&compressed).unwrap();
    assert_eq!(container.table.len(), 1);
    assert_eq!(container.table.get('a').map(ToString::to_string), Some("0".to_string()));
    assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), "aaaa");
}

#[test]
fn two_symbol_file() {
    let compressed = HuffmanCodec::compress("ab").unwrap();
    let container = Container::parse(&compressed).unwrap();
    let codes: Vec<(char, String)> = container.table.iter().map(|(s, c)| (s, c.to_string())).collect();
    assert_eq!(codes, vec![('a', "0".to_string()), ('b', "1".to_string())]);
    assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), "ab");
}

#[test]
fn empty_file_is_rejected() {
    assert!(matches!(HuffmanCodec::compress(""), Err(HuffmanError::EmptyInput)));
}

#[test]
fn skewed_file_shrinks() {
    let text = "aaaaaaaaab";
    let container = Container::parse(&HuffmanCodec::compress(text).unwrap()).unwrap();
    assert!(container.payload_bits() < 8 * text.chars().count());
}

#[test]
fn garbage_is_malformed() {
    let result = HuffmanCodec::decompress(b"definitely not a container");
    assert!(matches!(result, Err(HuffmanError::MalformedContainer { .. })));
}

#[test]
fn large_text_round_trips_and_shrinks() {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs.\n";
    let text = paragraph.repeat(500);
    let compressed = HuffmanCodec::compress(&text).unwrap();
    assert!(compressed.len() < text.len());
    assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), text);
}
