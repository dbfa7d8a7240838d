//! Integration tests for the full codec pipeline.
//!
//! These tests verify end-to-end behavior: input -> frequencies -> tree ->
//! code table -> encode -> (frame) -> decode, with verification that the
//! output matches the input.

use huffcode_core::{
    build_code_table, decode, encode,
    error::{Error, HuffmanError},
    framing::{decode_frame, encode_frame, parse_frame},
    BitString, CodeTable, FrequencyTable, HuffmanTree,
};

/// Test a simple round-trip through the table and the tree.
#[test]
fn test_round_trip_text() {
    let input = b"hello world! this is a test of the full pipeline with some repetition: aaaaaaaaaa bbbbbbbbbb cccccccccc";

    let (table, tree) = build_code_table(input).expect("table construction failed");
    let tree = tree.expect("non-empty input has a tree");

    let bits = encode(input, &table).expect("encode failed");
    println!("{} bytes -> {} bits", input.len(), bits.len());
    assert!(bits.len() < input.len() * 8);

    assert_eq!(decode(&bits, &table).expect("table decode failed"), input);
    assert_eq!(decode(&bits, &tree).expect("tree decode failed"), input);
}

/// Test the worked example and its exact bitstream.
#[test]
fn test_foo() {
    let (table, _) = build_code_table(b"foo").unwrap();

    assert_eq!(FrequencyTable::from_symbols(b"foo").get(b'f'), 1);
    assert_eq!(FrequencyTable::from_symbols(b"foo").get(b'o'), 2);
    assert_eq!(table.code(b'f').unwrap().to_string(), "0");
    assert_eq!(table.code(b'o').unwrap().to_string(), "1");

    let bits = encode(b"foo", &table).unwrap();
    assert_eq!(bits.to_string(), "011");
    assert_eq!(decode(&bits, &table).unwrap(), b"foo");
}

/// Test the degenerate single-symbol input.
#[test]
fn test_aaaa() {
    let (table, tree) = build_code_table(b"aaaa").unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.code(b'a').unwrap().len(), 1);

    let bits = encode(b"aaaa", &table).unwrap();
    assert_eq!(bits.to_string(), "0000");
    assert_eq!(decode(&bits, &table).unwrap(), b"aaaa");
    assert_eq!(decode(&bits, &tree.unwrap()).unwrap(), b"aaaa");
}

/// Test that empty input is a no-op everywhere.
#[test]
fn test_empty() {
    assert!(FrequencyTable::from_symbols(b"").is_empty());

    let (table, tree) = build_code_table(b"").unwrap();
    assert!(table.is_empty());
    assert!(tree.is_none());

    let bits = encode(b"", &table).unwrap();
    assert!(bits.is_empty());
    assert_eq!(decode(&BitString::new(), &CodeTable::new()).unwrap(), b"");
}

/// Test that every strict prefix cut inside a code is reported as truncated.
#[test]
fn test_truncation_never_yields_partial_output() {
    let input = b"truncation must never produce a partial message";
    let (table, tree) = build_code_table(input).unwrap();
    let tree = tree.unwrap();
    assert!(table.max_code_len() >= 2);

    let bits = encode(input, &table).unwrap();

    // Bit offsets where a code ends
    let mut boundaries = vec![0];
    for &symbol in input.iter() {
        let last = *boundaries.last().unwrap();
        boundaries.push(last + table.code(symbol).unwrap().len());
    }

    for cut in 1..bits.len() {
        let prefix = BitString::from_packed(bits.as_bytes(), cut).unwrap();
        let by_table = decode(&prefix, &table);
        let by_tree = decode(&prefix, &tree);

        if boundaries.contains(&cut) {
            let symbols = boundaries.iter().position(|&b| b == cut).unwrap();
            assert_eq!(by_table.unwrap(), &input[..symbols]);
            assert_eq!(by_tree.unwrap(), &input[..symbols]);
        } else {
            assert!(matches!(
                by_table,
                Err(Error::Huffman(HuffmanError::TruncatedStream { .. }))
            ));
            assert!(matches!(
                by_tree,
                Err(Error::Huffman(HuffmanError::TruncatedStream { .. }))
            ));
        }
    }
}

/// Test that an independently rebuilt table matches the encoder's table.
#[test]
fn test_independent_rebuild_matches() {
    let input = b"a b c d e f g: ties everywhere, aabbccddeeffgg";
    let (encoder_table, _) = build_code_table(input).unwrap();

    // The decoder only receives the counts, in a different order
    let counts: Vec<_> = FrequencyTable::from_symbols(input).iter().collect();
    let rebuilt = FrequencyTable::from_counts(counts.into_iter().rev()).unwrap();
    let decoder_table = CodeTable::from_frequencies(&rebuilt).unwrap();

    assert_eq!(encoder_table, decoder_table);

    let bits = encode(input, &encoder_table).unwrap();
    assert_eq!(decode(&bits, &decoder_table).unwrap(), input);
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();

    let (table, tree) = build_code_table(&input).unwrap();
    assert_eq!(table.len(), 256);
    assert_eq!(tree.as_ref().unwrap().leaf_count(), 256);
    assert!(table.iter().all(|(_, code)| code.len() == 8));

    let bits = encode(&input, &table).unwrap();
    assert_eq!(bits.len(), 256 * 8);
    assert_eq!(decode(&bits, &table).unwrap(), input);
}

/// Test the frame container end to end.
#[test]
fn test_frame_pipeline() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(100);

    let bytes = encode_frame(&input).expect("framing failed");
    println!("{} bytes -> {} byte frame", input.len(), bytes.len());
    assert!(bytes.len() < input.len());

    let frame = parse_frame(&bytes).expect("frame parsing failed");
    let decoded = decode_frame(&frame).expect("frame decoding failed");
    assert_eq!(decoded, input);
}

/// Test CRC detection of corruption.
#[test]
fn test_crc_corruption_detection() {
    let input = b"test data for crc validation";

    let mut bytes = encode_frame(input).unwrap();
    let len = bytes.len();
    bytes[len - 1] ^= 0xFF;

    assert!(matches!(parse_frame(&bytes), Err(Error::Crc { .. })));
}

/// Test a deep, skewed tree (Fibonacci weights give one extra level per symbol).
#[test]
fn test_skewed_tree() {
    let mut weights = vec![1u64, 1];
    while weights.len() < 20 {
        let n = weights.len();
        weights.push(weights[n - 1] + weights[n - 2]);
    }
    let freqs = FrequencyTable::from_counts(weights.iter().enumerate().map(|(i, &w)| (i as u8, w))).unwrap();
    let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
    assert_eq!(tree.depth(), 19);

    let table = CodeTable::from_tree(&tree);
    let input: Vec<u8> = (0..20u8).chain((0..20u8).rev()).collect();
    let bits = encode(&input, &table).unwrap();
    assert_eq!(decode(&bits, &tree).unwrap(), input);
}
