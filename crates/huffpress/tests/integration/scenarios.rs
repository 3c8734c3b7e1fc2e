//! Worked examples on small inputs.

use huffpress::{
    pack, unpack, CodeTable, DecodeMode, Error, FrequencyTable, HuffmanCodec, HuffmanTree, Node,
    TreeDecoder,
};
use huffpress_core::{Codec, Decompressor};

#[test]
fn single_symbol_input_roundtrips() {
    let data = b"aaaa";
    let frequencies = FrequencyTable::from_bytes(data);
    assert_eq!(frequencies.iter().collect::<Vec<_>>(), vec![(b'a', 4)]);

    let codec = HuffmanCodec::from_frequencies(frequencies).unwrap();
    assert!(codec.tree().is_single_leaf());

    let code = codec.code_table().get(b'a').unwrap();
    assert!(!code.is_empty());
    assert_eq!(code.to_string(), "0");

    let stream = codec.encode(data).unwrap();
    assert_eq!(codec.decode(&stream, DecodeMode::Exact).unwrap(), data);
    assert_eq!(codec.decompress_with_size(&stream.bytes, 4).unwrap(), data);
}

#[test]
fn two_symbol_input_packs_into_one_byte() {
    let data = b"ab";
    let codec = HuffmanCodec::from_input(data).unwrap();

    match codec.tree().root() {
        Node::Internal { left, right, .. } => {
            assert!(left.is_leaf());
            assert!(right.is_leaf());
        }
        Node::Leaf { .. } => panic!("expected an internal root"),
    }
    assert_eq!(codec.tree().leaf_count(), 2);
    assert_eq!(codec.tree().internal_count(), 1);

    let mut codes: Vec<String> = codec
        .code_table()
        .iter()
        .map(|(_, code)| code.to_string())
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["0", "1"]);

    let stream = codec.encode(data).unwrap();
    assert_eq!(stream.bit_len, 2);
    assert_eq!(stream.bytes.len(), 1);
    assert_eq!(stream.padding(), 6);

    // The six padding bits must not decode into extra symbols.
    let decoded = codec.decode(&stream, DecodeMode::Exact).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn empty_input_fails_explicitly() {
    assert!(matches!(HuffmanCodec::from_input(b""), Err(Error::EmptyInput)));
    assert!(matches!(
        HuffmanTree::build(&FrequencyTable::from_bytes(b"")),
        Err(Error::EmptyInput)
    ));
}

#[test]
fn frequent_symbols_get_shorter_codes() {
    let data = b"aabbbcccc";
    let table = CodeTable::from_tree(&HuffmanTree::from_bytes(data).unwrap());
    let len = |symbol: u8| table.get(symbol).unwrap().len();

    assert!(len(b'c') <= len(b'a'));
    assert!(len(b'c') <= len(b'b'));
    assert!(len(b'b') <= len(b'a'));
}

#[test]
fn tree_is_shared_by_encoder_and_decoder() {
    let data = b"It was the best of times, it was the worst of times.";
    let tree = HuffmanTree::from_bytes(data).unwrap();
    let table = CodeTable::from_tree(&tree);

    let packed = table.encode(data).unwrap();
    let decoder = TreeDecoder::new(&tree);
    assert_eq!(decoder.decode_exact(&packed.bytes, packed.bit_len).unwrap(), data);
}

#[test]
fn manual_pack_unpack_decode() {
    let data = b"mississippi";
    let tree = HuffmanTree::from_bytes(data).unwrap();
    let table = CodeTable::from_tree(&tree);

    let bits: Vec<bool> = data
        .iter()
        .flat_map(|&s| table.get(s).unwrap().iter().collect::<Vec<_>>())
        .collect();
    let packed = pack(bits.iter().copied());
    assert_eq!(packed.bytes.len(), bits.len().div_ceil(8));

    let unpacked = unpack(&packed.bytes);
    assert_eq!(unpacked.len(), packed.bytes.len() * 8);

    let decoded = TreeDecoder::new(&tree).decode(unpacked[..bits.len()].iter().copied());
    assert_eq!(decoded.unwrap(), data);
}

#[test]
fn all_byte_values_roundtrip() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).chain([0u8; 100]).collect();
    let codec = HuffmanCodec::from_input(&data).unwrap();

    assert_eq!(codec.code_table().len(), 256);
    assert!(codec.verify_roundtrip(&data).unwrap());
}

#[test]
fn skewed_frequencies_make_deep_trees() {
    // Fibonacci-like counts force one code per depth level.
    let mut counts = Vec::new();
    let (mut a, mut b) = (1u64, 1u64);
    for symbol in 0..30u8 {
        counts.push((symbol, a));
        let next = a + b;
        a = b;
        b = next;
    }
    let codec = HuffmanCodec::from_frequencies(FrequencyTable::from_counts(counts)).unwrap();
    assert_eq!(codec.tree().depth(), 29);
    assert_eq!(codec.code_table().max_code_len(), 29);

    let data: Vec<u8> = (0..30u8).collect();
    let stream = codec.encode(&data).unwrap();
    assert_eq!(codec.decode(&stream, DecodeMode::Exact).unwrap(), data);
}
