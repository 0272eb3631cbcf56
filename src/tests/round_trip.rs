use crate::decoding::decompress_to_vec;
use crate::encoding::{compress_to_vec, count_frequencies};
use crate::huffman::{round_trip, HuffmanTree};
use alloc::vec;
use alloc::vec::Vec;
use rand::{Rng, SeedableRng};

fn header_len(data: &[u8]) -> usize {
    let tree = HuffmanTree::from_data(data);
    tree.num_nodes() + tree.num_leaves()
}

#[test]
fn empty() {
    round_trip(&[]);
}

#[test]
fn short_inputs() {
    round_trip(b"A");
    round_trip(b"AABCD");
    round_trip(b"abracadabra");
    round_trip(&[0, 255, 0, 255, 128]);
}

#[test]
fn single_symbol() {
    let data = vec![b'A'; 5];
    let compressed = compress_to_vec(&data).unwrap();
    // count + leaf marker + symbol, no payload at all
    assert_eq!(compressed.len(), 4 + 2);
    assert_eq!(decompress_to_vec(&compressed).unwrap(), data);

    round_trip(&vec![0u8; 100_000]);
}

#[test]
fn every_byte_value() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 10).collect();
    let compressed = compress_to_vec(&data).unwrap();
    // uniform distribution over 256 symbols: exactly 8 bits per symbol
    assert_eq!(compressed.len(), 4 + header_len(&data) + data.len());
    assert_eq!(decompress_to_vec(&compressed).unwrap(), data);
}

#[test]
fn random_data() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let len = rng.gen_range(0..2000);
        let alphabet = rng.gen_range(1..=255u8);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();
        round_trip(&data);
    }
}

#[test]
fn skewed_data() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
    let data: Vec<u8> = (0..50_000)
        .map(|_| {
            // geometric-ish distribution gives a deep tree
            let mut symbol = 0u8;
            while symbol < 40 && rng.gen_bool(0.5) {
                symbol += 1;
            }
            symbol
        })
        .collect();
    round_trip(&data);
}

#[test]
fn payload_is_optimal() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    let data: Vec<u8> = (0..10_000).map(|_| rng.gen_range(0..20u8) * rng.gen_range(0..4u8)).collect();
    let frequencies = count_frequencies(&data);
    let tree = HuffmanTree::build(&frequencies);
    let payload_bits = tree.encoded_bit_len(&frequencies) as usize;

    let compressed = compress_to_vec(&data).unwrap();
    assert_eq!(
        compressed.len(),
        4 + header_len(&data) + (payload_bits + 7) / 8
    );
}

#[test]
fn corrupted_input_never_panics() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xC0FFEE);
    let data: Vec<u8> = (0..500).map(|_| rng.gen_range(0..16u8)).collect();
    let compressed = compress_to_vec(&data).unwrap();
    for _ in 0..500 {
        let mut corrupted = compressed.clone();
        let idx = rng.gen_range(0..corrupted.len());
        corrupted[idx] = rng.gen();
        let cut = rng.gen_range(0..=corrupted.len());
        corrupted.truncate(cut);
        // errors are fine, panics are not
        let _ = decompress_to_vec(&corrupted);
    }
}
