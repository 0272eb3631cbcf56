//! Contains `count_frequencies`, the first pass over the
//! input that decides the shape of the huffman tree.
use crate::huffman::NUM_SYMBOLS;

/// Count how often every byte value occurs in `data`
pub fn count_frequencies(data: &[u8]) -> [u64; NUM_SYMBOLS] {
    let mut frequencies = [0u64; NUM_SYMBOLS];
    for &byte in data {
        frequencies[usize::from(byte)] += 1;
    }
    frequencies
}
