#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate hctree;

/// A single leaf tree decodes without reading bits, so the symbol count alone decides the output size
const MAX_SYMBOLS: u32 = 1 << 20;

fuzz_target!(|data: &[u8]| {
    if data.len() >= 4 && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) > MAX_SYMBOLS {
        return;
    }
    // errors are expected, it just should never panic on invalid input
    let _ = hctree::decompress_to_vec(data);
});
