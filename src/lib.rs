//! A Huffman coding engine.
//!
//! The [`huffman`] module holds the tree itself: building it from symbol
//! frequencies, writing and reading its shape as a compact header, and
//! encoding/decoding single symbols. [`encoding`] and [`decoding`] wrap it
//! into a small container format:
//!
//! ```text
//! [symbol count: u32 LE][tree header][payload bits, MSB first, zero padded]
//! ```
//!
//! # Examples
//! ```
//! let compressed = hctree::encoding::compress_to_vec(b"AABCD").unwrap();
//! let decompressed = hctree::decoding::decompress_to_vec(&compressed).unwrap();
//! assert_eq!(decompressed, b"AABCD");
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(feature = "std")]
pub const VERBOSE: bool = false;

macro_rules! vprintln {
    ($($x:expr),*) => {
        #[cfg(feature = "std")]
        if crate::VERBOSE {
            std::println!($($x),*);
        }
    }
}

pub mod decoding;
pub mod encoding;
pub mod huffman;
#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub mod io;

#[cfg(not(feature = "std"))]
pub mod io_nostd;

#[cfg(not(feature = "std"))]
pub use io_nostd as io;

pub use decoding::{decompress, decompress_to_vec, DecompressError};
pub use encoding::{compress, compress_to_vec, CompressError};
pub use huffman::{Code, HuffmanError, HuffmanTree};
