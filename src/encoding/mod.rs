//! Compressing data into the container format: symbol count, tree header and payload.
pub mod bit_writer;
mod compressor;
mod frequency;

pub use compressor::*;
pub use frequency::count_frequencies;
