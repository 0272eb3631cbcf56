//! Structures and utilities used for decoding the container format back into the original bytes
pub mod bit_reader;
mod decompressor;

pub use decompressor::*;
