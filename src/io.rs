//! The writer side of std::io, used by the container codec when std is available.
#[cfg(feature = "std")]
pub use std::io::{Error, ErrorKind, Write};
