use alloc::vec::Vec;

/// An interface for writing an arbitrary number of bits into a buffer.
///
/// Bits are packed starting from the *most significant* position of each
/// byte. Bytes written with [`BitWriter::write_byte`] must start on a byte
/// boundary, use [`BitWriter::flush_bitwise`] to get there.
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BitWriterError {
    #[error("Writer is not byte aligned, {bits_in_last_byte} bits are pending in the last byte")]
    NotByteAligned { bits_in_last_byte: usize },
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bit` or `write_bits`,
    /// and obtain the output using `dump` or `finish`
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            bit_idx: 0,
        }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            bit_idx: 0,
        }
    }

    pub fn bits_written(&self) -> usize {
        self.bit_idx
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_idx % 8 == 0
    }

    /// Append a single bit
    pub fn write_bit(&mut self, bit: bool) {
        if self.is_byte_aligned() {
            self.output.push(0);
        }
        if bit {
            let last = self.output.len() - 1;
            self.output[last] |= 0x80 >> (self.bit_idx % 8);
        }
        self.bit_idx += 1;
    }

    /// Write the lowest `num_bits` of `value`, starting with the most significant of those.
    pub fn write_bits(&mut self, value: u64, num_bits: u32) {
        assert!(num_bits <= 64);
        for shift in (0..num_bits).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Write a whole byte. The writer has to be byte aligned.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), BitWriterError> {
        self.check_aligned()?;
        self.output.push(byte);
        self.bit_idx += 8;
        Ok(())
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<(), BitWriterError> {
        self.check_aligned()?;
        self.output.extend_from_slice(&value.to_le_bytes());
        self.bit_idx += 32;
        Ok(())
    }

    /// Pad the current byte with zero bits so the next write starts on a byte boundary.
    /// Does nothing if the writer is already aligned.
    pub fn flush_bitwise(&mut self) {
        let rem = self.bit_idx % 8;
        if rem != 0 {
            // the padding bits are already zero in the buffer
            self.bit_idx += 8 - rem;
        }
    }

    fn check_aligned(&self) -> Result<(), BitWriterError> {
        if self.is_byte_aligned() {
            Ok(())
        } else {
            Err(BitWriterError::NotByteAligned {
                bits_in_last_byte: self.bit_idx % 8,
            })
        }
    }

    /// Returns the populated buffer that you've been writing bits into.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// dumping
    pub fn dump(self) -> Result<Vec<u8>, BitWriterError> {
        self.check_aligned()?;
        Ok(self.output)
    }

    /// Pad the last byte and return the buffer
    pub fn finish(mut self) -> Vec<u8> {
        self.flush_bitwise();
        self.output
    }
}
