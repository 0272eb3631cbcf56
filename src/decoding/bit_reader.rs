/// Reads bits from a byte slice, most significant bit of each byte first.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    source: &'s [u8],
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GetBitsError {
    #[error("Cant serve this request. The reader is limited to {limit} bits, requested {num_requested_bits} bits")]
    TooManyBits {
        num_requested_bits: usize,
        limit: u8,
    },
    #[error("Can't read {requested} bits, only have {remaining} bits left")]
    NotEnoughRemainingBits { requested: usize, remaining: usize },
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s [u8]) -> BitReader<'s> {
        BitReader { idx: 0, source }
    }

    pub fn bits_left(&self) -> usize {
        self.source.len() * 8 - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    /// Size of the whole source in bytes, independent of how much was read
    pub fn filesize(&self) -> usize {
        self.source.len()
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.idx % 8 == 0
    }

    /// Read one bit, `None` once the source is exhausted
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bits_left() == 0 {
            return None;
        }
        let bit = self.source[self.idx / 8] & (0x80 >> (self.idx % 8)) != 0;
        self.idx += 1;
        Some(bit)
    }

    /// Read `n` bits, the first bit read ends up as the most significant of the result
    pub fn get_bits(&mut self, n: usize) -> Result<u64, GetBitsError> {
        if n > 64 {
            return Err(GetBitsError::TooManyBits {
                num_requested_bits: n,
                limit: 64,
            });
        }
        if self.bits_left() < n {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: n,
                remaining: self.bits_left(),
            });
        }

        let mut value = 0u64;
        let mut remaining = n;
        while remaining > 0 {
            let bits_left_in_current_byte = 8 - (self.idx % 8);
            let take = bits_left_in_current_byte.min(remaining);
            //drop the bits already read, then the ones we don't need yet
            let byte = self.source[self.idx / 8] << (self.idx % 8);
            let chunk = u64::from(byte >> (8 - take));
            value = (value << take) | chunk;
            self.idx += take;
            remaining -= take;
        }

        Ok(value)
    }

    /// Read the next 8 bits as a byte, `None` if fewer than 8 bits are left
    pub fn read_byte(&mut self) -> Option<u8> {
        self.get_bits(8).ok().map(|b| b as u8)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, GetBitsError> {
        if self.bits_left() < 32 {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: 32,
                remaining: self.bits_left(),
            });
        }
        let mut bytes = [0u8; 4];
        for byte in bytes.iter_mut() {
            *byte = self.get_bits(8)? as u8;
        }
        Ok(u32::from_le_bytes(bytes))
    }

    /// Start over at the beginning of the current source
    pub fn rewind(&mut self) {
        self.idx = 0;
    }

    pub fn reset(&mut self, new_source: &'s [u8]) {
        self.idx = 0;
        self.source = new_source;
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, GetBitsError};

    #[test]
    fn reads_msb_first() {
        let data = [0b1010_0000, 0xFF];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read_bit(), Some(true));
        assert_eq!(br.read_bit(), Some(false));
        assert_eq!(br.get_bits(2).unwrap(), 0b10);
        assert_eq!(br.get_bits(8).unwrap(), 0b0000_1111);
        assert_eq!(br.bits_left(), 4);
        assert_eq!(br.get_bits(4).unwrap(), 0b1111);
        assert_eq!(br.read_bit(), None);
    }

    #[test]
    fn bytes_and_ints() {
        let data = [5, 0, 0, 0, 0x42];
        let mut br = BitReader::new(&data);
        assert_eq!(br.filesize(), 5);
        assert_eq!(br.read_u32_le().unwrap(), 5);
        assert_eq!(br.read_byte(), Some(0x42));
        assert_eq!(br.read_byte(), None);
        br.rewind();
        assert_eq!(br.bits_read(), 0);
        assert_eq!(br.read_byte(), Some(5));
    }

    #[test]
    fn wide_reads() {
        let data = [0xFF; 9];
        let mut br = BitReader::new(&data);
        assert_eq!(br.get_bits(3).unwrap(), 0b111);
        assert_eq!(br.get_bits(64).unwrap(), u64::MAX);
        assert_eq!(
            br.get_bits(65),
            Err(GetBitsError::TooManyBits {
                num_requested_bits: 65,
                limit: 64
            })
        );
        assert_eq!(
            br.get_bits(6),
            Err(GetBitsError::NotEnoughRemainingBits {
                requested: 6,
                remaining: 5
            })
        );
    }

    #[test]
    fn reset_switches_source() {
        let first = [0x00];
        let second = [0x80];
        let mut br = BitReader::new(&first);
        assert_eq!(br.read_bit(), Some(false));
        br.reset(&second);
        assert_eq!(br.read_bit(), Some(true));
    }
}
