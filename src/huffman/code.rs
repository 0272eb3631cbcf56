use core::fmt;
use core::fmt::Write;

/// The longest path a 256 symbol tree can have (a fully degenerate tree)
pub const MAX_CODE_LEN: usize = 255;

/// The bits of one symbol: the branch choices from the root to its leaf,
/// `false` for left and `true` for right.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// Packed MSB first, bit 0 of the code is the top bit of `bits[0]`
    bits: [u8; (MAX_CODE_LEN + 7) / 8],
    num_bits: u16,
}

impl Code {
    pub(crate) fn empty() -> Self {
        Code {
            bits: [0; (MAX_CODE_LEN + 7) / 8],
            num_bits: 0,
        }
    }

    pub(crate) fn push(&mut self, bit: bool) {
        let idx = usize::from(self.num_bits);
        assert!(idx < MAX_CODE_LEN, "code longer than {} bits", MAX_CODE_LEN);
        if bit {
            self.bits[idx / 8] |= 0x80 >> (idx % 8);
        }
        self.num_bits += 1;
    }

    pub fn num_bits(&self) -> u32 {
        u32::from(self.num_bits)
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// The `idx`th branch taken, counted from the root
    pub fn bit(&self, idx: u32) -> bool {
        assert!(idx < self.num_bits());
        let idx = idx as usize;
        self.bits[idx / 8] & (0x80 >> (idx % 8)) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.num_bits()).map(move |idx| self.bit(idx))
    }

    /// Whether this code is a prefix of (or equal to) `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.num_bits <= other.num_bits && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Code;
    use alloc::format;

    #[test]
    fn push_and_read_back() {
        let mut code = Code::empty();
        for bit in [true, false, true, true, false, false, false, false, true] {
            code.push(bit);
        }
        assert_eq!(code.num_bits(), 9);
        assert!(code.bit(0));
        assert!(!code.bit(1));
        assert!(code.bit(8));
        assert_eq!(format!("{}", code), "101100001");
    }

    #[test]
    fn prefix() {
        let mut short = Code::empty();
        short.push(false);
        short.push(true);
        let mut long = short;
        long.push(true);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(Code::empty().is_prefix_of(&short));
        assert_eq!(format!("{}", Code::empty()), "");
    }
}
