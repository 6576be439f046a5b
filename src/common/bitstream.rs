// Growable bit sequence, most significant bit first within each byte
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes. Bits past `len` in the last byte are zero.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u32, size: usize) {
        debug_assert!(size <= 32, "Bit count shouldn't exceed 32: Size {size}");
        debug_assert!(
            size == 32 || bits >> size == 0,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }
}

#[cfg(test)]
mod bit_stream_tests {
    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new();
        assert_eq!(bs.len(), 0);
        assert!(bs.is_empty());
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 16);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 23);
        assert_eq!(bs.data().len(), 3);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        bs.push(false);
        assert_eq!(bs.data(), &[0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), &[0b01000000]);
        for _ in 0..6 {
            bs.push(true);
        }
        bs.push(true);
        assert_eq!(bs.data(), &[0b01111111, 0b10000000]);
    }

    #[test]
    fn test_push_bits() {
        let exp = [0b11010010, 0b00110100, 0b10001101, 0b00100011, 0b01001000, 0b11010010];
        let mut bs = BitStream::with_capacity(48);
        let mut cursor = 0;
        for n in [0, 1, 2, 3, 4, 5, 6, 7, 8, 4, 8] {
            let bits = (cursor..cursor + n).fold(0u32, |acc, i: usize| {
                acc << 1 | ((exp[i >> 3] >> (7 - (i & 7))) & 1) as u32
            });
            cursor += n;
            bs.push_bits(bits, n);
            assert_eq!(bs.len(), cursor);
        }
        assert_eq!(bs.data(), &exp);
    }

    #[test]
    fn test_push_wide_field() {
        let mut bs = BitStream::new();
        bs.push_bits(0b0100, 4);
        bs.push_bits(0x0102, 16);
        assert_eq!(bs.data(), &[0b01000000, 0b00010000, 0b00100000]);
    }
}
