pub use encode::*;

use super::metadata::Version;

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Mode indicator for 8 bit byte data
pub const BYTE_MODE: u32 = 0b0100;

pub const MODE_BITS: usize = 4;

// Segment
//------------------------------------------------------------------------------

/// Single byte mode segment: mode indicator, byte count and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    len_bits: usize, // Bit len of char count
    data: &'a [u8],  // Reference to raw data
}

impl<'a> Segment<'a> {
    pub fn new(version: Version, data: &'a [u8]) -> Self {
        Self { len_bits: version.char_count_bit_len(), data }
    }

    pub fn bit_len(&self) -> usize {
        MODE_BITS + self.len_bits + (self.data.len() << 3)
    }
}


// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use super::{Segment, BYTE_MODE, MODE_BITS, PADDING_CODEWORDS};
    use crate::common::bitstream::BitStream;

    pub fn push_segment(seg: &Segment, out: &mut BitStream) {
        push_header(seg, out);
        push_byte_data(seg.data, out);
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(BYTE_MODE, MODE_BITS);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u32, seg.len_bits);
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for &b in data {
            out.push_bits(b as u32, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream, bit_capacity: usize) {
        if out.len() + 4 <= bit_capacity {
            out.push_bits(0, 4);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream, bit_capacity: usize) {
        push_padding_bits(out);
        push_padding_codewords(out, bit_capacity);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream, bit_capacity: usize) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = bit_capacity.saturating_sub(out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc as u32, 8);
        });
    }

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use tracing::debug;

    use super::{
        writer::{pad_remaining_capacity, push_segment, push_terminator},
        Segment,
    };
    use crate::common::{
        bitstream::BitStream,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    /// Encodes into the smallest version that holds the data.
    pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
        let ver = find_min_version(data, ecl)?;
        Ok((encode_with_version(data, ecl, ver)?, ver))
    }

    /// Encodes into exactly `ver.data_codewords(ecl)` bytes.
    pub fn encode_with_version(data: &[u8], ecl: ECLevel, ver: Version) -> QRResult<BitStream> {
        let seg = Segment::new(ver, data);
        let bit_capacity = ver.data_bit_capacity(ecl);
        let size = seg.bit_len();
        if size > bit_capacity {
            return Err(QRError::CapacityOverflow {
                version: *ver,
                required: size,
                capacity: bit_capacity,
            });
        }

        let mut bs = BitStream::with_capacity(bit_capacity);
        push_segment(&seg, &mut bs);
        push_terminator(&mut bs, bit_capacity);
        pad_remaining_capacity(&mut bs, bit_capacity);
        debug_assert_eq!(bs.len(), bit_capacity);
        Ok(bs)
    }

    /// Smallest version whose data capacity fits the byte segment. The
    /// length field widens at version 10, so the segment is re-measured there.
    pub fn find_min_version(data: &[u8], ecl: ECLevel) -> QRResult<Version> {
        for ver in Version::all() {
            let size = Segment::new(ver, data).bit_len();
            let capacity = ver.data_bit_capacity(ecl);
            if size <= capacity {
                debug!(version = *ver, bits = size, capacity, "Selected version");
                return Ok(ver);
            }
        }
        Err(QRError::DataTooLong { len: data.len(), ec_level: ecl })
    }

}
