use std::ops::Deref;

use super::{
    error::{QRError, QRResult},
    mask::MaskPattern,
    version_db::{expand_block_groups, RSBlock, ALIGNMENT_PATTERN_POSITIONS, RS_BLOCK_TABLE},
};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Two bit indicator stored in the format info.
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::InvalidVersion(version));
        }
        Ok(Self(version))
    }

    /// Versions in increasing size order.
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Bit width of the byte mode length field.
    pub const fn char_count_bit_len(self) -> usize {
        if self.0 < 10 {
            8
        } else {
            16
        }
    }

    pub fn alignment_pattern(self) -> &'static [usize] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn rs_blocks(self, ec_level: ECLevel) -> Vec<RSBlock> {
        expand_block_groups(self.block_groups(ec_level))
    }

    pub fn total_codewords(self) -> usize {
        self.block_groups(ECLevel::L).iter().map(|(n, t, _)| n * t).sum()
    }

    pub fn data_codewords(self, ec_level: ECLevel) -> usize {
        self.block_groups(ec_level).iter().map(|(n, _, d)| n * d).sum()
    }

    pub fn data_bit_capacity(self, ec_level: ECLevel) -> usize {
        self.data_codewords(ec_level) << 3
    }

    /// Longest byte payload that fits with mode indicator and length field.
    pub fn max_byte_len(self, ec_level: ECLevel) -> usize {
        (self.data_bit_capacity(ec_level) - 4 - self.char_count_bit_len()) >> 3
    }

    fn block_groups(self, ec_level: ECLevel) -> &'static [(usize, usize, usize)] {
        RS_BLOCK_TABLE[self.0 - 1][ec_level as usize]
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<usize> for Version {
    type Error = QRError;
    fn try_from(version: usize) -> QRResult<Self> {
        Self::new(version)
    }
}


// Format & version info
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const G15: u32 = 0b101_0011_0111;

const G15_MASK: u32 = 0b101_0100_0001_0010;

const G18: u32 = 0b1_1111_0010_0101;

fn bit_len(n: u32) -> u32 {
    32 - n.leading_zeros()
}

// Remainder of (data << deg(gen)) divided by gen over GF(2)
fn bch_remainder(data: u32, gen: u32) -> u32 {
    let gen_len = bit_len(gen);
    let mut rem = data << (gen_len - 1);
    while bit_len(rem) >= gen_len {
        rem ^= gen << (bit_len(rem) - gen_len);
    }
    rem
}

pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ec_level.format_bits() << 3) | *mask as u32;
    ((data << 10) | bch_remainder(data, G15)) ^ G15_MASK
}

pub fn version_info(version: Version) -> u32 {
    let data = *version as u32;
    (data << 12) | bch_remainder(data, G18)
}

pub fn parse_format_info(info: u32) -> QRResult<(ECLevel, MaskPattern)> {
    let data = ((info ^ G15_MASK) >> 10) & 0b11111;
    let ec_level = ECLevel::from_format_bits(data >> 3);
    let mask = MaskPattern::new((data & 0b111) as u8)?;
    if format_info(ec_level, mask) != info {
        return Err(QRError::InvalidFormatInfo(info));
    }
    Ok((ec_level, mask))
}

pub fn parse_version_info(info: u32) -> QRResult<Version> {
    let version =
        Version::new((info >> 12) as usize).map_err(|_| QRError::InvalidVersionInfo(info))?;
    if version_info(version) != info {
        return Err(QRError::InvalidVersionInfo(info));
    }
    Ok(version)
}
