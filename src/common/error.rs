use thiserror::Error;

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum QRError {
    /// Encoded segment does not fit the data capacity of the chosen version.
    #[error("Capacity overflow: {required} bits needed but version {version} holds {capacity}")]
    CapacityOverflow { version: usize, required: usize, capacity: usize },

    /// No version up to 40 can hold the data at the requested ec level.
    #[error("Data too long: {len} bytes do not fit any version at ec level {ec_level:?}")]
    DataTooLong { len: usize, ec_level: ECLevel },

    #[error("Invalid version: {0}, expected 1..=40")]
    InvalidVersion(usize),

    #[error("Invalid masking pattern: {0}, expected 0..=7")]
    InvalidMaskingPattern(u8),

    #[error("Module ({row}, {col}) is outside the {width}x{width} grid")]
    OutOfBounds { row: usize, col: usize, width: usize },

    #[error("Zero has no logarithm in GF(256)")]
    LogOfZero,

    #[error("Division by the zero polynomial")]
    ZeroDivisor,

    #[error("Invalid format info: {0:#017b}")]
    InvalidFormatInfo(u32),

    #[error("Invalid version info: {0:#020b}")]
    InvalidVersionInfo(u32),
}

impl QRError {
    /// Caller or programmer errors, as opposed to capacity conditions.
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(self, Self::CapacityOverflow { .. } | Self::DataTooLong { .. })
    }
}

pub type QRResult<T> = Result<T, QRError>;
