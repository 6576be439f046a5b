//! # qrsmith
//!
//! A Rust library for generating byte mode QR codes with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **QR Code Generation**: Versions 1 to 40 at every error correction level (L, M, Q, H)
//! - **Automatic Version Selection**: Picks the smallest version whose capacity fits the data
//! - **Mask Selection**: Scores all 8 masks in parallel and keeps the lowest penalty
//! - **Rendering**: Grayscale images through `image`, or block characters for terminals
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrsmith::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! let img = qr.to_image(4); // 4 pixels per module
//! assert_eq!(img.width(), (21 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)       // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)            // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! assert!(qr.is_dark(0, 0)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules. The byte count
//! field is 8 bits wide below version 10 and 16 bits from version 10 up.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{
    format_info, parse_format_info, parse_version_info, version_info, Color, ECLevel, Version,
};
pub use common::version_db::{rs_blocks, RSBlock};
