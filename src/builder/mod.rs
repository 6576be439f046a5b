mod qr;

#[cfg(test)]
pub(crate) use qr::Module;
pub use qr::QR;

use tracing::{debug, debug_span};

use crate::common::{
    codec::{encode, encode_with_version},
    ec::codewords,
    error::QRResult,
    mask::{find_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {version}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let version = Version::new(1).unwrap();
        let ec_level = ECLevel::L;
        let mut qr_builder = QRBuilder::new(data);
        qr_builder.version(version).ec_level(ec_level);
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Mask: None }");
        qr_builder.unset_version().mask(MaskPattern::new(5).unwrap());
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L, Mask: 5 }");
        qr_builder.unset_mask();
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L, Mask: None }");
    }
}

impl QRBuilder<'_> {
    /// Encodes the data into a finished symbol. The version is the smallest
    /// that fits unless pinned, and the mask is the lowest scoring one
    /// unless pinned.
    pub fn build(&self) -> QRResult<QR> {
        let span = debug_span!("build", len = self.data.len(), ec_level = ?self.ec_level);
        let _guard = span.enter();

        let (encoded, version) = match self.version {
            Some(v) => (encode_with_version(self.data, self.ec_level, v)?, v),
            None => encode(self.data, self.ec_level)?,
        };
        debug!(version = *version, bits = encoded.len(), "Encoded data");

        let blocks = version.rs_blocks(self.ec_level);
        debug!(
            blocks = blocks.len(),
            ec_per_block = ?blocks.first().map(|b| b.ec_count()),
            "Computing ecc"
        );
        let codewords = codewords(encoded.data(), version, self.ec_level)?;

        let mask = match self.mask {
            Some(m) => m,
            None => find_best_mask(version, self.ec_level, &codewords),
        };
        debug!(mask = *mask, "Selected mask");

        Ok(QR::build(version, self.ec_level, mask, &codewords, false))
    }
}
