use super::poly::Poly;
use crate::common::error::QRResult;

// Data block with its error correction codewords
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    data: Vec<u8>,
    // Data length
    dlen: usize,
}

impl Block {
    /// Appends `ec_len` error correction codewords to `raw`. The ecc is the
    /// remainder of `raw * x^ec_len` divided by the generator of degree
    /// `ec_len`; a short remainder is padded with leading zeros.
    pub fn new(raw: &[u8], ec_len: usize) -> QRResult<Self> {
        let dlen = raw.len();
        let rem = Poly::new(raw, ec_len).rem(&Poly::generator(ec_len))?;
        let rem = rem.coeffs();
        debug_assert!(rem.len() <= ec_len, "Remainder exceeds ec len: {} > {ec_len}", rem.len());

        let mut data = Vec::with_capacity(dlen + ec_len);
        data.extend_from_slice(raw);
        data.resize(dlen + ec_len - rem.len(), 0);
        data.extend_from_slice(rem);
        Ok(Self { data, dlen })
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..]
    }
}
