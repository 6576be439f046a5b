use super::galois::{gexp, glog, gmul};
use crate::common::error::{QRError, QRResult};

// Polynomial over GF(256)
//------------------------------------------------------------------------------

/// Coefficients in descending degree order. Leading zeros are trimmed, so the
/// zero polynomial is the empty coefficient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly(Vec<u8>);

impl Poly {
    /// Builds `coeffs * x^shift`.
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let start = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        if start == coeffs.len() {
            return Self(Vec::new());
        }
        let mut res = Vec::with_capacity(coeffs.len() - start + shift);
        res.extend_from_slice(&coeffs[start..]);
        res.resize(res.len() + shift, 0);
        Self(res)
    }

    /// Product of `(x - 2^i)` for `i` in `[0, ec_len)`.
    pub fn generator(ec_len: usize) -> Self {
        (0..ec_len).fold(Self::new(&[1], 0), |acc, i| {
            acc.multiply(&Self::new(&[1, gexp(i as i32)], 0))
        })
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self(Vec::new());
        }

        let mut res = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.0.iter().enumerate() {
            for (j, &b) in other.0.iter().enumerate() {
                res[i + j] ^= gmul(a, b);
            }
        }
        Self::new(&res, 0)
    }

    /// Remainder of long division by `divisor`.
    pub fn rem(&self, divisor: &Self) -> QRResult<Self> {
        if divisor.is_zero() {
            return Err(QRError::ZeroDivisor);
        }

        let log_lead = glog(divisor.0[0])? as i32;
        let mut res = self.0.clone();
        while res.len() >= divisor.len() {
            let factor = gexp(glog(res[0])? as i32 - log_lead);
            for (r, &d) in res.iter_mut().zip(divisor.0.iter()) {
                *r ^= gmul(d, factor);
            }
            let start = res.iter().position(|&c| c != 0).unwrap_or(res.len());
            res.drain(..start);
        }
        Ok(Self(res))
    }
}
