use crate::common::error::{QRError, QRResult};

// Galois field GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const EXP: [u8; 256] = build_exp_table();

pub(crate) static EXP_TABLE: [u8; 256] = EXP;

pub(crate) static LOG_TABLE: [u8; 256] = build_log_table(&EXP);

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        table[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        table[i] = table[i - 4] ^ table[i - 5] ^ table[i - 6] ^ table[i - 8];
        i += 1;
    }
    table
}

// Log of 0 is undefined, slot 0 stays unused
const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Antilog. Exponent wraps modulo 255, so negative and overflowing sums from
/// polynomial arithmetic are accepted.
pub fn gexp(n: i32) -> u8 {
    EXP_TABLE[n.rem_euclid(255) as usize]
}

pub fn glog(n: u8) -> QRResult<u8> {
    if n < 1 {
        return Err(QRError::LogOfZero);
    }
    Ok(LOG_TABLE[n as usize])
}

pub fn gmul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    gexp(LOG_TABLE[a as usize] as i32 + LOG_TABLE[b as usize] as i32)
}
