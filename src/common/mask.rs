use std::ops::Deref;

use rayon::prelude::*;
use tracing::trace;

use super::{
    error::{QRError, QRResult},
    metadata::{Color, ECLevel, Version},
};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern > 7 {
            return Err(QRError::InvalidMaskingPattern(pattern));
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: usize, c: usize) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: usize, _: usize) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: usize, c: usize) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: usize, c: usize) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: usize, c: usize) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: usize, c: usize) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: usize, c: usize) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: usize, c: usize) -> bool {
        (((r * c) % 3) + ((r + c) & 1)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, col); data modules where it holds are inverted.
    pub fn mask_function(self) -> fn(usize, usize) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask on a test build, where format and version info are
/// light placeholders, and returns the lowest scoring one. Ties go to the
/// lower id.
pub(crate) fn find_best_mask(version: Version, ec_level: ECLevel, codewords: &[u8]) -> MaskPattern {
    let penalties = MaskPattern::ALL
        .par_iter()
        .map(|&m| compute_total_penalty(&QR::build(version, ec_level, m, codewords, true)))
        .collect::<Vec<_>>();

    let mut best = 0;
    for (i, &pen) in penalties.iter().enumerate() {
        trace!(mask = i, penalty = pen, "Scored mask");
        if pen < penalties[best] {
            best = i;
        }
    }
    MaskPattern::ALL[best]
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let run_pen = compute_run_penalty(qr, true) + compute_run_penalty(qr, false);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen = compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    run_pen + blk_pen + fp_pen + bal_pen
}

// Every maximal run of 5 or more same colored modules scores 3 + (run - 5)
fn compute_run_penalty(qr: &QR, is_hor: bool) -> u32 {
    let w = qr.width();
    let get = |i: usize, j: usize| if is_hor { qr.color(i, j) } else { qr.color(j, i) };
    let mut pen = 0;
    for i in 0..w {
        let mut run = 1;
        for j in 1..=w {
            if j < w && get(i, j) == get(i, j - 1) {
                run += 1;
                continue;
            }
            if run >= 5 {
                pen += 3 + (run - 5);
            }
            run = 1;
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    let mut pen = 0;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = qr.color(r, c);
            if clr == qr.color(r + 1, c) && clr == qr.color(r, c + 1) && clr == qr.color(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    let w = qr.width();
    let get = |i: usize, j: usize| if is_hor { qr.color(i, j) } else { qr.color(j, i) };
    let mut pen = 0;
    for i in 0..w {
        for j in 0..=w - PATTERN.len() {
            if PATTERN.iter().enumerate().all(|(k, &clr)| get(i, j + k) == clr) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points per full 5% step away from an even dark/light split
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules();
    let w = qr.width();
    let total = w * w;
    let deviation = (dark * 100).abs_diff(total * 50);
    (deviation / (total * 5)) as u32 * 10
}
