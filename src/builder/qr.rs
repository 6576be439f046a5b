use std::ops::Deref;

use crate::common::{
    error::{QRError, QRResult},
    iter::EncRegionIter,
    mask::{compute_total_penalty, MaskPattern},
    metadata::{
        format_info, parse_format_info, parse_version_info, version_info, Color, ECLevel, Version,
        FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
    },
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Finished symbol. Row 0 is the top edge, column 0 the left edge.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(ver: Version, ecl: ECLevel, mask: MaskPattern) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask }
    }

    /// Lays out function patterns, format and version info, then places
    /// `codewords` with `mask` applied. Test builds leave format and version
    /// info light, including the dark module, and are only used for scoring.
    pub(crate) fn build(
        ver: Version,
        ecl: ECLevel,
        mask: MaskPattern,
        codewords: &[u8],
        test: bool,
    ) -> Self {
        debug_assert_eq!(
            codewords.len(),
            ver.total_codewords(),
            "Codeword count doesn't match version {}",
            *ver
        );

        let mut qr = Self::new(ver, ecl, mask);
        qr.draw_all_function_patterns();
        qr.draw_format_info(test);
        qr.draw_version_info(test);
        qr.draw_encoding_region(codewords);
        qr
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.ver, self.ecl, *self.mask)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn is_dark(&self, row: usize, col: usize) -> QRResult<bool> {
        if row >= self.w || col >= self.w {
            return Err(QRError::OutOfBounds { row, col, width: self.w });
        }
        Ok(self.color(row, col) == Color::Dark)
    }

    /// Penalty score of the finished grid.
    pub fn penalty(&self) -> u32 {
        compute_total_penalty(self)
    }

    /// Reads the copy of the format info next to the top left finder and
    /// verifies its BCH code.
    pub fn format_info(&self) -> QRResult<(ECLevel, MaskPattern)> {
        let info = self.read_number(&FORMAT_INFO_COORDS_VERT);
        parse_format_info(info)
    }

    /// Reads the top right version block, `None` below version 7.
    pub fn version_info(&self) -> QRResult<Option<Version>> {
        if *self.ver < 7 {
            return Ok(None);
        }
        let coords = version_info_coords(false);
        parse_version_info(self.read_number(&coords)).map(Some)
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    pub(crate) fn color(&self, r: usize, c: usize) -> Color {
        *self.grid[r * self.w + c]
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub(crate) fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) with its light separator on
    // the inner sides
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_left, dr_right) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_top, dc_bottom) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_left..=dr_right {
            for j in dc_top..=dc_bottom {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    // Row and column 6 between the separators. Cells already taken by an
    // alignment pattern are left alone.
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..=w - 9 {
            let m = Module::Func(Color::from(i & 1 == 0));
            if matches!(self.get(6, i), Module::Empty) {
                self.set(6, i, m);
            }
            if matches!(self.get(i, 6), Module::Empty) {
                self.set(i, 6, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r as i16, c as i16)
            }
        }
    }

    // Skipped when the centre already belongs to a finder pattern
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        if !matches!(self.get(r, c), Module::Empty) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use crate::builder::QR;
    use crate::common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_alignment_pattern_1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L, MaskPattern::ALL[0]);
        qr.draw_finder_patterns();
        let finders_only = qr.to_debug_str();
        qr.draw_alignment_patterns();
        assert_eq!(qr.to_debug_str(), finders_only);
    }

    #[test]
    fn test_alignment_pattern_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L, MaskPattern::ALL[0]);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............................Ffffffff\n\
             fFFFFFfF.............................FfFFFFFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF............fffff............FfFfffFf\n\
             fFFFFFfF............fFFFf............FfFFFFFf\n\
             fffffffF............fFfFf............Ffffffff\n\
             FFFFFFFF............fFFFf............FFFFFFFF\n\
             ....................fffff....................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....................fffff...........fffff....\n\
             FFFFFFFF............fFFFf...........fFFFf....\n\
             fffffffF............fFfFf...........fFfFf....\n\
             fFFFFFfF............fFFFf...........fFFFf....\n\
             fFfffFfF............fffff...........fffff....\n\
             fFfffFfF.....................................\n\
             fFfffFfF.....................................\n\
             fFFFFFfF.....................................\n\
             fffffffF.....................................\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
    }
}

// Format & version info
//------------------------------------------------------------------------------

// Bit i of the format info, least significant first. The vertical copy runs
// down column 8, the horizontal copy along row 8.
static FORMAT_INFO_COORDS_VERT: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

static FORMAT_INFO_COORDS_HORZ: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

// Bit i of the version info, least significant first, in the 6x3 block above
// the bottom left finder or its transpose left of the top right finder
fn version_info_coords(bottom_left: bool) -> [(i16, i16); VERSION_INFO_BIT_LEN] {
    let mut coords = [(0, 0); VERSION_INFO_BIT_LEN];
    for (i, rc) in coords.iter_mut().enumerate() {
        let (a, b) = ((i / 3) as i16, (i % 3) as i16 - 11);
        *rc = if bottom_left { (b, a) } else { (a, b) };
    }
    coords
}

impl QR {
    fn draw_format_info(&mut self, test: bool) {
        let info = if test { 0 } else { format_info(self.ecl, self.mask) };
        for coords in [&FORMAT_INFO_COORDS_VERT, &FORMAT_INFO_COORDS_HORZ] {
            self.draw_number(
                info,
                Module::Format(Color::Light),
                Module::Format(Color::Dark),
                coords,
            );
        }
        self.set(-8, 8, Module::Format(Color::from(!test)));
    }

    fn draw_version_info(&mut self, test: bool) {
        if *self.ver < 7 {
            return;
        }
        let info = if test { 0 } else { version_info(self.ver) };
        for bottom_left in [false, true] {
            self.draw_number(
                info,
                Module::Version(Color::Light),
                Module::Version(Color::Dark),
                &version_info_coords(bottom_left),
            );
        }
    }

    fn draw_number(&mut self, number: u32, off_clr: Module, on_clr: Module, coords: &[(i16, i16)]) {
        for (i, &(r, c)) in coords.iter().enumerate() {
            let module = if (number >> i) & 1 == 0 { off_clr } else { on_clr };
            self.set(r, c, module);
        }
    }

    fn read_number(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().enumerate().fold(0, |acc, (i, &(r, c))| match *self.get(r, c) {
            Color::Dark => acc | (1 << i),
            Color::Light => acc,
        })
    }
}

#[cfg(test)]
mod qr_information_tests {
    use crate::builder::QR;
    use crate::common::{
        error::QRError,
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_version_info_1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L, MaskPattern::ALL[0]);
        qr.draw_version_info(false);
        assert!(!qr.to_debug_str().contains(|ch: char| ch.eq_ignore_ascii_case(&'v')));
        assert_eq!(qr.version_info(), Ok(None));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L, MaskPattern::ALL[0]);
        qr.draw_version_info(false);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ..................................VVv........\n\
             ..................................VvV........\n\
             ..................................VvV........\n\
             ..................................Vvv........\n\
             ..................................vvv........\n\
             ..................................VVV........\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             VVVVvV.......................................\n\
             VvvvvV.......................................\n\
             vVVvvV.......................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n"
        );
        assert_eq!(qr.version_info(), Ok(Some(Version::new(7).unwrap())));
    }

    #[test]
    fn test_format_info_test_mode() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::M, MaskPattern::ALL[0]);
        qr.draw_format_info(true);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             .....................\n\
             ........M............\n\
             MMMMMM.MM....MMMMMMMM\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n"
        );
        assert_eq!(qr.format_info(), Err(QRError::InvalidFormatInfo(0)));
    }

    #[test]
    fn test_format_info() {
        let mask = MaskPattern::new(4).unwrap();
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::M, mask);
        qr.draw_format_info(false);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........m............\n\
             ........M............\n\
             ........M............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             .....................\n\
             ........m............\n\
             mMMMmM.mm....mmmmmMMm\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........m............\n\
             ........M............\n\
             ........m............\n\
             ........M............\n\
             ........M............\n\
             ........M............\n\
             ........m............\n"
        );
        assert_eq!(qr.format_info(), Ok((ECLevel::M, mask)));
        // Both copies carry the same bits
        let horz = qr.read_number(&super::FORMAT_INFO_COORDS_HORZ);
        assert_eq!(horz, qr.read_number(&super::FORMAT_INFO_COORDS_VERT));
    }

    #[test]
    fn test_all_function_patterns_and_qr_info() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L, MaskPattern::ALL[0]);
        qr.draw_all_function_patterns();
        qr.draw_format_info(false);
        qr.draw_version_info(false);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM.........................VVvFfffffff\n\
             fFFFFFfFM.........................VvVFfFFFFFf\n\
             fFfffFfFm.........................VvVFfFfffFf\n\
             fFfffFfFM.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mmmMmmfmm...........fffff............mmMMMmMM\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFm...........fffff...........fffff....\n\
             fFfffFfFM....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFm....................................\n\
             fffffffFm....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Places codeword bits most significant first along the zig-zag path.
    // Cells past the last codeword are remainder bits and start light. The
    // mask is applied to every placed cell.
    fn draw_encoding_region(&mut self, codewords: &[u8]) {
        let mask_fn = self.mask.mask_function();
        let total_bits = codewords.len() << 3;
        let mut bit_index = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if !matches!(self.get(r, c), Module::Empty) {
                continue;
            }
            let bit = bit_index < total_bits
                && (codewords[bit_index >> 3] >> (7 - (bit_index & 7))) & 1 == 1;
            bit_index += 1;
            let dark = bit ^ mask_fn(r as usize, c as usize);
            self.set(r, c, Module::Data(Color::from(dark)));
        }

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in debug");
    }
}
