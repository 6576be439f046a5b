use image::{GrayImage, Luma};

use crate::builder::QR;

// Light border around the symbol, in modules
pub const QUIET_ZONE: usize = 4;

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Rasterizes the symbol at `module_sz` pixels per module, dark modules
    /// black, with a light quiet zone.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                return Luma([255]);
            }
            let r = ((y - qz_sz) / module_sz) as usize;
            let c = ((x - qz_sz) / module_sz) as usize;
            Luma([self.color(r, c).select(255, 0)])
        })
    }

    /// Text rendering for terminals with a dark background: light modules are
    /// full blocks and dark modules are spaces.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                canvas.push(self.color(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use super::QUIET_ZONE;
    use crate::builder::QRBuilder;

    #[test]
    fn test_to_image() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let img = qr.to_image(3);
        let sz = (QUIET_ZONE * 2 + 21) as u32 * 3;
        assert_eq!(img.dimensions(), (sz, sz));
        // Quiet zone is light, top left finder corner is dark
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(11, 11).0, [255]);
        assert_eq!(img.get_pixel(12, 12).0, [0]);
        assert_eq!(img.get_pixel(14, 14).0, [0]);
        // Row 1, col 1 of the finder is light
        assert_eq!(img.get_pixel(15, 15).0, [255]);

        let dark = img.pixels().filter(|p| p.0 == [0]).count();
        assert_eq!(dark, qr.count_dark_modules() * 9);
    }

    #[test]
    fn test_to_str() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let s = qr.to_str(1);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 29);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(lines[0].chars().all(|ch| ch == '█'));
        assert_eq!(lines[4].chars().skip(4).take(8).collect::<String>(), "       █");
        assert_eq!(s.chars().filter(|&ch| ch == ' ').count(), qr.count_dark_modules());
    }
}
