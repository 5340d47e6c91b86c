//! Shear estimation and correction on a binary plate mask.
//!
//! Characters on a slanted plate leave slanted gaps between them. For every
//! candidate offset `s` the mask is sampled along lines `x = j + k * s / rows`
//! and the lines that stay dark over the sampled rows are counted; the offset
//! with the most fully dark lines is the shear.

use platescan_core::{get_gray_or_zero, GrayImage};

use crate::SegmentParams;

/// Number of fully dark sheared lines for `offset`.
fn dark_lines(binary: &GrayImage, offset: i32, params: &SegmentParams) -> usize {
    let (cols, rows) = (binary.width() as i32, binary.height() as i32);
    let range = params.shear_range.max(0);
    let ignore = params.shear_ignore_rows as i32;
    let slope = offset as f32 / rows as f32;

    (range..cols - range)
        .filter(|&j| {
            let dark = (ignore..rows - ignore)
                .filter(|&k| {
                    let x = (j as f32 + k as f32 * slope).round() as i32;
                    get_gray_or_zero(binary, x, k) <= params.dark_level
                })
                .count();
            dark >= params.dark_cells as usize
        })
        .count()
}

/// Shear offset in pixels over the full height.
///
/// Ties go to the smaller magnitude; between `-s` and `+s` the positive
/// offset wins. A blank or tiny mask yields 0.
pub fn estimate_shear(binary: &GrayImage, params: &SegmentParams) -> i32 {
    if binary.height() == 0 {
        return 0;
    }
    let range = params.shear_range.max(0);
    let mut best = 0;
    let mut best_count = 0usize;
    let mut best_abs = range;
    for s in -range..=range {
        let count = dark_lines(binary, s, params);
        if count > best_count || (count == best_count && s.abs() <= best_abs) {
            best_count = count;
            best_abs = s.abs();
            best = s;
        }
    }
    best
}

/// Undo a shear of `offset` pixels, pivoting on the middle row.
///
/// `dst(x, y) = src(x + offset * (y - h/2) / h, y)`, nearest sample, zero
/// outside. An offset of 0 returns a copy.
pub fn apply_shear(src: &GrayImage, offset: i32) -> GrayImage {
    if offset == 0 || src.height() == 0 {
        return src.clone();
    }
    let h = src.height() as f32;
    let slope = offset as f32 / h;
    let mid = h / 2.0;
    GrayImage::from_fn(src.width(), src.height(), |x, y| {
        let sx = (x as f32 + (y as f32 - mid) * slope).round() as i32;
        image::Luma([get_gray_or_zero(src, sx, y as i32)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Bars of width 6 every 14 px, each row shifted by `slant * y / 36`.
    fn slanted_bars(width: u32, x0: i32, x1: i32, slant: i32) -> GrayImage {
        GrayImage::from_fn(width, 36, |x, y| {
            let shift = (slant as f32 * y as f32 / 36.0).round() as i32;
            let lx = x as i32 - shift;
            let lit = lx >= x0 && lx < x1 && (lx - x0) % 14 < 6;
            Luma([if lit { 255 } else { 0 }])
        })
    }

    #[test]
    fn upright_bars_have_no_shear() {
        let img = slanted_bars(200, 49, 151, 0);
        assert_eq!(estimate_shear(&img, &SegmentParams::default()), 0);
    }

    #[test]
    fn slanted_bars_are_detected() {
        let img = slanted_bars(200, 49, 151, 9);
        let s = estimate_shear(&img, &SegmentParams::default());
        assert!((7..=11).contains(&s), "shear {s}");
    }

    #[test]
    fn estimate_is_translation_invariant() {
        let p = SegmentParams::default();
        // content and its sheared sampling lines stay inside the scan window
        let a = slanted_bars(200, 49, 121, 6);
        let b = slanted_bars(200, 52, 124, 6);
        assert_eq!(estimate_shear(&a, &p), estimate_shear(&b, &p));
    }

    #[test]
    fn blank_mask_has_no_shear() {
        let img = GrayImage::new(136, 36);
        assert_eq!(estimate_shear(&img, &SegmentParams::default()), 0);
    }

    #[test]
    fn correction_straightens_bars() {
        let img = slanted_bars(200, 49, 151, 12);
        let fixed = apply_shear(&img, 12);
        // after correction each bar column is lit on every row in the middle band
        let straight = (0..200)
            .filter(|&x| (6..30).all(|y| fixed.get_pixel(x, y).0[0] == 255))
            .count();
        assert!(straight >= 7 * 4, "only {straight} straight columns");
    }

    #[test]
    fn zero_offset_is_identity() {
        let img = slanted_bars(100, 10, 90, 5);
        assert_eq!(apply_shear(&img, 0), img);
    }
}
