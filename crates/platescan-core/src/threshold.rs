//! Smoothing, gradient and global thresholding.

use image::GrayImage;
use imageproc::contrast;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::horizontal_sobel;

/// Gaussian blur; `sigma <= 0` returns a copy.
pub fn gaussian_blur(src: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 || src.width() == 0 || src.height() == 0 {
        return src.clone();
    }
    gaussian_blur_f32(src, sigma)
}

/// Absolute horizontal Sobel response saturated to `u8`.
///
/// Vertical strokes (character edges on a plate) light up, horizontal
/// structure is suppressed.
pub fn sobel_x_abs(src: &GrayImage) -> GrayImage {
    let gx = horizontal_sobel(src);
    let mut out = GrayImage::new(src.width(), src.height());
    for (dst, g) in out.pixels_mut().zip(gx.pixels()) {
        dst.0[0] = g.0[0].unsigned_abs().min(255) as u8;
    }
    out
}

/// Otsu level of a sample set.
///
/// Degenerate inputs are handled explicitly: an empty set yields 127, a
/// constant set yields its value, and a set with at most two distinct values
/// yields their midpoint. Everything else goes to `imageproc`.
pub fn otsu_level(samples: &[u8]) -> u8 {
    let (Some(&min_v), Some(&max_v)) = (samples.iter().min(), samples.iter().max()) else {
        return 127;
    };
    if min_v == max_v {
        return min_v;
    }
    if samples.iter().all(|&v| v == min_v || v == max_v) {
        return ((min_v as u16 + max_v as u16) / 2) as u8;
    }
    match GrayImage::from_raw(samples.len() as u32, 1, samples.to_vec()) {
        Some(row) => contrast::otsu_level(&row),
        None => 127,
    }
}

/// Binarize with the Otsu level: pixels strictly above the level become 255.
///
/// Returns the binary image and the level used.
pub fn binarize_otsu(src: &GrayImage) -> (GrayImage, u8) {
    let level = otsu_level(src.as_raw());
    let mut out = GrayImage::new(src.width(), src.height());
    for (dst, s) in out.pixels_mut().zip(src.pixels()) {
        dst.0[0] = if s.0[0] > level { 255 } else { 0 };
    }
    (out, level)
}
