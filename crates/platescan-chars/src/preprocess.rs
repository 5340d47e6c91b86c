use image::imageops::{self, FilterType};
use platescan_core::GrayImage;

/// Letterbox a character into a square and resample it to `size`×`size`.
///
/// The character is centered on a black square whose side is its longer
/// dimension, so nothing is cropped and the aspect ratio is preserved.
pub fn preprocess_char(src: &GrayImage, size: u32) -> GrayImage {
    let (w, h) = src.dimensions();
    let m = w.max(h);
    if m == 0 {
        return GrayImage::new(size, size);
    }
    let mut square = GrayImage::new(m, m);
    imageops::replace(&mut square, src, ((m - w) / 2) as i64, ((m - h) / 2) as i64);
    if m == size {
        return square;
    }
    imageops::resize(&square, size, size, FilterType::CatmullRom)
}
