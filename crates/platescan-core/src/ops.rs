use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use crate::Region;

pub fn to_gray(src: &RgbImage) -> GrayImage {
    imageops::grayscale(src)
}

/// Downscale so the width is at most `max_width`, keeping the aspect ratio.
///
/// Returns the working image and the factor mapping working coordinates back
/// to source coordinates (`>= 1.0`). Images that already fit are returned
/// unchanged with a factor of 1.
pub fn narrow(src: &RgbImage, max_width: u32) -> (RgbImage, f32) {
    let (w, h) = src.dimensions();
    if max_width == 0 || w <= max_width {
        return (src.clone(), 1.0);
    }
    let scale = w as f32 / max_width as f32;
    let nh = ((h as f32 / scale).round() as u32).max(1);
    (
        imageops::resize(src, max_width, nh, FilterType::Triangle),
        scale,
    )
}

/// Nearest-neighbour resize of a binary mask, so it stays binary.
pub fn enlarge_mask(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    if mask.dimensions() == (width, height) {
        return mask.clone();
    }
    imageops::resize(mask, width, height, FilterType::Nearest)
}

/// Crop after clamping to the image; `None` when nothing is left.
pub fn crop_rgb(src: &RgbImage, region: Region) -> Option<RgbImage> {
    let r = region.clamp_to(src.width(), src.height())?;
    Some(
        imageops::crop_imm(src, r.x as u32, r.y as u32, r.width as u32, r.height as u32)
            .to_image(),
    )
}

pub fn crop_gray(src: &GrayImage, region: Region) -> Option<GrayImage> {
    let r = region.clamp_to(src.width(), src.height())?;
    Some(
        imageops::crop_imm(src, r.x as u32, r.y as u32, r.width as u32, r.height as u32)
            .to_image(),
    )
}

/// Bilinear resize to an exact size.
pub fn resize_rgb(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width, height, FilterType::Triangle)
}

/// Pixel lookup returning 0 outside the image.
#[inline]
pub fn get_gray_or_zero(src: &GrayImage, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width() as i32 || y >= src.height() as i32 {
        return 0;
    }
    src.get_pixel(x as u32, y as u32).0[0]
}
