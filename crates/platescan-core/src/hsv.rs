//! HSV image container and conversions (8-bit OpenCV conventions).
//!
//! H is stored as degrees / 2 (0..180), S and V as 0..=255.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::contrast::equalize_histogram;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HsvImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // row-major, 3 bytes per pixel
}

impl HsvImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for px in rgb.pixels() {
            data.extend_from_slice(&rgb_to_hsv_pixel(px.0));
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, hsv: [u8; 3]) {
        let o = self.offset(x, y);
        self.data[o..o + 3].copy_from_slice(&hsv);
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    pub fn to_rgb(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width, self.height);
        for (dst, hsv) in out.pixels_mut().zip(self.pixels()) {
            *dst = Rgb(hsv_to_rgb_pixel(hsv));
        }
        out
    }

    /// The V plane as a grayscale image.
    pub fn value_plane(&self) -> GrayImage {
        let raw = self.data.chunks_exact(3).map(|c| c[2]).collect();
        // length matches width * height by construction
        GrayImage::from_raw(self.width, self.height, raw).unwrap_or_default()
    }

    /// Replace the V plane. Dimensions must match.
    pub fn set_value_plane(&mut self, v: &GrayImage) {
        debug_assert_eq!(v.dimensions(), (self.width, self.height));
        for (chunk, px) in self.data.chunks_exact_mut(3).zip(v.pixels()) {
            chunk[2] = px.0[0];
        }
    }
}

pub fn rgb_to_hsv_pixel([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let mut h = if diff <= 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h8 = (h / 2.0).round() as u32 % 180;
    [h8 as u8, s.round().min(255.0) as u8, v as u8]
}

pub fn hsv_to_rgb_pixel([h, s, v]: [u8; 3]) -> [u8; 3] {
    let s = s as f32 / 255.0;
    let v = v as f32;
    if s <= 0.0 {
        let g = v.round() as u8;
        return [g, g, g];
    }
    let hh = (h as f32 * 2.0) / 60.0;
    let sector = hh.floor() as i32 % 6;
    let f = hh - hh.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    ]
}

/// Convert to HSV and histogram-equalize the V plane.
///
/// Hue and saturation are left untouched, so hue-range tests on the result
/// see the unchanged chroma with a normalized brightness.
pub fn equalize_value(rgb: &RgbImage) -> HsvImage {
    let mut hsv = HsvImage::from_rgb(rgb);
    let v = equalize_histogram(&hsv.value_plane());
    hsv.set_value_plane(&v);
    hsv
}

/// HSV triple at `(x, y)`, or `None` outside the image.
pub fn hsv_at(rgb: &RgbImage, x: u32, y: u32) -> Option<[u8; 3]> {
    if x >= rgb.width() || y >= rgb.height() {
        return None;
    }
    Some(rgb_to_hsv_pixel(rgb.get_pixel(x, y).0))
}
