//! Projection and hue histograms used as classifier features.

use image::{GrayImage, RgbImage};

use crate::hsv::rgb_to_hsv_pixel;

/// Projection axis of [`projected_histogram`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// One bin per column.
    Vertical,
    /// One bin per row.
    Horizontal,
}

pub fn count_nonzero_row(img: &GrayImage, y: u32) -> usize {
    (0..img.width())
        .filter(|&x| img.get_pixel(x, y).0[0] != 0)
        .count()
}

pub fn count_nonzero_col(img: &GrayImage, x: u32) -> usize {
    (0..img.height())
        .filter(|&y| img.get_pixel(x, y).0[0] != 0)
        .count()
}

/// Non-zero counts along `dir`, divided by the largest bin.
///
/// An all-zero image yields an all-zero histogram.
pub fn projected_histogram(img: &GrayImage, dir: Direction) -> Vec<f32> {
    let counts: Vec<usize> = match dir {
        Direction::Vertical => (0..img.width()).map(|x| count_nonzero_col(img, x)).collect(),
        Direction::Horizontal => (0..img.height()).map(|y| count_nonzero_row(img, y)).collect(),
    };
    normalize_by_max(counts.into_iter().map(|c| c as f32).collect())
}

/// 180-bin histogram of the 8-bit hue channel, divided by the largest bin.
pub fn hue_histogram(img: &RgbImage) -> Vec<f32> {
    let mut bins = vec![0f32; 180];
    for px in img.pixels() {
        let h = rgb_to_hsv_pixel(px.0)[0] as usize;
        bins[h.min(179)] += 1.0;
    }
    normalize_by_max(bins)
}

fn normalize_by_max(mut v: Vec<f32>) -> Vec<f32> {
    let max = v.iter().copied().fold(0f32, f32::max);
    if max > 0.0 {
        v.iter_mut().for_each(|x| *x /= max);
    }
    v
}
