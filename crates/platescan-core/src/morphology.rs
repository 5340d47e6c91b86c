//! Rectangular-kernel morphology on binary masks.
//!
//! Plate localization needs wide flat kernels (17×3), which `imageproc`
//! expresses as a [`Mask`] built from a filled rectangle. The anchor sits at
//! `(width / 2, height / 2)` and out-of-image pixels are ignored.

use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_close, grayscale_dilate, grayscale_erode, Mask};
use serde::{Deserialize, Serialize};

/// Largest side `Mask::from_image` accepts.
const MAX_SIDE: u32 = 511;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kernel {
    pub width: u32,
    pub height: u32,
}

impl Kernel {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn is_identity(&self) -> bool {
        self.width <= 1 && self.height <= 1
    }

    fn is_noop_on(&self, src: &GrayImage) -> bool {
        self.is_identity() || src.width() == 0 || src.height() == 0
    }

    fn mask(&self) -> Mask {
        let w = self.width.clamp(1, MAX_SIDE);
        let h = self.height.clamp(1, MAX_SIDE);
        let filled = GrayImage::from_pixel(w, h, Luma([255]));
        // w, h <= 511 so the halves fit in u8
        Mask::from_image(&filled, (w / 2) as u8, (h / 2) as u8)
    }
}

pub fn erode(src: &GrayImage, kernel: Kernel) -> GrayImage {
    if kernel.is_noop_on(src) {
        return src.clone();
    }
    grayscale_erode(src, &kernel.mask())
}

pub fn dilate(src: &GrayImage, kernel: Kernel) -> GrayImage {
    if kernel.is_noop_on(src) {
        return src.clone();
    }
    grayscale_dilate(src, &kernel.mask())
}

/// Morphological closing: dilate then erode. Bridges gaps narrower than the kernel.
pub fn close(src: &GrayImage, kernel: Kernel) -> GrayImage {
    if kernel.is_noop_on(src) {
        return src.clone();
    }
    grayscale_close(src, &kernel.mask())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> GrayImage {
        // two 3-px bars separated by a 4-px gap
        GrayImage::from_fn(20, 5, |x, _| {
            Luma([if (4..7).contains(&x) || (11..14).contains(&x) {
                255
            } else {
                0
            }])
        })
    }

    #[test]
    fn close_bridges_narrow_gaps() {
        let closed = close(&bars(), Kernel::new(5, 1));
        for x in 4..14 {
            assert_eq!(closed.get_pixel(x, 2).0[0], 255, "x={x}");
        }
        assert_eq!(closed.get_pixel(2, 2).0[0], 0);
        assert_eq!(closed.get_pixel(16, 2).0[0], 0);
    }

    #[test]
    fn erode_removes_thin_structures() {
        let eroded = erode(&bars(), Kernel::new(4, 1));
        assert!(eroded.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn dilate_grows_by_anchor_offsets() {
        let mut img = GrayImage::new(9, 9);
        img.put_pixel(4, 4, Luma([255]));
        let d = dilate(&img, Kernel::new(3, 3));
        let lit = d.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(lit, 9);
        assert_eq!(d.get_pixel(3, 3).0[0], 255);
        assert_eq!(d.get_pixel(5, 5).0[0], 255);
    }

    #[test]
    fn flat_kernel_only_grows_along_its_long_axis() {
        let mut img = GrayImage::new(21, 9);
        img.put_pixel(10, 4, Luma([255]));
        let d = dilate(&img, Kernel::new(17, 3));
        assert_eq!(d.pixels().filter(|p| p.0[0] == 255).count(), 17 * 3);
        assert_eq!(d.get_pixel(2, 4).0[0], 255);
        assert_eq!(d.get_pixel(18, 5).0[0], 255);
        assert_eq!(d.get_pixel(10, 6).0[0], 0);
    }

    #[test]
    fn oversized_kernel_is_clamped() {
        let img = GrayImage::from_pixel(6, 6, Luma([255]));
        assert_eq!(erode(&img, Kernel::new(4000, 1)), img);
    }

    #[test]
    fn unit_kernel_is_identity() {
        let img = bars();
        assert_eq!(erode(&img, Kernel::new(1, 1)), img);
    }
}
