//! Core types and primitives for license plate recognition.
//!
//! This crate is stage-agnostic. It holds the image containers, the plate
//! color tables, the `Region` rectangle, and the small set of pixel
//! operations shared by candidate extraction and character segmentation.
//! Heavier primitives (blur, Sobel, Otsu level, histogram equalization,
//! contour tracing, resampling) are delegated to `image` / `imageproc`.

mod contours;
mod debug;
mod histogram;
mod hsv;
mod logger;
mod morphology;
mod ops;
mod plate_color;
mod region;
mod threshold;

pub use contours::external_regions;
pub use debug::DebugDump;
pub use histogram::{
    count_nonzero_col, count_nonzero_row, hue_histogram, projected_histogram, Direction,
};
pub use hsv::{equalize_value, hsv_at, hsv_to_rgb_pixel, rgb_to_hsv_pixel, HsvImage};
pub use morphology::{close, dilate, erode, Kernel};
pub use ops::{
    crop_gray, crop_rgb, enlarge_mask, get_gray_or_zero, narrow, resize_rgb, to_gray,
};
pub use plate_color::{HsvBand, HueRange, PlateColor};
pub use region::Region;
pub use threshold::{binarize_otsu, gaussian_blur, otsu_level, sobel_x_abs};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};

/// Width of a canonical plate crop.
pub const PLATE_WIDTH: u32 = 136;
/// Height of a canonical plate crop.
pub const PLATE_HEIGHT: u32 = 36;

/// Re-exported so downstream crates name the same image types.
pub use image::{GrayImage, RgbImage};
