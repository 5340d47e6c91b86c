use platescan_core::Kernel;
use serde::{Deserialize, Serialize};

/// Character segmentation settings.
///
/// Pixel quantities assume a canonical 136×36 crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// Characters on a standard plate, administrative one included.
    pub max_chars: usize,
    pub blur_sigma: f32,
    pub erode_kernel: Kernel,
    pub dilate_kernel: Kernel,

    /// Shear candidates are `-shear_range..=shear_range` pixels.
    pub shear_range: i32,
    /// Rows skipped at the top and bottom while sampling sheared columns.
    pub shear_ignore_rows: u32,
    /// A sample at or below this value counts as dark.
    pub dark_level: u8,
    /// A sheared column with this many dark samples counts as a gap.
    pub dark_cells: u32,

    /// Rows with at most this many lit pixels are cleared.
    pub row_clear_max: usize,
    /// Clearing a row within this margin of an edge clears up to the edge.
    pub row_clear_margin: u32,

    /// Accepted character heights, `[min, max)`.
    pub min_char_height: i32,
    pub max_char_height: i32,
    /// Characters must be narrower than this width/height ratio.
    pub max_char_aspect: f32,

    /// Boxes off the mean top or height by this much are snapped to it.
    pub snap_tolerance: i32,
    /// Only boxes at least this wide enter the mean width.
    pub wide_char_width: i32,

    /// Size ratio (to the largest box) for the specific-position test.
    pub specific_size_ratio: f32,
    /// Synthesized administrative box width, relative to the specific box.
    pub admin_width_factor: f32,

    /// Side of the normalized character square.
    pub char_size: u32,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            max_chars: 7,
            blur_sigma: 1.0,
            erode_kernel: Kernel::new(2, 2),
            dilate_kernel: Kernel::new(2, 2),
            shear_range: 25,
            shear_ignore_rows: 6,
            dark_level: 10,
            dark_cells: 24,
            row_clear_max: 15,
            row_clear_margin: 10,
            min_char_height: 15,
            max_char_height: 35,
            max_char_aspect: 1.0,
            snap_tolerance: 2,
            wide_char_width: 10,
            specific_size_ratio: 0.8,
            admin_width_factor: 1.15,
            char_size: 20,
        }
    }
}
