use platescan_core::{count_nonzero_row, GrayImage};

use crate::SegmentParams;

/// Blank near-empty rows and the plate frame above/below them.
///
/// A row with at most `row_clear_max` lit pixels is cleared. When such a row
/// lies within `row_clear_margin` of the top, every row above it is cleared
/// too; within the margin of the bottom, every row below it.
///
/// Returns the cleaned mask and the last cleared row in the upper half
/// (0 when none), which marks where the character band starts.
pub fn clear_frame_rows(binary: &GrayImage, params: &SegmentParams) -> (GrayImage, i32) {
    let rows = binary.height();
    let margin = params.row_clear_margin;
    let mut cleared = vec![false; rows as usize];

    for y in 0..rows {
        if count_nonzero_row(binary, y) > params.row_clear_max {
            continue;
        }
        cleared[y as usize] = true;
        if y < margin {
            cleared[..y as usize].iter_mut().for_each(|c| *c = true);
        }
        if y + margin > rows {
            cleared[y as usize + 1..].iter_mut().for_each(|c| *c = true);
        }
    }

    let mut out = binary.clone();
    let mut min_y = 0;
    for (y, _) in cleared.iter().enumerate().filter(|&(_, &c)| c) {
        if y as u32 <= rows / 2 {
            min_y = y as i32;
        }
        for x in 0..out.width() {
            out.get_pixel_mut(x, y as u32).0[0] = 0;
        }
    }
    (out, min_y)
}
