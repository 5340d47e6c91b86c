//! Character feature vector.
//!
//! The layout is shared with the offline trainer. Changing it invalidates
//! every character model.

use image::imageops::{self, FilterType};
use platescan_core::{projected_histogram, Direction, GrayImage};

/// Side of the thumbnail appended to the projections.
pub const PREDICT_SIZE: u32 = 10;

/// Feature length for a `char_size`×`char_size` character.
pub const fn feature_len(char_size: u32) -> usize {
    (2 * char_size + PREDICT_SIZE * PREDICT_SIZE) as usize
}

/// Column projection ++ row projection ++ raw 10×10 thumbnail intensities.
pub fn char_features(ch: &GrayImage) -> Vec<f32> {
    let mut f = projected_histogram(ch, Direction::Vertical);
    f.extend(projected_histogram(ch, Direction::Horizontal));
    let low = imageops::resize(ch, PREDICT_SIZE, PREDICT_SIZE, FilterType::Triangle);
    f.extend(low.pixels().map(|p| p.0[0] as f32));
    f
}
