//! Plate acceptance: histogram features and the binary SVM decision.

use platescan_core::{
    binarize_otsu, hue_histogram, projected_histogram, to_gray, Direction, RgbImage, PLATE_HEIGHT,
    PLATE_WIDTH,
};
use platescan_ml::SvmModel;

use crate::AcceptParams;

/// Length of [`plate_features`] for a canonical crop.
pub const PLATE_FEATURE_LEN: usize = (PLATE_WIDTH + PLATE_HEIGHT) as usize + 180;

/// Column projection ++ row projection of the Otsu-binarized gray crop,
/// followed by the normalized 180-bin hue histogram.
pub fn plate_features(crop: &RgbImage) -> Vec<f32> {
    let (binary, _) = binarize_otsu(&to_gray(crop));
    let mut features = projected_histogram(&binary, Direction::Vertical);
    features.extend(projected_histogram(&binary, Direction::Horizontal));
    features.extend(hue_histogram(crop));
    features
}

/// Whether `crop` is a plate according to `model`.
///
/// Crops that are not canonical size are rejected without running the model.
/// A feature/model size mismatch is logged and treated as a reject.
pub fn accept_plate(model: &SvmModel, crop: &RgbImage, params: &AcceptParams) -> bool {
    if crop.dimensions() != (PLATE_WIDTH, PLATE_HEIGHT) {
        log::trace!("reject: crop is {:?}, not canonical", crop.dimensions());
        return false;
    }
    match model.predict(&plate_features(crop)) {
        Ok(label) => label == params.positive_label,
        Err(e) => {
            log::warn!("plate model cannot score crop: {e}");
            false
        }
    }
}
