//! Plate candidate extraction and plate-level classification.
//!
//! A photograph goes through two independent strategies, each producing
//! canonical 136×36 [`CandidateCrop`]s read from the full-resolution source:
//!
//! - [`contour_candidates`]: vertical-edge density;
//! - [`hsv_candidates`]: one pass per configured [`PlateColor`].
//!
//! [`extract_candidates`] runs both concurrently and concatenates their
//! output. Overlapping candidates are not merged. Accepted crops are then
//! typed with [`classify_color`].
//!
//! ```no_run
//! use platescan_core::DebugDump;
//! use platescan_locate::{extract_candidates, LocateParams};
//!
//! let img = image::open("car.jpg").unwrap().to_rgb8();
//! let crops = extract_candidates(&img, &LocateParams::default(), &DebugDump::disabled());
//! println!("{} candidates", crops.len());
//! ```

mod accept;
mod block;
mod candidate;
mod color;
mod contour;
mod hsv_filter;
mod params;

pub use accept::{accept_plate, plate_features, PLATE_FEATURE_LEN};
pub use block::screen_blocks;
pub use candidate::{CandidateCrop, Strategy};
pub use color::{classify_color, match_ratio, pick_by_priority};
pub use contour::contour_candidates;
pub use hsv_filter::{band_filter, equalized_band_mask, hsv_candidates};
pub use params::{
    AcceptParams, BlockFilterParams, ColorParams, ContourParams, HsvParams, LocateParams,
};

use platescan_core::{DebugDump, PlateColor, RgbImage};
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Run the contour strategy and every configured HSV pass in parallel.
///
/// Contour candidates come first, then HSV candidates in the order of
/// `params.hsv.colors`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, params, dump), fields(width = src.width(), height = src.height()))
)]
pub fn extract_candidates(
    src: &RgbImage,
    params: &LocateParams,
    dump: &DebugDump,
) -> Vec<CandidateCrop> {
    let (mut contour, hsv) = rayon::join(
        || contour_candidates(src, params, dump),
        || {
            params
                .hsv
                .colors
                .par_iter()
                .map(|&c| hsv_candidates(src, c, params, dump))
                .collect::<Vec<_>>()
        },
    );
    let n_contour = contour.len();
    contour.extend(hsv.into_iter().flatten());
    log::debug!(
        "{} candidates ({} contour, {} hsv)",
        contour.len(),
        n_contour,
        contour.len() - n_contour
    );
    contour
}
