//! Character segmentation and recognition on accepted plate crops.
//!
//! [`CharSegmenter::segment`] turns a canonical plate crop into ordered
//! [`CharSegment`]s: the administrative character at ordinal 0, then the
//! characters from the specific (city letter) position onwards. Each segment
//! image maps to a fixed-length vector with [`char_features`], which a
//! [`CharClassifier`] labels.
//!
//! The stages are exposed individually ([`estimate_shear`],
//! [`clear_frame_rows`], [`normalize_and_sort`], …) so they can be tested
//! and tuned one by one.

mod alphabet;
mod classify;
mod clear;
mod error;
mod features;
mod layout;
mod params;
mod preprocess;
mod segment;
mod skew;

pub use alphabet::{Alphabet, ALNUM, PROVINCES};
pub use classify::{AlnumVariants, CharClassifier, CharModelSet, Prediction};
pub use clear::clear_frame_rows;
pub use error::SegmentError;
pub use features::{char_features, feature_len, PREDICT_SIZE};
pub use layout::{
    check_char_size, infer_admin_region, locate_specific, normalize_and_sort, specific_band,
};
pub use params::SegmentParams;
pub use preprocess::preprocess_char;
pub use segment::{CharSegment, CharSegmenter, Segmentation};
pub use skew::{apply_shear, estimate_shear};
