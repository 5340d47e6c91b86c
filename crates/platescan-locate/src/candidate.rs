use platescan_core::{crop_rgb, resize_rgb, PlateColor, Region, RgbImage, PLATE_HEIGHT, PLATE_WIDTH};
use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "lowercase")]
pub enum Strategy {
    Contour,
    Hsv(PlateColor),
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Contour => f.write_str("contour"),
            Strategy::Hsv(c) => write!(f, "hsv:{c}"),
        }
    }
}

/// A canonical-size crop that might be a plate.
#[derive(Clone, Debug)]
pub struct CandidateCrop {
    pub image: RgbImage,
    /// Where the crop was read from, in source coordinates.
    pub source: Region,
    pub strategy: Strategy,
}

impl CandidateCrop {
    /// Crop `region` from the full-resolution source and resample it.
    pub(crate) fn from_source(src: &RgbImage, region: Region, strategy: Strategy) -> Option<Self> {
        let clamped = region.clamp_to(src.width(), src.height())?;
        let crop = crop_rgb(src, clamped)?;
        Some(Self {
            image: resize_rgb(&crop, PLATE_WIDTH, PLATE_HEIGHT),
            source: clamped,
            strategy,
        })
    }
}
