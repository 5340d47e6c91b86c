use platescan_core::{Kernel, PlateColor};
use serde::{Deserialize, Serialize};

/// Geometric screen applied to every contour bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockFilterParams {
    /// Inclusive width/height bounds.
    pub min_aspect: f32,
    pub max_aspect: f32,
    /// Minimum area in source pixels.
    pub min_area: i64,
    /// Maximum area as a fraction of the source image.
    pub max_area_frac: f32,
}

impl Default for BlockFilterParams {
    fn default() -> Self {
        Self {
            min_aspect: 2.0,
            max_aspect: 6.0,
            min_area: 1000,
            max_area_frac: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    pub blur_sigma: f32,
    pub close_kernel: Kernel,
    pub erode_kernel: Kernel,
    pub dilate_kernel: Kernel,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.0,
            close_kernel: Kernel::new(17, 3),
            erode_kernel: Kernel::new(4, 4),
            dilate_kernel: Kernel::new(4, 4),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvParams {
    /// One HSV pass runs per listed color.
    pub colors: Vec<PlateColor>,
    pub close_kernel: Kernel,
    /// Upward growth of green blocks, as a fraction of their height.
    pub green_expand_up: f32,
}

impl Default for HsvParams {
    fn default() -> Self {
        Self {
            colors: vec![PlateColor::Blue],
            close_kernel: Kernel::new(17, 3),
            green_expand_up: 0.15,
        }
    }
}

/// Color classifier thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorParams {
    /// Scale the S/V floor with hue distance from the band center.
    pub adaptive: bool,
    /// A color wins when its match ratio is strictly above this.
    pub match_threshold: f32,
    pub max_sv: u8,
    /// Floor reference in adaptive mode.
    pub min_ref_sv: u8,
    /// Fixed floor when `adaptive` is off.
    pub min_abs_sv: u8,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            adaptive: true,
            match_threshold: 0.5,
            max_sv: 255,
            min_ref_sv: 64,
            min_abs_sv: 95,
        }
    }
}

/// Plate acceptance settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptParams {
    /// SVM label meaning "this is a plate".
    pub positive_label: i32,
}

impl Default for AcceptParams {
    fn default() -> Self {
        Self { positive_label: 0 }
    }
}

/// Everything candidate extraction needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateParams {
    /// Working images are downscaled to at most this width.
    pub working_width: u32,
    pub contour: ContourParams,
    pub hsv: HsvParams,
    pub block: BlockFilterParams,
}

impl Default for LocateParams {
    fn default() -> Self {
        Self {
            working_width: 600,
            contour: ContourParams::default(),
            hsv: HsvParams::default(),
            block: BlockFilterParams::default(),
        }
    }
}
