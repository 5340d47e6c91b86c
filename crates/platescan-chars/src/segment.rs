//! Plate crop to ordered character images.

use platescan_core::{
    binarize_otsu, crop_gray, dilate, erode, external_regions, gaussian_blur, to_gray, DebugDump,
    GrayImage, PlateColor, Region, RgbImage,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::layout::{check_char_size, infer_admin_region, locate_specific, normalize_and_sort};
use crate::{apply_shear, clear_frame_rows, estimate_shear, preprocess_char, SegmentError, SegmentParams};

/// One character cut from a plate.
#[derive(Clone, Debug)]
pub struct CharSegment {
    /// 0 for the administrative character, then 1, 2, … left to right.
    pub ordinal: usize,
    /// Box in crop coordinates, after de-skew.
    pub region: Region,
    /// Letterboxed `char_size`×`char_size` image.
    pub image: GrayImage,
}

/// Segmentation output plus the intermediate values worth logging.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub chars: Vec<CharSegment>,
    pub shear: i32,
    /// Last cleared row in the upper half of the crop.
    pub min_y: i32,
    /// Index, among the sorted boxes, of the specific character.
    pub specific_index: usize,
    /// Sorted, normalized character boxes before selection.
    pub boxes: Vec<Region>,
}

#[derive(Clone, Debug, Default)]
pub struct CharSegmenter {
    params: SegmentParams,
}

impl CharSegmenter {
    pub fn new(params: SegmentParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SegmentParams {
        &self.params
    }

    /// Binary, de-skewed, frame-cleared mask of the crop.
    ///
    /// Returns the mask with the shear offset and `min_y` it was built with.
    pub fn clean_mask(&self, crop: &RgbImage, dump: &DebugDump) -> (GrayImage, i32, i32) {
        let p = &self.params;
        let gray = gaussian_blur(&to_gray(crop), p.blur_sigma);
        let (binary, _) = binarize_otsu(&gray);
        let eroded = erode(&binary, p.erode_kernel);
        let shear = estimate_shear(&eroded, p);
        let straight = apply_shear(&eroded, shear);
        let (cleared, min_y) = clear_frame_rows(&straight, p);
        let mask = dilate(&cleared, p.dilate_kernel);
        if dump.is_enabled() {
            dump.gray("plate_binary", &binary);
            dump.gray("plate_cleared", &mask);
        }
        (mask, shear, min_y)
    }

    /// Cut `crop` into at most `max_chars` characters.
    ///
    /// The administrative character comes first; its box is inferred from the
    /// specific (city letter) position. Then up to `max_chars - 1` boxes follow,
    /// starting at the specific position.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, crop, dump), fields(color = %color))
    )]
    pub fn segment(
        &self,
        crop: &RgbImage,
        color: PlateColor,
        dump: &DebugDump,
    ) -> Result<Segmentation, SegmentError> {
        let p = &self.params;
        let (mask, shear, min_y) = self.clean_mask(crop, dump);
        let w = mask.width();

        let candidates: Vec<Region> = external_regions(&mask)
            .into_iter()
            .filter(|r| check_char_size(r, p))
            .collect();
        if candidates.is_empty() {
            log::debug!("segment: no character boxes (shear {shear}, min_y {min_y})");
            return Err(SegmentError::NoCharacters);
        }

        let boxes = normalize_and_sort(&candidates, p);
        let specific_index = locate_specific(&boxes, color, w as i32, p);
        let prev = boxes[specific_index.saturating_sub(1)];
        let admin = infer_admin_region(boxes[specific_index], prev, p);
        log::debug!(
            "segment: {} boxes, specific #{specific_index}, shear {shear}, min_y {min_y}",
            boxes.len()
        );

        let rest = boxes
            .iter()
            .skip(specific_index)
            .take(p.max_chars.saturating_sub(1))
            .copied();
        let chars = cut_characters(&mask, std::iter::once(admin).chain(rest), p.char_size);

        if dump.is_enabled() {
            for c in &chars {
                dump.gray(&format!("char_{}", c.ordinal), &c.image);
            }
        }
        if chars.is_empty() {
            return Err(SegmentError::NoCharacters);
        }
        Ok(Segmentation {
            chars,
            shear,
            min_y,
            specific_index,
            boxes,
        })
    }
}

/// Letterboxed character images for `regions`, numbered by position.
///
/// A region that falls outside the mask is skipped without shifting the
/// ordinals of the ones after it.
fn cut_characters(
    mask: &GrayImage,
    regions: impl IntoIterator<Item = Region>,
    char_size: u32,
) -> Vec<CharSegment> {
    let (w, h) = mask.dimensions();
    regions
        .into_iter()
        .enumerate()
        .filter_map(|(ordinal, r)| {
            let region = r.clamp_to(w, h)?;
            let cut = crop_gray(mask, region)?;
            Some(CharSegment {
                ordinal,
                region,
                image: preprocess_char(&cut, char_size),
            })
        })
        .collect()
}
