//! Edge-density candidate extraction.

use platescan_core::{
    binarize_otsu, close, dilate, enlarge_mask, erode, external_regions, gaussian_blur, narrow,
    sobel_x_abs, to_gray, DebugDump, RgbImage,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{screen_blocks, CandidateCrop, LocateParams, Strategy};

/// Candidates from dense vertical-edge clusters.
///
/// Plate characters produce many closely spaced vertical edges; a wide flat
/// closing merges them into one plate-shaped blob.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, params, dump), fields(width = src.width(), height = src.height()))
)]
pub fn contour_candidates(
    src: &RgbImage,
    params: &LocateParams,
    dump: &DebugDump,
) -> Vec<CandidateCrop> {
    let p = &params.contour;
    let (work, scale) = narrow(src, params.working_width);

    let gray = to_gray(&work);
    let blurred = gaussian_blur(&gray, p.blur_sigma);
    let edges = sobel_x_abs(&blurred);
    let (binary, level) = binarize_otsu(&edges);
    let closed = close(&binary, p.close_kernel);
    let mask = dilate(&erode(&closed, p.erode_kernel), p.dilate_kernel);
    log::trace!("contour: otsu level {level}, working scale {scale:.3}");

    if dump.is_enabled() {
        dump.gray("contour_sobel", &edges);
        dump.gray("contour_binary", &binary);
        dump.gray("contour_mask", &mask);
    }

    let full = enlarge_mask(&mask, src.width(), src.height());
    let regions = external_regions(&full);
    let blocks = screen_blocks(&regions, src.width(), src.height(), &params.block, None);
    log::debug!(
        "contour: {} contours, {} plate-shaped blocks",
        regions.len(),
        blocks.len()
    );

    blocks
        .into_iter()
        .filter_map(|r| CandidateCrop::from_source(src, r, Strategy::Contour))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use platescan_core::{Region, PLATE_HEIGHT, PLATE_WIDTH};
    use image::Rgb;

    #[test]
    fn flat_image_has_no_candidates() {
        let img = RgbImage::from_pixel(320, 240, Rgb([120, 120, 120]));
        let out = contour_candidates(&img, &LocateParams::default(), &DebugDump::disabled());
        assert!(out.is_empty());
    }

    #[test]
    fn striped_patch_becomes_one_candidate() {
        // dark background, a 180x40 patch of 3-px white stripes every 8 px
        let img = RgbImage::from_fn(480, 320, |x, y| {
            let inside = (150..330).contains(&x) && (140..180).contains(&y);
            if inside && (x - 150) % 8 < 3 {
                Rgb([240, 240, 240])
            } else {
                Rgb([30, 30, 30])
            }
        });
        let out = contour_candidates(&img, &LocateParams::default(), &DebugDump::disabled());
        assert_eq!(out.len(), 1, "{:?}", out.iter().map(|c| c.source).collect::<Vec<_>>());
        let c = &out[0];
        assert_eq!(c.strategy, Strategy::Contour);
        assert_eq!(c.image.dimensions(), (PLATE_WIDTH, PLATE_HEIGHT));
        let expected = Region::new(150, 140, 180, 40);
        assert!(c.source.iou(&expected) > 0.6, "{:?}", c.source);
    }
}
