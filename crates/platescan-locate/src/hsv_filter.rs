//! Color-band candidate extraction.

use platescan_core::{
    close, enlarge_mask, equalize_value, external_regions, narrow, rgb_to_hsv_pixel, DebugDump,
    GrayImage, PlateColor, RgbImage,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{screen_blocks, CandidateCrop, LocateParams, Strategy};

/// Zero every pixel outside the primary HSV band of `color`.
pub fn band_filter(src: &RgbImage, color: PlateColor) -> RgbImage {
    let band = color.hsv_band();
    let mut out = src.clone();
    for px in out.pixels_mut() {
        if !band.admits(rgb_to_hsv_pixel(px.0), false) {
            px.0 = [0, 0, 0];
        }
    }
    out
}

/// Second pass: equalize V, then keep pixels in the equalized band.
pub fn equalized_band_mask(filtered: &RgbImage, color: PlateColor) -> GrayImage {
    let band = color.hsv_band();
    let eq = equalize_value(filtered);
    let mut mask = GrayImage::new(filtered.width(), filtered.height());
    for (x, y, px) in mask.enumerate_pixels_mut() {
        if band.admits(eq.get(x, y), true) {
            px.0[0] = 255;
        }
    }
    mask
}

/// Candidates whose pixels fall in the HSV band of `color`.
///
/// Green plates have a light upper band that the hue test misses, so green
/// blocks are grown upward by `hsv.green_expand_up`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(src, params, dump), fields(color = %color))
)]
pub fn hsv_candidates(
    src: &RgbImage,
    color: PlateColor,
    params: &LocateParams,
    dump: &DebugDump,
) -> Vec<CandidateCrop> {
    let (work, _) = narrow(src, params.working_width);
    let filtered = band_filter(&work, color);
    let mask = close(&equalized_band_mask(&filtered, color), params.hsv.close_kernel);

    if dump.is_enabled() {
        let stage = format!("hsv_{}_mask", color.name());
        dump.gray(&stage, &mask);
    }

    let full = enlarge_mask(&mask, src.width(), src.height());
    let regions = external_regions(&full);
    let grow = (color == PlateColor::Green).then_some(params.hsv.green_expand_up);
    let blocks = screen_blocks(&regions, src.width(), src.height(), &params.block, grow);
    log::debug!(
        "hsv {color}: {} contours, {} plate-shaped blocks",
        regions.len(),
        blocks.len()
    );

    blocks
        .into_iter()
        .filter_map(|r| CandidateCrop::from_source(src, r, Strategy::Hsv(color)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use platescan_core::Region;

    fn photo_with_plate(plate: Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(600, 400, |x, y| {
            let in_plate = (200..404).contains(&x) && (170..224).contains(&y);
            let in_char = in_plate && (182..218).contains(&y) && (x - 200) % 28 >= 8 && (x - 200) % 28 < 23;
            if in_char {
                Rgb([245, 245, 245])
            } else if in_plate {
                plate
            } else {
                Rgb([128, 128, 128])
            }
        })
    }

    #[test]
    fn blue_plate_is_found_exactly() {
        let img = photo_with_plate(Rgb([20, 60, 200]));
        let out = hsv_candidates(&img, PlateColor::Blue, &LocateParams::default(), &DebugDump::disabled());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, Region::new(200, 170, 204, 54));
        assert_eq!(out[0].strategy, Strategy::Hsv(PlateColor::Blue));
    }

    #[test]
    fn blue_pass_ignores_yellow_plate() {
        let img = photo_with_plate(Rgb([220, 180, 20]));
        let blue = hsv_candidates(&img, PlateColor::Blue, &LocateParams::default(), &DebugDump::disabled());
        assert!(blue.is_empty());
        let yellow =
            hsv_candidates(&img, PlateColor::Yellow, &LocateParams::default(), &DebugDump::disabled());
        assert_eq!(yellow.len(), 1);
    }

    #[test]
    fn green_blocks_grow_upward() {
        let img = photo_with_plate(Rgb([30, 170, 60]));
        let out = hsv_candidates(&img, PlateColor::Green, &LocateParams::default(), &DebugDump::disabled());
        assert_eq!(out.len(), 1);
        let r = out[0].source;
        assert_eq!(r.bottom(), 224);
        assert_eq!(r.y, 170 - 8);
        assert_eq!((r.x, r.width), (200, 204));
    }

    #[test]
    fn band_filter_blanks_unsaturated_pixels() {
        let img = photo_with_plate(Rgb([20, 60, 200]));
        let f = band_filter(&img, PlateColor::Blue);
        assert_eq!(f.get_pixel(10, 10).0, [0, 0, 0]);
        assert_eq!(f.get_pixel(201, 171).0, [20, 60, 200]);
    }
}
