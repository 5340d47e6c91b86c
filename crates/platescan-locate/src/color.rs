//! Plate color classification by hue match ratio.

use platescan_core::{equalize_value, HsvImage, PlateColor, RgbImage};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::ColorParams;

/// Fraction of pixels in `hsv` that match `color`.
///
/// A pixel matches when its hue is in the color's `(min_h, max_h]` range and
/// both S and V lie in `(min_sv, max_sv]`. In adaptive mode `min_sv` drops
/// from `min_ref_sv` at the band center to half of it at the band edge.
pub fn match_ratio(hsv: &HsvImage, color: PlateColor, params: &ColorParams) -> f32 {
    let total = hsv.width as usize * hsv.height as usize;
    if total == 0 {
        return 0.0;
    }
    let range = color.hue_range();
    let half = range.half_width();
    let center = range.center();
    let max_sv = params.max_sv as f32;

    let matched = hsv
        .pixels()
        .filter(|&[h, s, v]| {
            if !range.contains(h) {
                return false;
            }
            let min_sv = if params.adaptive && half > 0.0 {
                let dist = (h as i32 - center).abs() as f32 / half;
                let r = params.min_ref_sv as f32;
                r - r / 2.0 * dist.min(1.0)
            } else {
                params.min_abs_sv as f32
            };
            let (s, v) = (s as f32, v as f32);
            s > min_sv && s <= max_sv && v > min_sv && v <= max_sv
        })
        .count();
    matched as f32 / total as f32
}

/// First color in [`PlateColor::PRIORITY`] whose ratio is above `threshold`,
/// else blue. Ratios are computed lazily, in priority order.
pub fn pick_by_priority(threshold: f32, mut ratio: impl FnMut(PlateColor) -> f32) -> PlateColor {
    PlateColor::PRIORITY
        .into_iter()
        .find(|&c| ratio(c) > threshold)
        .unwrap_or(PlateColor::Blue)
}

#[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
pub fn classify_color(crop: &RgbImage, params: &ColorParams) -> PlateColor {
    let hsv = equalize_value(crop);
    pick_by_priority(params.match_threshold, |c| {
        let r = match_ratio(&hsv, c, params);
        log::trace!("color {c}: ratio {r:.3}");
        r
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    fn plate(bg: Rgb<u8>) -> RgbImage {
        RgbImage::from_fn(136, 36, |x, y| {
            if (6..30).contains(&y) && x % 19 > 12 {
                Rgb([250, 250, 250])
            } else {
                bg
            }
        })
    }

    #[test]
    fn solid_colors_are_recognized() {
        let p = ColorParams::default();
        assert_eq!(classify_color(&plate(Rgb([20, 60, 200])), &p), PlateColor::Blue);
        assert_eq!(classify_color(&plate(Rgb([30, 170, 60])), &p), PlateColor::Green);
        assert_eq!(classify_color(&plate(Rgb([220, 180, 20])), &p), PlateColor::Yellow);
    }

    #[test]
    fn priority_order_beats_magnitude() {
        let ratios = |c: PlateColor| match c {
            PlateColor::Green => 0.51,
            PlateColor::Yellow => 0.0,
            PlateColor::Blue => 0.99,
        };
        assert_eq!(pick_by_priority(0.5, ratios), PlateColor::Green);
    }

    #[test]
    fn blue_is_the_fallback() {
        assert_eq!(pick_by_priority(0.5, |_| 0.2), PlateColor::Blue);
        let gray = RgbImage::from_pixel(136, 36, Rgb([128, 128, 128]));
        assert_eq!(classify_color(&gray, &ColorParams::default()), PlateColor::Blue);
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(
            pick_by_priority(0.5, |c| if c == PlateColor::Yellow { 0.5 } else { 0.0 }),
            PlateColor::Blue
        );
    }

    #[test]
    fn adaptive_floor_is_looser_at_band_edge() {
        // S = V = 50: below the center floor (64), above the edge floor (~34)
        let pixel = |h: u8| {
            let mut hsv = HsvImage::new(1, 1);
            hsv.put(0, 0, [h, 50, 50]);
            hsv
        };
        let p = ColorParams::default();
        assert_relative_eq!(match_ratio(&pixel(120), PlateColor::Blue, &p), 0.0);
        assert_relative_eq!(match_ratio(&pixel(139), PlateColor::Blue, &p), 1.0);

        let fixed = ColorParams {
            adaptive: false,
            ..ColorParams::default()
        };
        assert_relative_eq!(match_ratio(&pixel(139), PlateColor::Blue, &fixed), 0.0);
    }

    #[test]
    fn saturated_center_pixel_passes_adaptive_floor() {
        let mut hsv = HsvImage::new(1, 1);
        hsv.put(0, 0, [120, 65, 65]);
        assert_relative_eq!(
            match_ratio(&hsv, PlateColor::Blue, &ColorParams::default()),
            1.0
        );
    }
}
