//! Geometry of character boxes on a plate crop.

use std::collections::BTreeMap;

use platescan_core::{PlateColor, Region};

use crate::SegmentParams;

/// Character-shaped box: narrower than tall, height in the accepted band.
pub fn check_char_size(r: &Region, params: &SegmentParams) -> bool {
    r.height > 0
        && r.aspect() < params.max_char_aspect
        && params.min_char_height <= r.height
        && r.height < params.max_char_height
}

/// Snap outliers to the mean geometry and sort left to right.
///
/// Boxes whose top or height is off the mean by `snap_tolerance` or more get
/// the mean top (less one pixel) and mean height. Boxes wider than the mean
/// width of the wide boxes (at least `wide_char_width`) are narrowed to it;
/// when no box is that wide, widths are kept. Boxes sharing an `x` collapse
/// to the last one.
pub fn normalize_and_sort(boxes: &[Region], params: &SegmentParams) -> Vec<Region> {
    if boxes.is_empty() {
        return Vec::new();
    }
    let n = boxes.len() as i32;
    let avg_y = boxes.iter().map(|r| r.y).sum::<i32>() / n;
    let avg_h = boxes.iter().map(|r| r.height).sum::<i32>() / n;
    let wide: Vec<i32> = boxes
        .iter()
        .map(|r| r.width)
        .filter(|&w| w >= params.wide_char_width)
        .collect();
    let avg_w = (!wide.is_empty()).then(|| wide.iter().sum::<i32>() / wide.len() as i32);

    let by_x: BTreeMap<i32, Region> = boxes.iter().map(|r| (r.x, *r)).collect();
    by_x.into_values()
        .map(|mut r| {
            if (avg_y - r.y).abs() >= params.snap_tolerance
                || (r.height - avg_h).abs() >= params.snap_tolerance
            {
                r = Region::new(r.x, avg_y - 1, r.width, avg_h);
            }
            if let Some(w) = avg_w {
                if r.width > w {
                    r.width = w;
                }
            }
            r
        })
        .collect()
}

/// Horizontal band, in pixels of a plate `plate_width` wide, where the
/// center of the specific (city letter) box lies. Both ends are exclusive.
pub fn specific_band(color: PlateColor, plate_width: i32) -> (i32, i32) {
    let slots = if color == PlateColor::Green { 8 } else { 7 };
    (plate_width / slots, plate_width * 2 / slots)
}

/// Index of the first sizeable box whose center falls in [`specific_band`].
///
/// Falls back to 0 when no box qualifies.
pub fn locate_specific(
    sorted: &[Region],
    color: PlateColor,
    plate_width: i32,
    params: &SegmentParams,
) -> usize {
    let max_w = sorted.iter().map(|r| r.width).max().unwrap_or(0) as f32;
    let max_h = sorted.iter().map(|r| r.height).max().unwrap_or(0) as f32;
    let (lo, hi) = specific_band(color, plate_width);
    let ratio = params.specific_size_ratio;

    sorted
        .iter()
        .position(|r| {
            let sizeable = r.width as f32 > max_w * ratio || r.height as f32 > max_h * ratio;
            let mid = r.center_x();
            sizeable && lo < mid && mid < hi
        })
        .unwrap_or(0)
}

/// Box of the administrative character left of `specific`.
///
/// `prev` is used when it is at least as wide as `specific` and ends a full
/// character width before it. Otherwise a box `admin_width_factor` times as
/// wide is placed left of `specific`, never starting left of 0.
pub fn infer_admin_region(specific: Region, prev: Region, params: &SegmentParams) -> Region {
    if prev.width >= specific.width && prev.x <= specific.x - specific.width {
        return prev;
    }
    let f = params.admin_width_factor;
    let width = specific.width as f32 * f;
    let x = (specific.x - (width * f) as i32).max(0);
    Region::new(x, specific.y, width as i32, specific.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> SegmentParams {
        SegmentParams::default()
    }

    #[test]
    fn size_screen_accepts_narrow_characters() {
        assert!(check_char_size(&Region::new(0, 0, 6, 20), &p()));
        assert!(!check_char_size(&Region::new(0, 0, 20, 20), &p()));
        assert!(!check_char_size(&Region::new(0, 0, 30, 20), &p()));
        assert!(!check_char_size(&Region::new(0, 0, 5, 14), &p()));
        assert!(check_char_size(&Region::new(0, 0, 5, 15), &p()));
        assert!(!check_char_size(&Region::new(0, 0, 10, 35), &p()));
    }

    #[test]
    fn outliers_snap_to_mean_geometry() {
        let boxes = [
            Region::new(40, 8, 10, 22),
            Region::new(10, 8, 10, 22),
            Region::new(25, 3, 12, 30), // rivet-inflated box
            Region::new(55, 8, 4, 22),  // a "1"
        ];
        let out = normalize_and_sort(&boxes, &p());
        let xs: Vec<i32> = out.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![10, 25, 40, 55]);
        // means: y 6, h 24, wide width (10 + 12 + 10) / 3 = 10
        assert_eq!(out[1], Region::new(25, 5, 10, 24));
        assert_eq!(out[0], Region::new(10, 5, 10, 24));
        assert_eq!(out[3].width, 4);
    }

    #[test]
    fn widths_kept_when_no_box_is_wide() {
        let boxes = [Region::new(0, 5, 6, 20), Region::new(10, 5, 8, 20)];
        let out = normalize_and_sort(&boxes, &p());
        assert_eq!(out[0].width, 6);
        assert_eq!(out[1].width, 8);
    }

    #[test]
    fn green_band_sits_further_left() {
        assert_eq!(specific_band(PlateColor::Blue, 136), (19, 38));
        assert_eq!(specific_band(PlateColor::Green, 136), (17, 34));
    }

    #[test]
    fn first_qualifying_box_is_specific() {
        let sorted = [
            Region::new(2, 6, 10, 24),
            Region::new(21, 6, 10, 24), // center 26
            Region::new(29, 6, 10, 24), // center 34, also in the blue band
        ];
        assert_eq!(locate_specific(&sorted, PlateColor::Blue, 136, &p()), 1);
        // the green band ends at 34 (exclusive), only center 26 qualifies
        assert_eq!(locate_specific(&sorted, PlateColor::Green, 136, &p()), 1);
    }

    #[test]
    fn small_boxes_cannot_be_specific() {
        let sorted = [Region::new(2, 6, 10, 24), Region::new(24, 20, 3, 4)];
        assert_eq!(locate_specific(&sorted, PlateColor::Blue, 136, &p()), 0);
    }

    #[test]
    fn previous_box_is_reused_when_it_fits() {
        let specific = Region::new(21, 6, 10, 24);
        let prev = Region::new(4, 6, 11, 24);
        assert_eq!(infer_admin_region(specific, prev, &p()), prev);
    }

    #[test]
    fn admin_box_is_synthesized_left_of_specific() {
        let specific = Region::new(21, 6, 10, 24);
        let narrow_prev = Region::new(4, 6, 6, 24);
        // width 11.5 -> 11, offset (11.5 * 1.15) -> 13
        assert_eq!(
            infer_admin_region(specific, narrow_prev, &p()),
            Region::new(8, 6, 11, 24)
        );
        // clamped at the left edge
        let near = Region::new(5, 6, 10, 24);
        assert_eq!(infer_admin_region(near, near, &p()).x, 0);
    }
}
