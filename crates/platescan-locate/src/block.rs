use platescan_core::Region;

use crate::BlockFilterParams;

/// Keep plate-shaped blocks.
///
/// The geometric screen is applied to the detected box. When `grow_up` is
/// set, survivors are then grown upward by that fraction of their height and
/// clamped to the image.
pub fn screen_blocks(
    regions: &[Region],
    width: u32,
    height: u32,
    params: &BlockFilterParams,
    grow_up: Option<f32>,
) -> Vec<Region> {
    let max_area = (width as f64 * height as f64 * params.max_area_frac as f64) as i64;
    regions
        .iter()
        .filter_map(|r| r.clamp_to(width, height))
        .filter(|r| {
            let aspect = r.aspect();
            let area = r.area();
            aspect >= params.min_aspect
                && aspect <= params.max_aspect
                && area >= params.min_area
                && area <= max_area
        })
        .filter_map(|r| match grow_up {
            Some(frac) => r.grow_up(frac).clamp_to(width, height),
            None => Some(r),
        })
        .collect()
}
