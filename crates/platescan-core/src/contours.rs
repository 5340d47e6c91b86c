use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::Region;

/// Bounding boxes of the outer borders of top-level blobs in a binary mask.
///
/// Holes and nested blobs are skipped, matching an external-only retrieval.
/// Order follows the raster scan that discovers each border.
pub fn external_regions(mask: &GrayImage) -> Vec<Region> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let first = c.points.first()?;
            let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
            for p in &c.points {
                x0 = x0.min(p.x);
                y0 = y0.min(p.y);
                x1 = x1.max(p.x);
                y1 = y1.max(p.y);
            }
            Some(Region::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1))
        })
        .collect()
}
