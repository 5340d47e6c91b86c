use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the pixel coordinates of a parent image.
///
/// Coordinates are signed so that inferred boxes (for example a synthesized
/// administrative-character box) can be expressed before they are clamped.
/// Anything handed to a crop must go through [`Region::clamp_to`] first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    /// Width over height; `0.0` for degenerate regions.
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height <= 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Integer horizontal center, `x + width / 2`.
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when the intersection is empty, so a returned region
    /// always has positive extent.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Region> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Region::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Grow the region upward by `frac * height`, keeping the bottom edge.
    pub fn grow_up(&self, frac: f32) -> Region {
        let extra = (self.height as f32 * frac.max(0.0)).round() as i32;
        Region::new(self.x, self.y - extra, self.width, self.height + extra)
    }

    /// Intersection over union; `0.0` when either region is empty.
    pub fn iou(&self, other: &Region) -> f32 {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return 0.0;
        }
        let inter = (x1 - x0) as i64 * (y1 - y0) as i64;
        let union = self.area() + other.area() - inter;
        if union <= 0 {
            return 0.0;
        }
        inter as f32 / union as f32
    }
}
