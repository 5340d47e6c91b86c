//! Plate color palette.
//!
//! Hue values follow the 8-bit OpenCV convention (0..180). The tables are
//! compile-time constants: a color is looked up by value, never built per
//! request.

use serde::{Deserialize, Serialize};

/// Background color of a plate. Selects thresholds and character models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateColor {
    Blue,
    Green,
    Yellow,
}

/// Half-open hue interval `(min_h, max_h]` used by the color classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HueRange {
    pub min_h: u8,
    pub max_h: u8,
}

impl HueRange {
    #[inline]
    pub fn contains(&self, h: u8) -> bool {
        self.min_h < h && h <= self.max_h
    }

    /// Half of the interval width.
    #[inline]
    pub fn half_width(&self) -> f32 {
        // integer halving, as the match ratio was tuned with it
        ((self.max_h - self.min_h) / 2) as f32
    }

    /// Integer center of the interval.
    #[inline]
    pub fn center(&self) -> i32 {
        self.min_h as i32 + self.half_width() as i32
    }
}

/// Two-pass HSV band used by the HSV candidate strategy.
///
/// `hue` gates the first filter on the raw frame, `equalized_hue` the second
/// threshold after value equalization. Both ranges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvBand {
    pub hue: (u8, u8),
    pub equalized_hue: (u8, u8),
    pub min_s: u8,
    pub min_v: u8,
}

impl HsvBand {
    #[inline]
    pub fn admits(&self, hsv: [u8; 3], equalized: bool) -> bool {
        let (lo, hi) = if equalized {
            self.equalized_hue
        } else {
            self.hue
        };
        let [h, s, v] = hsv;
        lo <= h && h <= hi && s >= self.min_s && v >= self.min_v
    }
}

impl PlateColor {
    /// Order in which the color classifier tests colors. The first match wins.
    pub const PRIORITY: [PlateColor; 3] = [PlateColor::Green, PlateColor::Yellow, PlateColor::Blue];

    pub const fn hue_range(self) -> HueRange {
        match self {
            PlateColor::Blue => HueRange {
                min_h: 100,
                max_h: 140,
            },
            PlateColor::Green => HueRange {
                min_h: 35,
                max_h: 99,
            },
            PlateColor::Yellow => HueRange {
                min_h: 11,
                max_h: 34,
            },
        }
    }

    pub const fn hsv_band(self) -> HsvBand {
        match self {
            PlateColor::Blue => HsvBand {
                hue: (100, 124),
                equalized_hue: (100, 130),
                min_s: 43,
                min_v: 46,
            },
            PlateColor::Green => HsvBand {
                hue: (35, 77),
                equalized_hue: (35, 90),
                min_s: 43,
                min_v: 46,
            },
            PlateColor::Yellow => HsvBand {
                hue: (11, 34),
                equalized_hue: (11, 34),
                min_s: 43,
                min_v: 46,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PlateColor::Blue => "blue",
            PlateColor::Green => "green",
            PlateColor::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for PlateColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
