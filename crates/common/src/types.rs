//! Core types for pagediff

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned box in pixel coordinates. `width` and `height` count pixels,
/// so a single pixel has a 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Box spanning two inclusive corners
    pub fn from_corners(x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Self {
        Self {
            x: x_min,
            y: y_min,
            width: x_max - x_min + 1,
            height: y_max - y_min + 1,
        }
    }

    /// Inclusive right edge
    pub fn x_max(&self) -> u32 {
        self.x + self.width - 1
    }

    /// Inclusive bottom edge
    pub fn y_max(&self) -> u32 {
        self.y + self.height - 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x <= self.x_max() && y >= self.y && y <= self.y_max()
    }

    /// Integer midpoint of the box
    pub fn center(&self) -> (u32, u32) {
        ((self.x + self.x_max()) / 2, (self.y + self.y_max()) / 2)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Coarse tier of a region's mean difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One connected area of disagreement between the two images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Component label, in row-major first-encounter order
    pub id: u32,
    pub bbox: BoundingBox,
    /// Number of pixels in the component (not the box area)
    pub area: u64,
    pub center: (u32, u32),
    /// Mean per-channel difference over the component's pixels
    pub avg_diff: f64,
    pub severity: Severity,
    pub section: String,
}

/// Aggregate disagreement over a whole mask
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_pixels: u64,
    pub different_pixels: u64,
    pub difference_percentage: f64,
}

impl Summary {
    pub fn rating(&self) -> Rating {
        Rating::from_percentage(self.difference_percentage)
    }
}

/// Human verdict on an overall difference percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Under 1%
    Excellent,
    /// Under 5%
    Good,
    /// Under 10%
    Fair,
    NeedsWork,
}

impl Rating {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 1.0 {
            Rating::Excellent
        } else if percentage < 5.0 {
            Rating::Good
        } else if percentage < 10.0 {
            Rating::Fair
        } else {
            Rating::NeedsWork
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::Excellent => "EXCELLENT: <1% difference - nearly pixel-perfect",
            Rating::Good => "GOOD: <5% difference - minor discrepancies",
            Rating::Fair => "FAIR: 5-10% difference - noticeable differences",
            Rating::NeedsWork => "NEEDS WORK: >10% difference - significant differences",
        }
    }
}

/// Full result of comparing one page pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub width: u32,
    pub height: u32,
    pub summary: Summary,
    /// Sorted by area descending, ties by id ascending
    pub regions: Vec<Region>,
}
