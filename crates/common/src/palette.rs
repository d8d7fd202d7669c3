//! Dominant-colour sampling
//!
//! Finds the most frequent exact colours inside fixed page areas, used to
//! read off the palette of a reference capture.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::BoundingBox;

/// One colour and how much of the sampled area it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCount {
    pub rgb: [u8; 3],
    pub hex: String,
    pub count: u64,
    /// Share of the sampled area, in percent
    pub coverage: f64,
}

/// `#rrggbb` form of a colour
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Named rectangle given as fractions of the page size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleArea {
    pub name: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SampleArea {
    pub fn new(name: impl Into<String>, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            name: name.into(),
            left,
            top,
            right,
            bottom,
        }
    }

    /// Pixel rectangle on a `width` x `height` page, or `None` if it is empty
    pub fn to_rect(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let scale = |fraction: f64, extent: u32| (extent as f64 * fraction.clamp(0.0, 1.0)) as u32;
        let (x0, x1) = (scale(self.left, width), scale(self.right, width));
        let (y0, y1) = (scale(self.top, height), scale(self.bottom, height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(BoundingBox {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Areas of the marketing-page template the section table is tuned for
pub fn default_sample_areas() -> Vec<SampleArea> {
    vec![
        SampleArea::new("Services Section Background", 0.0, 0.47, 1.0, 0.57),
        SampleArea::new("Footer Background", 0.0, 0.89, 1.0, 1.0),
        SampleArea::new("Hero Section", 0.0, 0.05, 1.0, 0.15),
        SampleArea::new("Body Text Area", 0.3, 0.35, 0.7, 0.40),
    ]
}

/// The `top_n` most common colours inside `rect`, clamped to the image.
///
/// Colours with equal counts are ordered by value so the output is stable.
pub fn dominant_colors(image: &RgbImage, rect: BoundingBox, top_n: usize) -> Result<Vec<ColorCount>> {
    let (width, height) = image.dimensions();
    let x_end = rect.x.saturating_add(rect.width).min(width);
    let y_end = rect.y.saturating_add(rect.height).min(height);
    if rect.x >= x_end || rect.y >= y_end {
        return Err(Error::EmptyInput);
    }

    let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            let Rgb(rgb) = *image.get_pixel(x, y);
            *counts.entry(rgb).or_insert(0) += 1;
        }
    }

    let sampled = (x_end - rect.x) as u64 * (y_end - rect.y) as u64;
    let mut ranked: Vec<([u8; 3], u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(rgb, count)| ColorCount {
            rgb,
            hex: to_hex(rgb),
            count,
            coverage: count as f64 / sampled as f64 * 100.0,
        })
        .collect())
}
