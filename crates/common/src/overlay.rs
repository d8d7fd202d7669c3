//! Human-viewable overlays for analysis results

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::diff::Mask;
use crate::error::{Error, Result};
use crate::types::{Region, Severity};

/// Regions drawn by default
pub const DEFAULT_ANNOTATION_LIMIT: usize = 10;

/// Outline thickness in pixels
const OUTLINE: i32 = 3;

const HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline colour for a severity tier
pub fn severity_color(severity: Severity) -> Rgb<u8> {
    match severity {
        Severity::High => Rgb([255, 0, 0]),
        Severity::Medium => Rgb([255, 165, 0]),
        Severity::Low => Rgb([255, 255, 0]),
    }
}

/// Copy of `base` with the first `limit` regions outlined by severity colour
pub fn annotate(base: &RgbImage, regions: &[Region], limit: usize) -> RgbImage {
    let mut canvas = base.clone();
    for region in regions.iter().take(limit) {
        let color = severity_color(region.severity);
        let bbox = region.bbox;
        for inset in 0..OUTLINE {
            let rect = Rect::at(bbox.x as i32 - inset, bbox.y as i32 - inset)
                .of_size(bbox.width + 2 * inset as u32, bbox.height + 2 * inset as u32);
            draw_hollow_rect_mut(&mut canvas, rect, color);
        }
    }
    canvas
}

/// Copy of `base` with every disagreeing pixel painted red
pub fn highlight(base: &RgbImage, mask: &Mask) -> Result<RgbImage> {
    if base.dimensions() != mask.dimensions() {
        return Err(Error::InvalidInput(format!(
            "base image is {}x{} but mask is {}x{}",
            base.width(),
            base.height(),
            mask.width(),
            mask.height()
        )));
    }

    let mut canvas = base.clone();
    for (pixel, different) in canvas.pixels_mut().zip(mask.bits()) {
        if *different {
            *pixel = HIGHLIGHT;
        }
    }
    Ok(canvas)
}
