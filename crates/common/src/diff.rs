//! Per-pixel differencing of two RGB images

use image::imageops::{self, FilterType};
use image::RgbImage;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::config::validate_threshold;
use crate::error::{Error, Result};

/// Sum of absolute channel differences for every pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceField {
    width: u32,
    height: u32,
    values: Vec<u16>,
}

impl DifferenceField {
    pub fn new(width: u32, height: u32, values: Vec<u16>) -> Result<Self> {
        check_len(width, height, values.len(), "difference field")?;
        Ok(Self { width, height, values })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.values[index(self.width, x, y)]
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

/// Boolean disagreement grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Result<Self> {
        check_len(width, height, bits.len(), "mask")?;
        Ok(Self { width, height, bits })
    }

    /// Build a mask by evaluating `f(x, y)` at every coordinate
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[index(self.width, x, y)]
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn count(&self) -> u64 {
        self.bits.iter().filter(|b| **b).count() as u64
    }
}

/// Output of [`difference`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub field: DifferenceField,
    pub mask: Mask,
}

/// Compare `reference` and `candidate` pixel by pixel.
///
/// `reference` is the size authority: a candidate of another size is
/// resampled to match with a Lanczos3 filter. The mask is true where any
/// single channel differs by more than `threshold`; the field keeps the
/// channel sum for severity statistics.
pub fn difference(reference: &RgbImage, candidate: &RgbImage, threshold: i64) -> Result<Difference> {
    validate_threshold(threshold)?;

    let (width, height) = reference.dimensions();
    let (cand_width, cand_height) = candidate.dimensions();
    if width == 0 || height == 0 || cand_width == 0 || cand_height == 0 {
        return Err(Error::dimensions((width, height), (cand_width, cand_height)));
    }

    let candidate: Cow<'_, RgbImage> = if (cand_width, cand_height) != (width, height) {
        warn!(
            "Image sizes differ: reference {}x{} vs candidate {}x{}; resampling candidate",
            width, height, cand_width, cand_height
        );
        Cow::Owned(imageops::resize(candidate, width, height, FilterType::Lanczos3))
    } else {
        Cow::Borrowed(candidate)
    };

    let limit = threshold.min(u8::MAX as i64) as u8;
    let pixel_count = width as usize * height as usize;
    let mut values = Vec::with_capacity(pixel_count);
    let mut bits = Vec::with_capacity(pixel_count);

    for (a, b) in reference.pixels().zip(candidate.pixels()) {
        let mut sum = 0u16;
        let mut exceeds = false;
        for channel in 0..3 {
            let delta = a.0[channel].abs_diff(b.0[channel]);
            sum += delta as u16;
            exceeds |= delta > limit;
        }
        values.push(sum);
        bits.push(exceeds);
    }

    let mask = Mask { width, height, bits };
    debug!(
        width,
        height,
        threshold,
        different = mask.count(),
        "Computed difference mask"
    );

    Ok(Difference {
        field: DifferenceField { width, height, values },
        mask,
    })
}

fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

fn check_len(width: u32, height: u32, len: usize, what: &str) -> Result<()> {
    let expected = width as usize * height as usize;
    if len != expected {
        return Err(Error::InvalidInput(format!(
            "{} of {}x{} needs {} entries, got {}",
            what, width, height, expected, len
        )));
    }
    Ok(())
}
