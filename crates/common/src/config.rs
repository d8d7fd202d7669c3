//! Analysis configuration
//!
//! Every analysis call takes an explicit [`AnalysisConfig`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default per-channel tolerance (0-255)
pub const DEFAULT_THRESHOLD: i64 = 30;

/// Default minimum component size in pixels
pub const DEFAULT_MIN_AREA: i64 = 1000;

/// Configuration for one analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// A pixel disagrees when any channel differs by more than this
    pub threshold: i64,

    /// Components with fewer pixels are discarded as noise
    pub min_area: i64,

    /// Neighbor relation used when labeling the mask
    pub connectivity: Connectivity,

    /// Severity tiers over the mean channel difference
    pub severity: SeverityThresholds,

    /// Section breakpoints over the vertical center fraction
    pub sections: SectionTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
            connectivity: Connectivity::default(),
            severity: SeverityThresholds::default(),
            sections: SectionTable::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check every field, failing on the first problem found
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if self.min_area < 0 {
            return Err(Error::InvalidConfiguration(format!(
                "min_area must be non-negative, got {}",
                self.min_area
            )));
        }
        self.severity.validate()?;
        self.sections.validate()
    }
}

pub(crate) fn validate_threshold(threshold: i64) -> Result<()> {
    if threshold < 0 {
        return Err(Error::InvalidConfiguration(format!(
            "threshold must be non-negative, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Pixel adjacency used for connected-component labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Up, down, left, right
    #[default]
    Four,
    /// Four plus diagonals
    Eight,
}

impl From<Connectivity> for imageproc::region_labelling::Connectivity {
    fn from(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Four => Self::Four,
            Connectivity::Eight => Self::Eight,
        }
    }
}

/// Severity tier boundaries. A value equal to a boundary falls in the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// `avg_diff` above this is at least Medium
    pub medium_above: f64,
    /// `avg_diff` above this is High
    pub high_above: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium_above: 50.0,
            high_above: 100.0,
        }
    }
}

impl SeverityThresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.medium_above.is_finite() || !self.high_above.is_finite() {
            return Err(Error::InvalidConfiguration(
                "severity thresholds must be finite".to_string(),
            ));
        }
        if self.medium_above > self.high_above {
            return Err(Error::InvalidConfiguration(format!(
                "severity medium_above ({}) exceeds high_above ({})",
                self.medium_above, self.high_above
            )));
        }
        Ok(())
    }
}

/// One band of a section table: fractions strictly below `below` get `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBand {
    pub below: f64,
    pub label: String,
}

impl SectionBand {
    pub fn new(below: f64, label: impl Into<String>) -> Self {
        Self {
            below,
            label: label.into(),
        }
    }
}

/// Ordered mapping from vertical position to a page-section label.
///
/// The default table is calibrated to a single marketing-page template
/// (header, hero, about, services, testimonials, footer). It is a heuristic,
/// not a layout model; pages with a different structure should supply their
/// own bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTable {
    /// Label for fractions at or beyond the last band
    pub fallback: String,
    /// Bands in ascending `below` order
    pub bands: Vec<SectionBand>,
}

impl Default for SectionTable {
    fn default() -> Self {
        Self {
            fallback: "Footer".to_string(),
            bands: vec![
                SectionBand::new(0.15, "Header/Navigation"),
                SectionBand::new(0.25, "Hero Section"),
                SectionBand::new(0.45, "About Section"),
                SectionBand::new(0.60, "Services Section"),
                SectionBand::new(0.80, "Testimonials Section"),
            ],
        }
    }
}

impl SectionTable {
    pub fn validate(&self) -> Result<()> {
        let mut previous = 0.0;
        for band in &self.bands {
            if !band.below.is_finite() || band.below <= previous || band.below > 1.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "section band '{}' has breakpoint {}; breakpoints must increase within (0, 1]",
                    band.label, band.below
                )));
            }
            previous = band.below;
        }
        Ok(())
    }
}
