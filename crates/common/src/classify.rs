//! Severity and section classification

use crate::config::{SectionTable, SeverityThresholds};
use crate::types::Severity;

impl SeverityThresholds {
    /// Tier for a mean channel difference. Boundaries belong to the lower tier.
    pub fn classify(&self, avg_diff: f64) -> Severity {
        if avg_diff > self.high_above {
            Severity::High
        } else if avg_diff > self.medium_above {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl SectionTable {
    /// Label for a vertical position `y` on a page `height` pixels tall.
    ///
    /// The first band whose breakpoint lies strictly above `y / height` wins;
    /// positions past every band get the fallback label.
    pub fn classify(&self, y: u32, height: u32) -> &str {
        if height == 0 {
            return &self.fallback;
        }
        let fraction = y as f64 / height as f64;
        self.bands
            .iter()
            .find(|band| fraction < band.below)
            .map(|band| band.label.as_str())
            .unwrap_or(&self.fallback)
    }
}
