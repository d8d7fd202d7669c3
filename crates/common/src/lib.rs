//! pagediff Common Library
//!
//! Region-level comparison of two renderings of the same web page.
//!
//! ```text
//! reference ─┐
//!            ├─ diff::difference ──> (DifferenceField, Mask)
//! candidate ─┘                          │          │
//!                 regions::extract_regions        summary::summarize
//!                          │                           │
//!                     Vec<Region>                   Summary
//! ```
//!
//! Everything here is synchronous and call-local: configuration is passed in
//! explicitly and no state survives between calls.

pub mod classify;
pub mod config;
pub mod diff;
pub mod error;
pub mod overlay;
pub mod palette;
pub mod regions;
pub mod summary;
pub mod types;

use image::RgbImage;
use std::path::Path;
use tracing::debug;

pub use config::{AnalysisConfig, Connectivity, SectionBand, SectionTable, SeverityThresholds};
pub use diff::{difference, Difference, DifferenceField, Mask};
pub use error::{Error, Result};
pub use regions::{extract_regions, label_components, Labels};
pub use summary::summarize;
pub use types::*;

/// pagediff version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Difference, extract regions and summarize in one call
pub fn analyze(reference: &RgbImage, candidate: &RgbImage, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;

    let Difference { field, mask } = difference(reference, candidate, config.threshold)?;
    let summary = summarize(&mask)?;
    let regions = extract_regions(&field, &mask, config)?;

    debug!(
        regions = regions.len(),
        percentage = summary.difference_percentage,
        "Analysis complete"
    );

    Ok(Analysis {
        width: mask.width(),
        height: mask.height(),
        summary,
        regions,
    })
}

/// Open a raster image of any supported format as 8-bit RGB
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}
