//! Compare Command: whole-image difference percentage

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagediff_common::{difference, load_rgb, overlay, summarize, Rating, Summary};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::ProjectConfig;
use crate::output::{print_item, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference screenshot (size authority)
    pub reference: PathBuf,

    /// Candidate screenshot
    pub candidate: PathBuf,

    /// Per-channel tolerance (0-255)
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Write the reference with differing pixels painted red
    #[arg(long)]
    pub diff_image: Option<PathBuf>,
}

/// Summary display wrapper for serialization
#[derive(Serialize)]
pub struct SummaryDisplay {
    pub total_pixels: u64,
    pub different_pixels: u64,
    pub difference_percentage: f64,
    pub threshold: i64,
    pub rating: Rating,
    pub diff_image: Option<String>,
}

impl SummaryDisplay {
    pub fn new(summary: Summary, threshold: i64, diff_image: Option<String>) -> Self {
        Self {
            total_pixels: summary.total_pixels,
            different_pixels: summary.different_pixels,
            difference_percentage: summary.difference_percentage,
            threshold,
            rating: summary.rating(),
            diff_image,
        }
    }
}

impl TableDisplay for SummaryDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Total Pixels", "Different Pixels", "Difference", "Threshold", "Diff Image"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.total_pixels.to_string(),
            self.different_pixels.to_string(),
            format!("{:.3}%", self.difference_percentage),
            self.threshold.to_string(),
            self.diff_image.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Coloured verdict line for a rating
pub fn rating_line(rating: Rating) -> String {
    match rating {
        Rating::Excellent => format!("✅ {}", rating.description()).green().to_string(),
        Rating::Good => format!("✓ {}", rating.description()).green().to_string(),
        Rating::Fair => format!("⚠ {}", rating.description()).yellow().to_string(),
        Rating::NeedsWork => format!("❌ {}", rating.description()).red().to_string(),
    }
}

pub fn execute(args: CompareArgs, config: &ProjectConfig, format: OutputFormat) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.analysis.threshold);

    let reference = load_rgb(&args.reference)
        .with_context(|| format!("loading {}", args.reference.display()))?;
    let candidate = load_rgb(&args.candidate)
        .with_context(|| format!("loading {}", args.candidate.display()))?;

    let diff = difference(&reference, &candidate, threshold)?;
    let summary = summarize(&diff.mask)?;

    let diff_image = match &args.diff_image {
        Some(path) => {
            overlay::highlight(&reference, &diff.mask)?
                .save(path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Diff image saved: {}", path.display());
            Some(path.display().to_string())
        }
        None => None,
    };

    let display = SummaryDisplay::new(summary, threshold, diff_image);
    print_item(&display, format);
    if format.is_human() {
        println!("{}", rating_line(display.rating));
    }

    Ok(())
}
