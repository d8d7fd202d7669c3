//! Regions Command: where the two renderings disagree

use anyhow::{Context, Result};
use clap::Args;
use pagediff_common::{analyze, load_rgb, overlay, Region, Severity};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use super::AnalysisOverrides;
use crate::config::ProjectConfig;
use crate::output::{print_info, print_list, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Reference screenshot (size authority)
    pub reference: PathBuf,

    /// Candidate screenshot
    pub candidate: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisOverrides,

    /// Number of regions to show
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Write the reference with the shown regions outlined
    #[arg(long)]
    pub annotate: Option<PathBuf>,
}

/// Region display wrapper for serialization
#[derive(Serialize)]
pub struct RegionDisplay {
    pub rank: usize,
    pub id: u32,
    pub section: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub area: u64,
    pub avg_diff: f64,
    pub severity: Severity,
}

impl RegionDisplay {
    pub fn new(rank: usize, region: &Region) -> Self {
        Self {
            rank,
            id: region.id,
            section: region.section.clone(),
            x: region.bbox.x,
            y: region.bbox.y,
            width: region.bbox.width,
            height: region.bbox.height,
            area: region.area,
            avg_diff: region.avg_diff,
            severity: region.severity,
        }
    }
}

impl TableDisplay for RegionDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Section", "Position", "Size", "Area", "Avg Diff", "Severity"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.section.clone(),
            format!("({}, {})", self.x, self.y),
            format!("{}x{} px", self.width, self.height),
            format!("{} px", self.area),
            format!("{:.1}", self.avg_diff),
            self.severity.to_string(),
        ]
    }
}

pub fn execute(args: RegionsArgs, config: &ProjectConfig, format: OutputFormat) -> Result<()> {
    let analysis_config = args.analysis.apply(config.analysis.clone())?;

    let reference = load_rgb(&args.reference)
        .with_context(|| format!("loading {}", args.reference.display()))?;
    let candidate = load_rgb(&args.candidate)
        .with_context(|| format!("loading {}", args.candidate.display()))?;

    let analysis = analyze(&reference, &candidate, &analysis_config)?;

    if let Some(path) = &args.annotate {
        overlay::annotate(&reference, &analysis.regions, args.top)
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Annotated image saved: {}", path.display());
    }

    let rows: Vec<RegionDisplay> = analysis
        .regions
        .iter()
        .take(args.top)
        .enumerate()
        .map(|(i, region)| RegionDisplay::new(i + 1, region))
        .collect();

    print_list(&rows, format);
    if format.is_human() {
        print_info(&format!(
            "{} region(s) of at least {} px; {:.3}% of pixels differ",
            analysis.regions.len(),
            analysis_config.min_area,
            analysis.summary.difference_percentage
        ));
    }

    Ok(())
}
