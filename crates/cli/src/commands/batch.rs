//! Batch Command: analyze every configured page from saved screenshots

use anyhow::{bail, Result};
use clap::Args;
use pagediff_capture::{CaptureError, DirectoryProvider, PageTarget, ScreenshotProvider};
use pagediff_common::{
    difference, extract_regions, overlay, summarize, AnalysisConfig, Rating, Region, Severity,
    Summary,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::compare::rating_line;
use super::AnalysisOverrides;
use crate::config::ProjectConfig;
use crate::output::{print_error, print_list, print_warning, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Analyze only this page
    #[arg(long)]
    pub page: Option<String>,

    #[command(flatten)]
    pub analysis: AnalysisOverrides,
}

/// Per-page result row
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub page: String,
    pub total_pixels: u64,
    pub different_pixels: u64,
    pub difference_percentage: f64,
    pub regions: usize,
    pub high_regions: usize,
    pub rating: Rating,
    pub top_region: Option<Region>,
}

impl PageReport {
    pub fn new(page: &str, summary: &Summary, regions: &[Region]) -> Self {
        Self {
            page: page.to_string(),
            total_pixels: summary.total_pixels,
            different_pixels: summary.different_pixels,
            difference_percentage: summary.difference_percentage,
            regions: regions.len(),
            high_regions: regions.iter().filter(|r| r.severity == Severity::High).count(),
            rating: summary.rating(),
            top_region: regions.first().cloned(),
        }
    }
}

impl TableDisplay for PageReport {
    fn headers() -> Vec<&'static str> {
        vec!["Page", "Difference", "Different Pixels", "Regions", "High", "Largest Region"]
    }

    fn row(&self) -> Vec<String> {
        let status = match self.rating {
            Rating::Excellent => "✅",
            Rating::Good => "✓",
            Rating::Fair => "⚠",
            Rating::NeedsWork => "❌",
        };
        vec![
            format!("{} {}", status, self.page),
            format!("{:.3}%", self.difference_percentage),
            self.different_pixels.to_string(),
            self.regions.to_string(),
            self.high_regions.to_string(),
            self.top_region
                .as_ref()
                .map(|r| format!("{} {}", r.section, r.bbox))
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

enum PageOutcome {
    Analyzed(PageReport),
    Skipped(PathBuf),
}

/// Mean difference percentage across reports
pub fn average_difference(reports: &[PageReport]) -> Option<f64> {
    if reports.is_empty() {
        return None;
    }
    let total: f64 = reports.iter().map(|r| r.difference_percentage).sum();
    Some(total / reports.len() as f64)
}

async fn analyze_page(
    provider: Arc<DirectoryProvider>,
    page: PageTarget,
    config: AnalysisConfig,
    annotate_limit: usize,
) -> Result<PageOutcome> {
    let pair = match provider.capture(&page).await {
        Ok(pair) => pair,
        Err(CaptureError::ScreenshotNotFound(path)) => return Ok(PageOutcome::Skipped(path)),
        Err(e) => return Err(e.into()),
    };

    let layout = provider.layout().clone();
    let report = tokio::task::spawn_blocking(move || -> Result<PageReport> {
        let diff = difference(&pair.reference, &pair.candidate, config.threshold)?;
        let summary = summarize(&diff.mask)?;
        let regions = extract_regions(&diff.field, &diff.mask, &config)?;

        let diff_path = layout.diff_path(&pair.name);
        overlay::highlight(&pair.reference, &diff.mask)?.save(&diff_path)?;
        let annotated_path = layout.annotated_path(&pair.name);
        overlay::annotate(&pair.reference, &regions, annotate_limit).save(&annotated_path)?;
        info!(
            "Wrote {} and {}",
            diff_path.display(),
            annotated_path.display()
        );

        Ok(PageReport::new(&pair.name, &summary, &regions))
    })
    .await??;

    Ok(PageOutcome::Analyzed(report))
}

pub async fn execute(args: BatchArgs, config: &ProjectConfig, format: OutputFormat) -> Result<()> {
    let pages = config.select_pages(args.page.as_deref())?;
    if pages.is_empty() {
        print_warning("No pages configured. Add [[pages]] entries or run `pagediff init`.");
        return Ok(());
    }

    let analysis_config = args.analysis.apply(config.analysis.clone())?;
    let provider = Arc::new(DirectoryProvider::new(config.capture.output_dir.clone()));

    let mut tasks = JoinSet::new();
    for (index, page) in pages.iter().cloned().enumerate() {
        let provider = provider.clone();
        let analysis_config = analysis_config.clone();
        let annotate_limit = config.annotate_limit;
        tasks.spawn(async move {
            let name = page.name.clone();
            let outcome = analyze_page(provider, page, analysis_config, annotate_limit).await;
            (index, name, outcome)
        });
    }

    let mut finished = Vec::with_capacity(pages.len());
    while let Some(joined) = tasks.join_next().await {
        finished.push(joined?);
    }
    finished.sort_by_key(|(index, _, _)| *index);

    let mut reports = Vec::new();
    let mut failed = 0usize;
    for (_, name, outcome) in finished {
        match outcome {
            Ok(PageOutcome::Analyzed(report)) => reports.push(report),
            Ok(PageOutcome::Skipped(path)) => {
                print_warning(&format!("Skipping {}: {} not found", name, path.display()));
            }
            Err(e) => {
                failed += 1;
                print_error(&format!("{}: {:#}", name, e));
            }
        }
    }
    debug!(analyzed = reports.len(), failed, "Batch finished");

    print_list(&reports, format);
    if format.is_human() {
        if let Some(average) = average_difference(&reports) {
            println!("Average difference: {:.3}%", average);
            println!("{}", rating_line(Rating::from_percentage(average)));
        }
    }

    if failed > 0 {
        bail!("{} page(s) failed", failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pagediff_capture::ScreenshotLayout;
    use tempfile::TempDir;

    fn summary(percentage: f64) -> Summary {
        Summary {
            total_pixels: 100,
            different_pixels: percentage as u64,
            difference_percentage: percentage,
        }
    }

    #[test]
    fn test_average_difference() {
        assert_eq!(average_difference(&[]), None);
        let reports = vec![
            PageReport::new("home", &summary(2.0), &[]),
            PageReport::new("about", &summary(4.0), &[]),
        ];
        assert_eq!(average_difference(&reports), Some(3.0));
    }

    #[tokio::test]
    async fn test_analyze_page_writes_overlays() {
        let tmp = TempDir::new().unwrap();
        let layout = ScreenshotLayout::new(tmp.path());
        let reference = RgbImage::from_pixel(60, 60, Rgb([0, 0, 0]));
        let mut candidate = reference.clone();
        for y in 0..40 {
            for x in 0..40 {
                candidate.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        reference.save(layout.reference_path("home")).unwrap();
        candidate.save(layout.candidate_path("home")).unwrap();

        let provider = Arc::new(DirectoryProvider::new(tmp.path()));
        let page = PageTarget {
            name: "home".to_string(),
            reference_url: String::new(),
            candidate_url: String::new(),
        };
        let outcome = analyze_page(provider, page, AnalysisConfig::default(), 10)
            .await
            .unwrap();

        let PageOutcome::Analyzed(report) = outcome else {
            panic!("page should have been analyzed");
        };
        assert_eq!(report.regions, 1);
        assert_eq!(report.high_regions, 1);
        assert_eq!(report.different_pixels, 1600);
        assert!(layout.diff_path("home").exists());
        assert!(layout.annotated_path("home").exists());
    }

    #[tokio::test]
    async fn test_missing_screenshots_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(DirectoryProvider::new(tmp.path()));
        let page = PageTarget {
            name: "services".to_string(),
            reference_url: String::new(),
            candidate_url: String::new(),
        };
        let outcome = analyze_page(provider, page, AnalysisConfig::default(), 10)
            .await
            .unwrap();
        assert!(matches!(outcome, PageOutcome::Skipped(_)));
    }
}
