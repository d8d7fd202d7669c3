//! Capture Command: screenshot configured pages with Playwright

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pagediff_capture::{PageTarget, PlaywrightProvider, ScreenshotProvider};
use std::path::Path;

use crate::config::ProjectConfig;
use crate::output::{print_error, print_success, print_warning};

#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Capture only this page
    #[arg(long)]
    pub page: Option<String>,
}

pub async fn execute(args: CaptureArgs, config: &ProjectConfig) -> Result<()> {
    let pages = config.select_pages(args.page.as_deref())?;
    if pages.is_empty() {
        print_warning("No pages configured. Add [[pages]] entries or run `pagediff init`.");
        return Ok(());
    }

    let provider = PlaywrightProvider::new(config.capture.clone())?;

    let progress = ProgressBar::new(pages.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let failed = capture_all(&provider, &pages, &progress).await;
    progress.finish_and_clear();

    report(pages.len(), failed, provider.layout().dir())
}

/// Capture every page, returning how many failed
async fn capture_all<P>(provider: &P, pages: &[PageTarget], progress: &ProgressBar) -> usize
where
    P: ScreenshotProvider + ?Sized,
{
    let mut failed = 0usize;
    for page in pages {
        progress.set_message(page.name.clone());
        match provider.capture(page).await {
            Ok(pair) => progress.println(format!(
                "✓ {}: {} and {}",
                page.name,
                pair.reference_path.display(),
                pair.candidate_path.display()
            )),
            Err(e) => {
                failed += 1;
                progress.suspend(|| print_error(&format!("{}: {}", page.name, e)));
            }
        }
        progress.inc(1);
    }
    failed
}

fn report(total: usize, failed: usize, dir: &Path) -> Result<()> {
    print_success(&format!(
        "Captured {}/{} page(s) into {}",
        total - failed,
        total,
        dir.display()
    ));
    if failed > 0 {
        bail!("{} capture(s) failed", failed);
    }
    Ok(())
}
