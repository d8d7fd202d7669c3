//! Playwright browser automation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::{CaptureError, CaptureResult};
use crate::provider::{PageTarget, ScreenshotLayout, ScreenshotPair, ScreenshotProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for screenshot capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory the PNG files are written to
    pub output_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    /// Time to let the page settle after load
    pub settle_ms: u64,
    /// Capture the whole scrollable page rather than the viewport
    pub full_page: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("screenshots"),
            viewport_width: 1920,
            viewport_height: 3000,
            browser: Browser::Chromium,
            settle_ms: 3000,
            full_page: false,
        }
    }
}

/// One URL to load and where its screenshot goes
#[derive(Debug, Clone, Serialize)]
pub struct Shot {
    pub url: String,
    pub path: PathBuf,
}

/// Build a Node script that captures every shot in a fresh browser context.
///
/// Each shot gets its own context, so no cache or storage carries over
/// between the reference and the candidate.
pub fn build_script(config: &CaptureConfig, shots: &[Shot]) -> CaptureResult<String> {
    let shots_json = serde_json::to_string(shots)?;

    Ok(format!(
        r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: true }});
  const shots = {shots_json};

  try {{
    for (const shot of shots) {{
      const context = await browser.newContext({{
        viewport: {{ width: {width}, height: {height} }},
        deviceScaleFactor: 1
      }});
      const page = await context.newPage();
      await page.goto(shot.url, {{ waitUntil: 'load' }});
      await page.waitForTimeout({settle_ms});
      await page.screenshot({{ path: shot.path, fullPage: {full_page} }});
      await context.close();
    }}
    console.log(JSON.stringify({{ success: true }}));
  }} catch (error) {{
    console.error(JSON.stringify({{ success: false, error: error.message, stack: error.stack }}));
    process.exit(1);
  }} finally {{
    await browser.close();
  }}
}})();
"#,
        browser = config.browser.as_str(),
        shots_json = shots_json,
        width = config.viewport_width,
        height = config.viewport_height,
        settle_ms = config.settle_ms,
        full_page = config.full_page,
    ))
}

/// Screenshot provider driving a headless browser through Playwright
pub struct PlaywrightProvider {
    config: CaptureConfig,
    layout: ScreenshotLayout,
}

impl PlaywrightProvider {
    /// Create a new provider, verifying Playwright is available
    pub fn new(config: CaptureConfig) -> CaptureResult<Self> {
        Self::check_playwright_installed()?;

        std::fs::create_dir_all(&config.output_dir)?;

        let layout = ScreenshotLayout::new(config.output_dir.clone());
        Ok(Self { config, layout })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> CaptureResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(CaptureError::PlaywrightNotFound),
        }
    }

    pub fn layout(&self) -> &ScreenshotLayout {
        &self.layout
    }

    /// Execute a script with node from a scratch directory
    async fn run_script(&self, script: &str) -> CaptureResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("capture.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(CaptureError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ScreenshotProvider for PlaywrightProvider {
    async fn capture(&self, page: &PageTarget) -> CaptureResult<ScreenshotPair> {
        let shots = [
            Shot {
                url: page.reference_url.clone(),
                path: self.layout.reference_path(&page.name),
            },
            Shot {
                url: page.candidate_url.clone(),
                path: self.layout.candidate_path(&page.name),
            },
        ];

        info!("Capturing '{}': {} vs {}", page.name, page.reference_url, page.candidate_url);

        let script = build_script(&self.config, &shots)?;
        if let Err(e) = self.run_script(&script).await {
            warn!("Capture of '{}' failed: {}", page.name, e);
            return Err(e);
        }

        self.layout.load(&page.name).await.map_err(|e| match e {
            CaptureError::ScreenshotNotFound(path) => CaptureError::CaptureFailed {
                page: page.name.clone(),
                reason: format!("browser exited cleanly but {} was not written", path.display()),
            },
            other => other,
        })
    }
}
