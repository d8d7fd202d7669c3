//! Error types for screenshot capture

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Screenshot not found: {}", .0.display())]
    ScreenshotNotFound(PathBuf),

    #[error("Capture failed for '{page}': {reason}")]
    CaptureFailed { page: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] pagediff_common::Error),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
