//! Screenshot provider interface and the on-disk implementation

use async_trait::async_trait;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};

/// A page to compare: the reference site and its reproduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTarget {
    /// Short identifier, used in file names
    pub name: String,
    pub reference_url: String,
    pub candidate_url: String,
}

/// Reference and candidate renderings of one page
#[derive(Debug, Clone)]
pub struct ScreenshotPair {
    pub name: String,
    pub reference: RgbImage,
    pub candidate: RgbImage,
    pub reference_path: PathBuf,
    pub candidate_path: PathBuf,
}

/// Anything that can produce a screenshot pair for a page
#[async_trait]
pub trait ScreenshotProvider: Send + Sync {
    async fn capture(&self, page: &PageTarget) -> CaptureResult<ScreenshotPair>;
}

/// Where screenshots of a page live inside a directory
#[derive(Debug, Clone)]
pub struct ScreenshotLayout {
    dir: PathBuf,
}

impl ScreenshotLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn reference_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("reference_{}.png", name))
    }

    pub fn candidate_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("candidate_{}.png", name))
    }

    pub fn diff_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("diff_{}.png", name))
    }

    pub fn annotated_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("annotated_{}.png", name))
    }

    /// Load both screenshots of `name`, failing if either is missing
    pub async fn load(&self, name: &str) -> CaptureResult<ScreenshotPair> {
        let reference_path = self.reference_path(name);
        let candidate_path = self.candidate_path(name);

        for path in [&reference_path, &candidate_path] {
            if !tokio::fs::try_exists(path).await? {
                return Err(CaptureError::ScreenshotNotFound(path.clone()));
            }
        }

        let (ref_path, cand_path) = (reference_path.clone(), candidate_path.clone());
        let (reference, candidate) = tokio::task::spawn_blocking(move || {
            Ok::<_, CaptureError>((
                pagediff_common::load_rgb(&ref_path)?,
                pagediff_common::load_rgb(&cand_path)?,
            ))
        })
        .await
        .map_err(|e| CaptureError::CaptureFailed {
            page: name.to_string(),
            reason: e.to_string(),
        })??;

        debug!("Loaded screenshots for '{}'", name);

        Ok(ScreenshotPair {
            name: name.to_string(),
            reference,
            candidate,
            reference_path,
            candidate_path,
        })
    }
}

/// Provider backed by screenshots already saved in a directory
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    layout: ScreenshotLayout,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: ScreenshotLayout::new(dir),
        }
    }

    pub fn layout(&self) -> &ScreenshotLayout {
        &self.layout
    }
}

#[async_trait]
impl ScreenshotProvider for DirectoryProvider {
    async fn capture(&self, page: &PageTarget) -> CaptureResult<ScreenshotPair> {
        self.layout.load(&page.name).await
    }
}
