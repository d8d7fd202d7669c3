//! pagediff screenshot capture
//!
//! Supplies the reference and candidate renderings that the analysis core
//! compares. Two providers implement [`ScreenshotProvider`]:
//!
//! - [`PlaywrightProvider`] loads both URLs in a headless browser and saves
//!   PNG screenshots
//! - [`DirectoryProvider`] reads screenshots captured earlier

pub mod error;
pub mod playwright;
pub mod provider;

pub use error::{CaptureError, CaptureResult};
pub use playwright::{build_script, Browser, CaptureConfig, PlaywrightProvider, Shot};
pub use provider::{DirectoryProvider, PageTarget, ScreenshotLayout, ScreenshotPair, ScreenshotProvider};
