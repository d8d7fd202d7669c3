//! Project configuration file (`pagediff.toml`)

use pagediff_capture::{CaptureConfig, PageTarget};
use pagediff_common::overlay::DEFAULT_ANNOTATION_LIMIT;
use pagediff_common::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a batch run needs: analysis settings, capture settings and pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Regions outlined in annotated images
    pub annotate_limit: usize,

    pub analysis: AnalysisConfig,

    pub capture: CaptureConfig,

    pub pages: Vec<PageTarget>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            annotate_limit: DEFAULT_ANNOTATION_LIMIT,
            analysis: AnalysisConfig::default(),
            capture: CaptureConfig::default(),
            pages: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Starter configuration written by `pagediff init`
    pub fn example() -> Self {
        let page = |name: &str, path: &str, file: &str| PageTarget {
            name: name.to_string(),
            reference_url: format!("https://example.com/{}", path),
            candidate_url: format!("file://./{}", file),
        };
        Self {
            pages: vec![
                page("home", "", "index.html"),
                page("about", "about-us", "about-us.html"),
                page("services", "services", "services.html"),
            ],
            ..Default::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.analysis.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Pages to process, optionally narrowed to one name
    pub fn select_pages(&self, name: Option<&str>) -> anyhow::Result<Vec<PageTarget>> {
        match name {
            None => Ok(self.pages.clone()),
            Some(name) => {
                let page = self
                    .pages
                    .iter()
                    .find(|p| p.name == name)
                    .ok_or_else(|| anyhow::anyhow!("page '{}' is not configured", name))?;
                Ok(vec![page.clone()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = ProjectConfig::load(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("pagediff.toml");
        let config = ProjectConfig::example();
        config.save(&path).unwrap();

        let loaded = ProjectConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.pages.len(), 3);
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pagediff.toml");
        std::fs::write(
            &path,
            r#"
[analysis]
threshold = 10

[[pages]]
name = "home"
reference_url = "https://example.com/"
candidate_url = "http://localhost:8000/"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.analysis.threshold, 10);
        assert_eq!(config.analysis.min_area, 1000);
        assert_eq!(config.capture.viewport_width, 1920);
        assert_eq!(config.pages[0].name, "home");
    }

    #[test]
    fn test_invalid_analysis_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pagediff.toml");
        std::fs::write(&path, "[analysis]\nthreshold = -3\n").unwrap();
        assert!(ProjectConfig::load(&path).is_err());
    }

    #[test]
    fn test_select_pages() {
        let config = ProjectConfig::example();
        assert_eq!(config.select_pages(None).unwrap().len(), 3);
        assert_eq!(config.select_pages(Some("about")).unwrap()[0].name, "about");
        assert!(config.select_pages(Some("contact")).is_err());
    }
}
