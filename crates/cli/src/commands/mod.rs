//! CLI Commands

pub mod batch;
pub mod capture;
pub mod colors;
pub mod compare;
pub mod init;
pub mod regions;

use clap::{Args, ValueEnum};
use pagediff_common::{AnalysisConfig, Connectivity};

/// Neighbor relation for region labeling
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConnectivityArg {
    Four,
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

/// Flags that override `[analysis]` from the project file
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisOverrides {
    /// Per-channel tolerance (0-255)
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Minimum region size in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    pub min_area: Option<i64>,

    /// Pixel adjacency for grouping regions
    #[arg(long, value_enum)]
    pub connectivity: Option<ConnectivityArg>,
}

impl AnalysisOverrides {
    pub fn apply(&self, mut config: AnalysisConfig) -> anyhow::Result<AnalysisConfig> {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(min_area) = self.min_area {
            config.min_area = min_area;
        }
        if let Some(connectivity) = self.connectivity {
            config.connectivity = connectivity.into();
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = AnalysisOverrides {
            threshold: Some(5),
            min_area: None,
            connectivity: Some(ConnectivityArg::Eight),
        };
        let config = overrides.apply(AnalysisConfig::default()).unwrap();
        assert_eq!(config.threshold, 5);
        assert_eq!(config.min_area, 1000);
        assert_eq!(config.connectivity, Connectivity::Eight);
    }

    #[test]
    fn test_negative_override_rejected() {
        let overrides = AnalysisOverrides {
            min_area: Some(-1),
            ..Default::default()
        };
        assert!(overrides.apply(AnalysisConfig::default()).is_err());
    }
}
