//! Colors Command: dominant colours of fixed page areas

use anyhow::{Context, Result};
use clap::Args;
use pagediff_common::load_rgb;
use pagediff_common::palette::{default_sample_areas, dominant_colors};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::output::{print_list, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct ColorsArgs {
    /// Screenshot to sample
    pub image: PathBuf,

    /// Colours reported per area
    #[arg(long, default_value = "3")]
    pub top: usize,
}

/// Colour display wrapper for serialization
#[derive(Serialize)]
pub struct ColorDisplay {
    pub area: String,
    pub rank: usize,
    pub hex: String,
    pub rgb: [u8; 3],
    pub coverage: f64,
}

impl TableDisplay for ColorDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Area", "#", "Hex", "RGB", "Coverage"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.area.clone(),
            self.rank.to_string(),
            self.hex.clone(),
            format!("({}, {}, {})", self.rgb[0], self.rgb[1], self.rgb[2]),
            format!("{:.1}%", self.coverage),
        ]
    }
}

pub fn execute(args: ColorsArgs, format: OutputFormat) -> Result<()> {
    let image = load_rgb(&args.image).with_context(|| format!("loading {}", args.image.display()))?;
    let (width, height) = image.dimensions();

    let mut rows = Vec::new();
    for area in default_sample_areas() {
        let Some(rect) = area.to_rect(width, height) else {
            warn!("Area '{}' is empty on a {}x{} image", area.name, width, height);
            continue;
        };
        let colors = dominant_colors(&image, rect, args.top)?;
        rows.extend(colors.into_iter().enumerate().map(|(i, color)| ColorDisplay {
            area: area.name.clone(),
            rank: i + 1,
            hex: color.hex,
            rgb: color.rgb,
            coverage: color.coverage,
        }));
    }

    print_list(&rows, format);
    Ok(())
}
