//! Init Command

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(default_value = "pagediff.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.path.display());
    }

    ProjectConfig::example().save(&args.path)?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}
