//! Render command - produce the tile for an area config file.

use std::path::PathBuf;

use areamap::config::Settings;
use clap::Args;

use crate::error::CliError;
use super::common::{open_cache, read_area_config, report_tile};

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Area config file (DWR_Area_ID and Coordinates entries)
    pub file: PathBuf,

    /// Also write the tile to this path (format from the extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Run the render command.
pub fn run(settings: &Settings, args: RenderArgs) -> Result<(), CliError> {
    let text = read_area_config(&args.file)?;
    let mut cache = open_cache(settings);
    cache.reload_config(&text)?;
    report_tile(&mut cache, args.output.as_deref())
}
