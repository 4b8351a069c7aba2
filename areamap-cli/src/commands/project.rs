//! Project command - show where an area falls on the reference raster.

use std::path::PathBuf;

use areamap::cache::TileStore;
use areamap::config::Settings;
use areamap::ingest::AreaDescriptor;
use areamap::projection::project;
use clap::Args;

use crate::error::CliError;
use super::common::read_area_config;

/// Arguments for the project command.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Area config file (DWR_Area_ID and Coordinates entries)
    pub file: PathBuf,
}

/// Run the project command.
pub fn run(settings: &Settings, args: ProjectArgs) -> Result<(), CliError> {
    let text = read_area_config(&args.file)?;
    let descriptor = AreaDescriptor::from_config_text(&text)?;
    let rect = project(descriptor.bounding_box());

    println!("Area:         {}", descriptor.area_id());
    println!("Bounding box: {}", descriptor.bounding_box());
    println!("Crop:         {}", rect);
    println!("Crop size:    {}×{}", rect.width(), rect.height());
    if rect.is_degenerate() {
        println!("              (encloses no pixels)");
    }
    let store = TileStore::new(settings.cache_directory());
    println!(
        "Cache file:   {}",
        store.entry_path(descriptor.area_id()).display()
    );
    Ok(())
}
