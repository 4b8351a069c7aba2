//! Init command - initialize the settings file.

use std::path::Path;

use areamap::config::Settings;

use crate::error::CliError;

/// Run the init command.
pub fn run(path: &Path) -> Result<(), CliError> {
    if Settings::ensure_exists_at(path)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    println!();
    println!("Set reference_raster under [paths] before rendering area maps.");
    Ok(())
}
