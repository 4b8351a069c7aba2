//! Poll command - consume config drops from the dump directory.

use std::thread;
use std::time::Duration;

use areamap::config::Settings;
use areamap::dump::DropDirectory;
use clap::Args;
use tracing::{info, warn};

use crate::error::CliError;
use super::common::{open_cache, report_tile};

/// Arguments for the poll command.
#[derive(Debug, Args)]
pub struct PollArgs {
    /// Keep polling every SECONDS instead of checking once
    #[arg(long, value_name = "SECONDS")]
    pub watch: Option<u64>,
}

/// Run the poll command.
pub fn run(settings: &Settings, args: PollArgs) -> Result<(), CliError> {
    let drops = settings.drop_directory();
    let mut cache = open_cache(settings);

    let Some(interval) = args.watch else {
        if !poll_once(&mut cache, &drops)? {
            println!(
                "No config drop pending in {} (pattern {})",
                drops.directory().display(),
                drops.pattern()
            );
        }
        return Ok(());
    };

    info!(
        directory = %drops.directory().display(),
        interval_secs = interval,
        "Watching for config drops"
    );
    loop {
        // A bad drop is consumed; report it and keep watching
        if let Err(e) = poll_once(&mut cache, &drops) {
            warn!(error = %e, "Config drop failed");
        }
        thread::sleep(Duration::from_secs(interval.max(1)));
    }
}

fn poll_once(
    cache: &mut areamap::cache::AreaTileCache,
    drops: &DropDirectory,
) -> Result<bool, CliError> {
    if !cache.find_and_reload_config(drops)? {
        return Ok(false);
    }
    report_tile(cache, None)?;
    Ok(true)
}
