//! Settings for the area map tools.
//!
//! Settings are read from `~/.areamap/config.ini`. Every key is optional;
//! missing keys keep their defaults.
//!
//! ```ini
//! [paths]
//! cache_directory = ~/.areamap/cache
//! reference_raster = ~/.areamap/reference.png
//! dump_directory = ~/.areamap/dump
//!
//! [drops]
//! pattern = *DWRI*
//!
//! [tile]
//! width = 900
//! height = 900
//! memoize_reference = false
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::ConfigFileError;
pub use settings::{
    config_directory, config_file_path, DropSettings, PathSettings, Settings, TileSettings,
    CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
