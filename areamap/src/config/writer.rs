//! INI serialization logic for converting `Settings` → INI string.

use std::path::Path;

use super::settings::Settings;

/// Convert `Settings` to a commented INI string for saving.
pub(super) fn to_config_string(settings: &Settings) -> String {
    format!(
        r#"[paths]
; Directory holding cached area maps (map_<area id>.png)
cache_directory = {}
; Reference raster every area map is cropped from
reference_raster = {}
; Directory receiving area config drops
dump_directory = {}

[drops]
; File name pattern of config drops
pattern = {}

[tile]
; Size of produced area maps in pixels
width = {}
height = {}
; Keep the reference raster in memory between renders
memoize_reference = {}
"#,
        path_to_string(&settings.paths.cache_directory),
        path_to_string(&settings.paths.reference_raster),
        path_to_string(&settings.paths.dump_directory),
        settings.drops.pattern,
        settings.tile.width,
        settings.tile.height,
        settings.tile.memoize_reference,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
