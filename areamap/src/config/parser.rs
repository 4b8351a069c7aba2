//! INI parsing logic for converting `Ini` → `Settings`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::Settings;

/// Parse an `Ini` object into `Settings`.
///
/// Starts from `Settings::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<Settings, ConfigFileError> {
    let mut settings = Settings::default();

    // [paths] section
    if let Some(section) = ini.section(Some("paths")) {
        if let Some(v) = non_empty(section.get("cache_directory")) {
            settings.paths.cache_directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section.get("reference_raster")) {
            settings.paths.reference_raster = expand_tilde(v);
        }
        if let Some(v) = non_empty(section.get("dump_directory")) {
            settings.paths.dump_directory = expand_tilde(v);
        }
    }

    // [drops] section
    if let Some(section) = ini.section(Some("drops")) {
        if let Some(v) = non_empty(section.get("pattern")) {
            glob::Pattern::new(v).map_err(|e| ConfigFileError::InvalidValue {
                section: "drops".to_string(),
                key: "pattern".to_string(),
                value: v.to_string(),
                reason: e.to_string(),
            })?;
            settings.drops.pattern = v.to_string();
        }
    }

    // [tile] section
    if let Some(section) = ini.section(Some("tile")) {
        if let Some(v) = section.get("width") {
            settings.tile.width = parse_dimension("width", v)?;
        }
        if let Some(v) = section.get("height") {
            settings.tile.height = parse_dimension("height", v)?;
        }
        if let Some(v) = section.get("memoize_reference") {
            settings.tile.memoize_reference =
                parse_bool(v).ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "tile".to_string(),
                    key: "memoize_reference".to_string(),
                    value: v.to_string(),
                    reason: "expected true or false".to_string(),
                })?;
        }
    }

    Ok(settings)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_dimension(key: &str, value: &str) -> Result<u32, ConfigFileError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigFileError::InvalidValue {
            section: "tile".to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a positive number of pixels".to_string(),
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Settings, ConfigFileError> {
        parse_ini(&Ini::load_from_str(text).unwrap())
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_paths_section() {
        let settings = parse(
            "[paths]\ncache_directory = /var/cache/areamap\nreference_raster = /maps/us.png\ndump_directory = /srv/dump\n",
        )
        .unwrap();

        assert_eq!(
            settings.paths.cache_directory,
            PathBuf::from("/var/cache/areamap")
        );
        assert_eq!(settings.paths.reference_raster, PathBuf::from("/maps/us.png"));
        assert_eq!(settings.paths.dump_directory, PathBuf::from("/srv/dump"));
    }

    #[test]
    fn test_empty_path_keeps_default() {
        let settings = parse("[paths]\ncache_directory =\n").unwrap();
        assert_eq!(
            settings.paths.cache_directory,
            Settings::default().paths.cache_directory
        );
    }

    #[test]
    fn test_tile_section() {
        let settings = parse("[tile]\nwidth = 512\nheight = 256\nmemoize_reference = yes\n").unwrap();
        assert_eq!(settings.tile.width, 512);
        assert_eq!(settings.tile.height, 256);
        assert!(settings.tile.memoize_reference);
    }

    #[test]
    fn test_invalid_dimension() {
        let err = parse("[tile]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "width"));

        assert!(parse("[tile]\nheight = big\n").is_err());
    }

    #[test]
    fn test_invalid_bool() {
        let err = parse("[tile]\nmemoize_reference = maybe\n").unwrap_err();
        assert!(err.to_string().contains("tile.memoize_reference"));
    }

    #[test]
    fn test_drop_pattern() {
        let settings = parse("[drops]\npattern = *.area\n").unwrap();
        assert_eq!(settings.drops.pattern, "*.area");

        assert!(parse("[drops]\npattern = ***\n").is_err());
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/maps"), home.join("maps"));
        }
        assert_eq!(expand_tilde("/abs/maps"), PathBuf::from("/abs/maps"));
        assert_eq!(expand_tilde("~user/maps"), PathBuf::from("~user/maps"));
    }
}
