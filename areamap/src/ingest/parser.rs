//! Line-oriented `key=value` parsing for area announcements.
//!
//! The format is loose: every line that contains `<word>=<rest>` becomes an
//! entry, anything else is noise and skipped. A value holding `;` is a list
//! of segments. Each value or segment may be wrapped in one pair of matching
//! `"` or `'` quotes, which is removed.
//!
//! ```text
//! DWR_Area_ID="ABC123"
//! Coordinates="(40.5,-75.1)";"(39.5,-74.1)"
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Separator between the segments of a list value.
pub const LIST_SEPARATOR: char = ';';

/// A parsed config value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Plain value with no separator.
    Single(String),
    /// Ordered segments of a `;`-separated value.
    List(Vec<String>),
}

impl ConfigValue {
    /// Returns the value as a single string, if it is not a list.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ConfigValue::Single(s) => Some(s),
            ConfigValue::List(_) => None,
        }
    }

    /// Returns the value as list segments.
    ///
    /// A single value is treated as a one-element list.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            ConfigValue::Single(s) => vec![s.as_str()],
            ConfigValue::List(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

/// All entries parsed from one piece of config text.
///
/// Keys are case sensitive. When a key appears on more than one line the
/// last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: HashMap<String, ConfigValue>,
}

impl RawConfig {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Number of recognised entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no line matched the entry pattern.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entry keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // First `word=` on the line is the key, the rest of the line the value.
    PATTERN.get_or_init(|| Regex::new(r"(\w+)=(.*)$").unwrap())
}

/// Parse config text into its entries.
///
/// Lines that do not match `key=value` are skipped without error.
///
/// # Examples
///
/// ```
/// use areamap::ingest::{parse, ConfigValue};
///
/// let config = parse("DWR_Area_ID=\"ABC123\"\n# comment\nCoordinates=\"(1,2)\";\"(3,4)\"");
/// assert_eq!(
///     config.get("DWR_Area_ID"),
///     Some(&ConfigValue::Single("ABC123".to_string()))
/// );
/// assert_eq!(
///     config.get("Coordinates"),
///     Some(&ConfigValue::List(vec!["(1,2)".to_string(), "(3,4)".to_string()]))
/// );
/// ```
pub fn parse(text: &str) -> RawConfig {
    let pattern = entry_pattern();
    let mut entries = HashMap::new();

    for line in text.lines() {
        let Some(captures) = pattern.captures(line) else {
            continue;
        };
        let key = captures[1].to_string();
        let value = parse_value(&captures[2]);
        entries.insert(key, value);
    }

    RawConfig { entries }
}

fn parse_value(value: &str) -> ConfigValue {
    if value.contains(LIST_SEPARATOR) {
        ConfigValue::List(
            value
                .split(LIST_SEPARATOR)
                .map(|part| strip_quotes(part).to_string())
                .collect(),
        )
    } else {
        ConfigValue::Single(strip_quotes(value).to_string())
    }
}

/// Remove one layer of matching wrapping quotes.
///
/// Surrounding whitespace is trimmed first. Empty strings and strings without
/// a matching pair (including a lone quote character) are returned unchanged.
///
/// ```
/// use areamap::ingest::strip_quotes;
///
/// assert_eq!(strip_quotes("\"abc\""), "abc");
/// assert_eq!(strip_quotes("'abc'"), "abc");
/// assert_eq!(strip_quotes("\"\"abc\"\""), "\"abc\"");
/// assert_eq!(strip_quotes("\"abc'"), "\"abc'");
/// assert_eq!(strip_quotes(""), "");
/// ```
pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
