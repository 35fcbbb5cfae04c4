use std::collections::BTreeMap;

use anyhow::bail;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::item::FOLDER_SIZE_ITEMS_KEY;

/// Default pattern for modification dates ("Jan 2, 2024").
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count using base-1024 units.
/// Plain bytes are shown as an integer, larger units with two decimals.
pub fn size_to_string(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// Turns a Unix timestamp into a calendar date for display.
pub trait DateFormatter: Send + Sync {
    fn format_timestamp(&self, timestamp: i64) -> String;
}

/// strftime-style date formatter in a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct CalendarDate {
    offset: FixedOffset,
    pattern: String,
}

impl CalendarDate {
    /// Fails if `pattern` contains a specifier chrono does not understand.
    pub fn new(offset: FixedOffset, pattern: impl Into<String>) -> anyhow::Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            bail!("invalid date format '{}'", pattern);
        }
        Ok(Self { offset, pattern })
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateFormatter for CalendarDate {
    fn format_timestamp(&self, timestamp: i64) -> String {
        match DateTime::from_timestamp(timestamp, 0) {
            Some(utc) => utc.with_timezone(&self.offset).format(&self.pattern).to_string(),
            None => timestamp.to_string(),
        }
    }
}

/// Looks up a display line, picking the plural form for `count`.
pub trait Translator: Send + Sync {
    fn choice(&self, key: &str, count: u64) -> String;
}

/// Built-in English lines with optional overrides.
///
/// A line of the form `"one|many"` is a plural pair: `count == 1` selects the
/// first form, anything else the last. Unknown keys resolve to the key.
#[derive(Debug, Clone)]
pub struct Lang {
    lines: BTreeMap<String, String>,
}

impl Lang {
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        let mut lang = Self::default();
        lang.lines.extend(overrides);
        lang
    }
}

impl Default for Lang {
    fn default() -> Self {
        let mut lines = BTreeMap::new();
        lines.insert(FOLDER_SIZE_ITEMS_KEY.to_string(), "item|items".to_string());
        Self { lines }
    }
}

impl Translator for Lang {
    fn choice(&self, key: &str, count: u64) -> String {
        let Some(line) = self.lines.get(key) else {
            return key.to_string();
        };
        let mut forms = line.split('|');
        let first = forms.next().unwrap_or_default();
        let last = forms.last().unwrap_or(first);
        let form = if count == 1 { first } else { last };
        form.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_boundaries() {
        assert_eq!(size_to_string(0), "0 B");
        assert_eq!(size_to_string(1), "1 B");
        assert_eq!(size_to_string(1023), "1023 B");
        assert_eq!(size_to_string(1024), "1.00 KB");
        assert_eq!(size_to_string(1536), "1.50 KB");
        assert_eq!(size_to_string(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(size_to_string(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_size_largest_unit() {
        assert!(size_to_string(u64::MAX).ends_with(" EB"));
    }

    #[test]
    fn test_calendar_date() {
        let dates = CalendarDate::default();
        assert_eq!(dates.format_timestamp(0), "Jan 1, 1970");
        assert_eq!(dates.format_timestamp(1_704_153_600), "Jan 2, 2024");

        let iso = CalendarDate::new(FixedOffset::west_opt(3600).unwrap(), "%Y-%m-%d").unwrap();
        // Midnight UTC is still the previous day one hour west
        assert_eq!(iso.format_timestamp(1_704_153_600), "2024-01-01");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(CalendarDate::new(Utc.fix(), "%Y-%").is_err());
    }

    #[test]
    fn test_lang_choice() {
        let lang = Lang::default();
        assert_eq!(lang.choice(FOLDER_SIZE_ITEMS_KEY, 0), "items");
        assert_eq!(lang.choice(FOLDER_SIZE_ITEMS_KEY, 1), "item");
        assert_eq!(lang.choice("media.unknown", 1), "media.unknown");

        let mut overrides = BTreeMap::new();
        overrides.insert(FOLDER_SIZE_ITEMS_KEY.to_string(), "Elemente".to_string());
        let de = Lang::with_overrides(overrides);
        assert_eq!(de.choice(FOLDER_SIZE_ITEMS_KEY, 1), "Elemente");
        assert_eq!(de.choice(FOLDER_SIZE_ITEMS_KEY, 7), "Elemente");
    }
}
