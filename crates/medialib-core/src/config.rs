use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::definitions::ExtensionCategory;
use crate::format::{CalendarDate, Lang, DEFAULT_DATE_FORMAT};

/// Media settings, read from a JSON file. Every field is optional and a
/// missing field keeps the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub image_extensions: Option<Vec<String>>,
    pub video_extensions: Option<Vec<String>>,
    pub audio_extensions: Option<Vec<String>>,
    /// chrono strftime pattern for modification dates
    pub date_format: Option<String>,
    pub utc_offset_minutes: i32,
    /// Translation line overrides, e.g. `"media.folder_size_items": "file|files"`
    pub lang: BTreeMap<String, String>,
}

impl MediaConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path`, or return the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn extensions(&self, category: ExtensionCategory) -> Option<&[String]> {
        match category {
            ExtensionCategory::Image => self.image_extensions.as_deref(),
            ExtensionCategory::Video => self.video_extensions.as_deref(),
            ExtensionCategory::Audio => self.audio_extensions.as_deref(),
        }
    }

    pub fn date_formatter(&self) -> anyhow::Result<CalendarDate> {
        let offset = FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .with_context(|| format!("utc_offset_minutes {} is out of range", self.utc_offset_minutes))?;
        let pattern = self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
        CalendarDate::new(offset, pattern)
    }

    pub fn lang(&self) -> Lang {
        Lang::with_overrides(self.lang.clone())
    }
}
