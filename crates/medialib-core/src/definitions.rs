use std::path::PathBuf;

use crate::config::MediaConfig;

/// Default image extensions, overridable with `image_extensions`
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "bmp", "png", "webp", "gif", "svg"];

/// Default video extensions, overridable with `video_extensions`
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mpg", "mpeg", "mkv", "webm"];

/// Default audio extensions, overridable with `audio_extensions`
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "wma", "m4a", "ogg", "flac"];

/// Extension list categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionCategory {
    Image,
    Video,
    Audio,
}

impl ExtensionCategory {
    pub const ALL: [ExtensionCategory; 3] = [
        ExtensionCategory::Image,
        ExtensionCategory::Video,
        ExtensionCategory::Audio,
    ];

    /// Configuration key holding this category's list.
    pub fn key(&self) -> &'static str {
        match self {
            ExtensionCategory::Image => "image_extensions",
            ExtensionCategory::Video => "video_extensions",
            ExtensionCategory::Audio => "audio_extensions",
        }
    }

    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            ExtensionCategory::Image => DEFAULT_IMAGE_EXTENSIONS,
            ExtensionCategory::Video => DEFAULT_VIDEO_EXTENSIONS,
            ExtensionCategory::Audio => DEFAULT_AUDIO_EXTENSIONS,
        }
    }
}

/// Source of the extension lists used to build the classification tables.
/// Only called while the tables are being (re)built.
pub trait ExtensionProvider: Send + Sync {
    fn extensions(&self, category: ExtensionCategory) -> anyhow::Result<Vec<String>>;
}

/// Built-in defaults with per-category overrides from a loaded config.
/// An override replaces the whole default list for its category.
#[derive(Debug, Clone, Default)]
pub struct FileDefinitions {
    config: MediaConfig,
}

impl FileDefinitions {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }
}

impl ExtensionProvider for FileDefinitions {
    fn extensions(&self, category: ExtensionCategory) -> anyhow::Result<Vec<String>> {
        Ok(layered(&self.config, category))
    }
}

/// Like [`FileDefinitions`], but re-reads the config file on every call so
/// edits show up after the classification cache is forgotten.
#[derive(Debug, Clone)]
pub struct ConfigFileDefinitions {
    path: PathBuf,
}

impl ConfigFileDefinitions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExtensionProvider for ConfigFileDefinitions {
    fn extensions(&self, category: ExtensionCategory) -> anyhow::Result<Vec<String>> {
        let config = MediaConfig::load_or_default(&self.path)?;
        Ok(layered(&config, category))
    }
}

fn layered(config: &MediaConfig, category: ExtensionCategory) -> Vec<String> {
    match config.extensions(category) {
        Some(list) => list.to_vec(),
        None => category.defaults().iter().map(|s| s.to_string()).collect(),
    }
}
