use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::classify::{self, ClassificationCache};
use crate::definitions::ExtensionProvider;
use crate::error::ItemError;
use crate::format::{self, DateFormatter, Translator};

/// Translation key for the noun shown after a folder's child count.
pub const FOLDER_SIZE_ITEMS_KEY: &str = "media.folder_size_items";

/// Structural category of a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::File => "file",
            ItemKind::Folder => "folder",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(ItemKind::File),
            "folder" => Ok(ItemKind::Folder),
            other => Err(ItemError::InvalidKind(other.to_string())),
        }
    }
}

/// File type category derived from the extension. Folders have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Audio,
    Document,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Document => "document",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file or folder in the media library.
///
/// Attributes are resolved by whoever lists the library; this type only
/// derives presentation facts from them. There are no setters, so `title`
/// always matches the final segment of `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaLibraryItem {
    title: String,
    path: String,
    /// Bytes for files, number of direct children for folders
    size: u64,
    /// Unix timestamp, `None` when unknown
    last_modified: Option<i64>,
    kind: ItemKind,
    public_url: String,
}

impl MediaLibraryItem {
    pub fn new(
        path: impl Into<String>,
        size: u64,
        last_modified: Option<i64>,
        kind: ItemKind,
        public_url: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ItemError::EmptyPath);
        }

        if let Some(ts) = last_modified {
            if ts < 0 {
                return Err(ItemError::NegativeTimestamp(ts));
            }
            if DateTime::from_timestamp(ts, 0).is_none() {
                return Err(ItemError::TimestampOutOfRange(ts));
            }
        }

        let title = basename(&path).to_string();

        Ok(Self {
            title,
            path,
            size,
            last_modified,
            kind,
            public_url: public_url.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.last_modified
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// Lower-cased text after the last `.` of the title, empty if there is none.
    pub fn extension(&self) -> String {
        self.title
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    /// Classify against the process-wide extension tables.
    /// Returns `None` for folders.
    pub fn file_type(&self, provider: &dyn ExtensionProvider) -> anyhow::Result<Option<FileType>> {
        self.file_type_with(classify::global(), provider)
    }

    /// Classify against an explicit cache.
    pub fn file_type_with(
        &self,
        cache: &ClassificationCache,
        provider: &dyn ExtensionProvider,
    ) -> anyhow::Result<Option<FileType>> {
        if !self.is_file() {
            return Ok(None);
        }
        cache.classify(&self.extension(), provider).map(Some)
    }

    /// MIME type guessed from the extension, files only.
    pub fn mime_type(&self) -> Option<String> {
        if !self.is_file() {
            return None;
        }
        let ext = self.extension();
        if ext.is_empty() {
            return None;
        }
        mime_guess::from_ext(&ext).first().map(|m| m.to_string())
    }

    /// Human readable size: scaled bytes for files, "<n> <noun>" for folders.
    pub fn size_to_string(&self, lang: &dyn Translator) -> String {
        match self.kind {
            ItemKind::File => format::size_to_string(self.size),
            ItemKind::Folder => format!(
                "{} {}",
                self.size,
                lang.choice(FOLDER_SIZE_ITEMS_KEY, self.size)
            ),
        }
    }

    pub fn last_modified_as_string(&self, dates: &dyn DateFormatter) -> Option<String> {
        self.last_modified.map(|ts| dates.format_timestamp(ts))
    }
}

/// Final path segment, ignoring trailing separators.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(std::path::is_separator);
    match trimmed.rfind(std::path::is_separator) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;
    use crate::definitions::FileDefinitions;
    use crate::format::{CalendarDate, Lang};

    fn file(path: &str) -> MediaLibraryItem {
        MediaLibraryItem::new(path, 10, Some(1_700_000_000), ItemKind::File, "/storage/app/media").unwrap()
    }

    fn folder(path: &str, children: u64) -> MediaLibraryItem {
        MediaLibraryItem::new(path, children, None, ItemKind::Folder, "/storage/app/media").unwrap()
    }

    fn small_tables() -> FileDefinitions {
        FileDefinitions::new(MediaConfig {
            image_extensions: Some(vec!["jpg".into(), "png".into()]),
            video_extensions: Some(vec!["mp4".into()]),
            audio_extensions: Some(vec!["mp3".into()]),
            ..MediaConfig::default()
        })
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(file("a/b/c.jpg").title(), "c.jpg");
        assert_eq!(folder("a/b/", 0).title(), "b");
        assert_eq!(folder("uploads", 0).title(), "uploads");
        assert_eq!(file("/photo.png").title(), "photo.png");
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            MediaLibraryItem::new("", 0, None, ItemKind::File, ""),
            Err(ItemError::EmptyPath)
        );
        assert_eq!(
            MediaLibraryItem::new("a.jpg", 0, Some(-1), ItemKind::File, ""),
            Err(ItemError::NegativeTimestamp(-1))
        );
        assert_eq!(
            MediaLibraryItem::new("a.jpg", 0, Some(i64::MAX), ItemKind::File, ""),
            Err(ItemError::TimestampOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("file".parse::<ItemKind>().unwrap(), ItemKind::File);
        assert_eq!("folder".parse::<ItemKind>().unwrap(), ItemKind::Folder);
        assert_eq!(ItemKind::Folder.to_string(), "folder");
        assert!(matches!("link".parse::<ItemKind>(), Err(ItemError::InvalidKind(k)) if k == "link"));
    }

    #[test]
    fn test_is_file() {
        assert!(file("x.txt").is_file());
        assert!(!folder("x.txt", 3).is_file());
    }

    #[test]
    fn test_extension() {
        assert_eq!(file("dir.v2/x.JPG").extension(), "jpg");
        assert_eq!(file("dir.v2/README").extension(), "");
        assert_eq!(file("archive.tar.gz").extension(), "gz");
        assert_eq!(file("trailing.").extension(), "");
    }

    #[test]
    fn test_classification() {
        let cache = ClassificationCache::new();
        let defs = small_tables();
        let classify = |path: &str| file(path).file_type_with(&cache, &defs).unwrap();

        assert_eq!(classify("x.JPG"), Some(FileType::Image));
        assert_eq!(classify("x.png"), Some(FileType::Image));
        assert_eq!(classify("x.mp4"), Some(FileType::Video));
        assert_eq!(classify("x.mp3"), Some(FileType::Audio));
        assert_eq!(classify("x.txt"), Some(FileType::Document));
        assert_eq!(classify("x"), Some(FileType::Document));
    }

    #[test]
    fn test_process_wide_classification() {
        let defaults = FileDefinitions::default();
        assert_eq!(file("clips/intro.webm").file_type(&defaults).unwrap(), Some(FileType::Video));
        assert_eq!(folder("clips", 1).file_type(&defaults).unwrap(), None);
    }

    #[test]
    fn test_folder_has_no_file_type() {
        let cache = ClassificationCache::new();
        let defs = small_tables();
        assert_eq!(folder("photos.jpg", 2).file_type_with(&cache, &defs).unwrap(), None);
        // Folders never trigger a table build
        assert!(!cache.is_built());
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(file("x.png").mime_type().as_deref(), Some("image/png"));
        assert_eq!(file("x").mime_type(), None);
        assert_eq!(folder("x.png", 1).mime_type(), None);
    }

    #[test]
    fn test_size_to_string() {
        let lang = Lang::default();
        let empty = MediaLibraryItem::new("empty.txt", 0, None, ItemKind::File, "").unwrap();
        assert_eq!(empty.size_to_string(&lang), "0 B");
        assert_eq!(folder("docs", 3).size_to_string(&lang), "3 items");
        assert_eq!(folder("docs", 1).size_to_string(&lang), "1 item");
    }

    #[test]
    fn test_last_modified_as_string() {
        let dates = CalendarDate::default();
        assert_eq!(folder("docs", 0).last_modified_as_string(&dates), None);

        let epoch = MediaLibraryItem::new("a.jpg", 1, Some(0), ItemKind::File, "").unwrap();
        assert_eq!(epoch.last_modified_as_string(&dates).as_deref(), Some("Jan 1, 1970"));

        // 2024-01-02T12:00:00Z
        let item = MediaLibraryItem::new("a.jpg", 1, Some(1_704_196_800), ItemKind::File, "").unwrap();
        assert_eq!(item.last_modified_as_string(&dates).as_deref(), Some("Jan 2, 2024"));
    }
}
