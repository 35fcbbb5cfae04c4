use std::io::Write;

use serde::Serialize;

use crate::classify::ClassificationCache;
use crate::definitions::ExtensionProvider;
use crate::format::{DateFormatter, Translator};
use crate::item::{FileType, ItemKind, MediaLibraryItem};

/// Everything a media manager shows for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub title: String,
    pub path: String,
    pub kind: ItemKind,
    pub file_type: Option<FileType>,
    pub mime: Option<String>,
    pub size: u64,
    pub size_display: String,
    pub last_modified: Option<i64>,
    pub last_modified_display: Option<String>,
    pub public_url: String,
}

/// Collaborators needed to derive display facts for items.
pub struct Presenter<'a> {
    pub cache: &'a ClassificationCache,
    pub provider: &'a dyn ExtensionProvider,
    pub dates: &'a dyn DateFormatter,
    pub lang: &'a dyn Translator,
}

impl Presenter<'_> {
    pub fn present(&self, item: &MediaLibraryItem) -> anyhow::Result<ItemRow> {
        Ok(ItemRow {
            title: item.title().to_string(),
            path: item.path().to_string(),
            kind: item.kind(),
            file_type: item.file_type_with(self.cache, self.provider)?,
            mime: item.mime_type(),
            size: item.size(),
            size_display: item.size_to_string(self.lang),
            last_modified: item.last_modified(),
            last_modified_display: item.last_modified_as_string(self.dates),
            public_url: item.public_url().to_string(),
        })
    }
}

/// Write rows as a pretty-printed JSON array.
pub fn write_rows_json<W: Write>(rows: &[ItemRow], writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}
