use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ItemError;
use crate::item::{ItemKind, MediaLibraryItem};

/// One entry as produced by an external library lister.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub path: String,
    pub size: i64,
    #[serde(default)]
    pub last_modified: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub public_url: String,
}

impl ListingEntry {
    /// Validate the raw fields and build the item.
    pub fn into_item(self) -> Result<MediaLibraryItem, ItemError> {
        let kind: ItemKind = self.kind.parse()?;
        let size = u64::try_from(self.size).map_err(|_| ItemError::NegativeSize(self.size))?;
        MediaLibraryItem::new(self.path, size, self.last_modified, kind, self.public_url)
    }
}

/// Read a JSON array of listing entries.
pub fn read_listing(path: &Path) -> anyhow::Result<Vec<ListingEntry>> {
    let file = File::open(path).with_context(|| format!("failed to open listing {}", path.display()))?;
    let entries = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse listing {}", path.display()))?;
    Ok(entries)
}
