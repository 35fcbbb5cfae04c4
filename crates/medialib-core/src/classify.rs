//! Process-wide extension tables used to classify files.
//!
//! The tables are built from an [`ExtensionProvider`] on the first
//! classification and kept until [`ClassificationCache::forget`] is called.
//! A build either produces all three tables or none.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::definitions::{ExtensionCategory, ExtensionProvider};
use crate::item::FileType;

static GLOBAL: ClassificationCache = ClassificationCache::new();

/// The cache shared by every item in the process.
pub fn global() -> &'static ClassificationCache {
    &GLOBAL
}

/// Drop the process-wide tables so the next classification re-reads config.
pub fn forget_extensions() {
    GLOBAL.forget();
}

/// Normalized extension sets, checked in priority order: image, video, audio.
#[derive(Debug, Clone)]
pub struct ExtensionTables {
    tables: Vec<(FileType, HashSet<String>)>,
}

impl ExtensionTables {
    /// Read every category from `provider`. Nothing is kept if any read fails.
    pub fn load(provider: &dyn ExtensionProvider) -> anyhow::Result<Self> {
        let mut tables = Vec::with_capacity(ExtensionCategory::ALL.len());
        for category in ExtensionCategory::ALL {
            let set: HashSet<String> = provider
                .extensions(category)?
                .iter()
                .filter_map(|ext| normalize(ext))
                .collect();
            tables.push((file_type_for(category), set));
        }
        Ok(Self { tables })
    }

    /// Category of an already lower-cased extension.
    pub fn lookup(&self, extension: &str) -> FileType {
        if extension.is_empty() {
            return FileType::Document;
        }
        self.tables
            .iter()
            .find(|(_, set)| set.contains(extension))
            .map(|(file_type, _)| *file_type)
            .unwrap_or(FileType::Document)
    }

    pub fn contains(&self, file_type: FileType, extension: &str) -> bool {
        self.tables
            .iter()
            .any(|(ft, set)| *ft == file_type && set.contains(extension))
    }
}

fn file_type_for(category: ExtensionCategory) -> FileType {
    match category {
        ExtensionCategory::Image => FileType::Image,
        ExtensionCategory::Video => FileType::Video,
        ExtensionCategory::Audio => FileType::Audio,
    }
}

fn normalize(ext: &str) -> Option<String> {
    let ext = ext.trim();
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Lazily built, invalidatable extension tables.
///
/// Readers share a read lock. A cold cache is built under the write lock
/// with a re-check, so concurrent first calls build it once.
#[derive(Debug)]
pub struct ClassificationCache {
    tables: RwLock<Option<Arc<ExtensionTables>>>,
}

impl ClassificationCache {
    pub const fn new() -> Self {
        Self {
            tables: RwLock::new(None),
        }
    }

    /// Current tables, building them from `provider` if needed.
    pub fn tables(&self, provider: &dyn ExtensionProvider) -> anyhow::Result<Arc<ExtensionTables>> {
        // The slot is only ever replaced whole, so a poisoned lock is still consistent
        if let Some(tables) = self.tables.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(tables));
        }

        let mut slot = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(tables) = slot.as_ref() {
            return Ok(Arc::clone(tables));
        }

        let built = Arc::new(ExtensionTables::load(provider)?);
        log::debug!(
            "built extension tables ({} image, {} video, {} audio)",
            built.tables[0].1.len(),
            built.tables[1].1.len(),
            built.tables[2].1.len()
        );
        *slot = Some(Arc::clone(&built));
        Ok(built)
    }

    pub fn classify(&self, extension: &str, provider: &dyn ExtensionProvider) -> anyhow::Result<FileType> {
        Ok(self.tables(provider)?.lookup(extension))
    }

    pub fn forget(&self) {
        let mut slot = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            log::debug!("forgot extension tables");
        }
    }

    pub fn is_built(&self) -> bool {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new()
    }
}
