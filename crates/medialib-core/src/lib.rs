pub mod classify;
pub mod config;
pub mod definitions;
pub mod error;
pub mod format;
pub mod item;
pub mod listing;
pub mod present;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use classify::{forget_extensions, ClassificationCache, ExtensionTables};
pub use config::MediaConfig;
pub use definitions::{ConfigFileDefinitions, ExtensionCategory, ExtensionProvider, FileDefinitions};
pub use error::ItemError;
pub use format::{size_to_string, CalendarDate, DateFormatter, Lang, Translator};
pub use item::{FileType, ItemKind, MediaLibraryItem};
pub use listing::ListingEntry;
pub use present::{write_rows_json, ItemRow, Presenter};

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// JSON listing produced by an external lister
    pub listing: PathBuf,
    /// Optional media config; defaults are used when absent or missing
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ListingReport {
    pub rows: Vec<ItemRow>,
    /// Entries that were rejected, one message each
    pub warnings: Vec<String>,
}

/// Load the media config and pick the matching extension provider.
///
/// With a config file the provider re-reads it on every table build, so
/// `forget_extensions` picks up edits. Without one, built-in defaults apply.
pub fn load_settings(config: Option<&Path>) -> anyhow::Result<(MediaConfig, Box<dyn ExtensionProvider>)> {
    let Some(path) = config else {
        let provider: Box<dyn ExtensionProvider> = Box::new(FileDefinitions::default());
        return Ok((MediaConfig::default(), provider));
    };
    let provider: Box<dyn ExtensionProvider> = Box::new(ConfigFileDefinitions::new(path));
    Ok((MediaConfig::load_or_default(path)?, provider))
}

/// Describe every entry of a listing using the process-wide classification cache.
pub fn describe_listing(options: &ListOptions) -> anyhow::Result<ListingReport> {
    describe_listing_with(options, classify::global())
}

/// Describe every entry of a listing against an explicit classification cache.
pub fn describe_listing_with(
    options: &ListOptions,
    cache: &ClassificationCache,
) -> anyhow::Result<ListingReport> {
    let (config, provider) = load_settings(options.config.as_deref())?;
    let dates = config.date_formatter()?;
    let lang = config.lang();

    let entries = listing::read_listing(&options.listing)?;
    let total = entries.len();

    let mut items = Vec::with_capacity(total);
    let mut warnings = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let path = entry.path.clone();
        match entry.into_item() {
            Ok(item) => items.push(item),
            Err(e) => {
                let message = format!("entry {} ({}): {}", index, path, e);
                log::warn!("skipping listing {}", message);
                warnings.push(message);
            }
        }
    }

    let presenter = Presenter {
        cache,
        provider: provider.as_ref(),
        dates: &dates,
        lang: &lang,
    };
    let rows = items
        .par_iter()
        .map(|item| presenter.present(item))
        .collect::<anyhow::Result<Vec<_>>>()?;

    log::debug!("described {} of {} listing entries", rows.len(), total);

    Ok(ListingReport { rows, warnings })
}
