use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medialib_core::{ItemKind, ItemRow, MediaLibraryItem, Presenter};

#[derive(Parser)]
#[command(name = "medialib", version, about = "Describe media library items: file type, size and date")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe every entry of a JSON listing
    List {
        /// Listing file (JSON array of {path, size, last_modified, type, public_url})
        listing: PathBuf,

        /// Media config JSON (extension lists, date format, translations)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Describe a single item
    Describe {
        /// Path relative to the library root
        path: String,

        /// Size in bytes, or child count with --folder
        #[arg(long, default_value_t = 0)]
        size: u64,

        /// Last modification time (Unix timestamp)
        #[arg(long)]
        modified: Option<i64>,

        /// Treat the item as a folder
        #[arg(long)]
        folder: bool,

        /// Public URL of the item
        #[arg(long, default_value = "")]
        url: String,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn print_rows(rows: &[ItemRow], json: bool) -> anyhow::Result<()> {
    if json {
        medialib_core::write_rows_json(rows, std::io::stdout().lock())?;
        println!();
        return Ok(());
    }

    for row in rows {
        let kind = match row.file_type {
            Some(ft) => ft.as_str(),
            None => row.kind.as_str(),
        };
        println!(
            "{}\t{}\t{}\t{}",
            row.title,
            kind,
            row.size_display,
            row.last_modified_display.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    match cli.command {
        Command::List { listing, config, json } => {
            let options = medialib_core::ListOptions { listing, config };
            let report = medialib_core::describe_listing(&options)?;
            print_rows(&report.rows, json)?;
            if !report.warnings.is_empty() {
                eprintln!("{} entries skipped", report.warnings.len());
            }
        }
        Command::Describe {
            path,
            size,
            modified,
            folder,
            url,
            config,
            json,
        } => {
            let kind = if folder { ItemKind::Folder } else { ItemKind::File };
            let item = MediaLibraryItem::new(path, size, modified, kind, url)?;

            let (media_config, provider) = medialib_core::load_settings(config.as_deref())?;
            let dates = media_config.date_formatter()?;
            let lang = media_config.lang();
            let presenter = Presenter {
                cache: medialib_core::classify::global(),
                provider: provider.as_ref(),
                dates: &dates,
                lang: &lang,
            };
            print_rows(&[presenter.present(&item)?], json)?;
        }
    }

    Ok(())
}
