//! kgdir: browse the community directory built from a knowledge-graph export.
//!
//! ```text
//! kgdir list --search ada --category Statistics --page 2
//! kgdir list --quadrant tutorials
//! kgdir categories
//! kgdir show member-3 --raw
//! kgdir export --output directory.json
//! ```

mod render;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use kgdir_core::config::Config;
use kgdir_core::loader::{InputFormat, RecordLoader};
use kgdir_core::types::Quadrant;
use kgdir_directory::Directory;
use kgdir_match::FilterStore;

#[derive(Parser)]
#[command(name = "kgdir")]
#[command(about = "Search and filter community members derived from a knowledge-graph export")]
#[command(version)]
struct Args {
    /// Data file or directory (overrides data.path and DATA_PATH)
    #[arg(short, long, value_name = "PATH", global = true)]
    data: Option<PathBuf>,

    /// Input format (defaults to data.format)
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Auto,
    Jsonl,
    Json,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Jsonl => InputFormat::Jsonl,
            FormatArg::Json => InputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List members visible under the given filters, one page at a time
    List {
        /// Case-insensitive text matched against name, description and keywords
        #[arg(short, long)]
        search: Option<String>,

        /// Category to select (repeatable; any selected category may match)
        #[arg(short, long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Documentation quadrant: reference, explanation, tutorials or guides (repeatable)
        #[arg(short, long = "quadrant", value_name = "QUADRANT")]
        quadrants: Vec<Quadrant>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print every category available as a filter
    Categories,
    /// Show one member's profile
    Show {
        /// Member id, e.g. member-0
        id: String,

        /// Print the original fields and mappings as JSON
        #[arg(long)]
        raw: bool,
    },
    /// Write members and categories as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    init_tracing(&settings.log.filter);

    let data_path = match args.data {
        Some(path) => path,
        None => config.data_path()?,
    };
    let format = args.format.map(InputFormat::from).unwrap_or(settings.data.format);
    tracing::debug!(env = config.env_name(), path = %data_path.display(), ?format, "starting");
    let mut directory = Directory::load(&RecordLoader::new(&data_path).with_format(format));

    match args.command {
        Command::List { search, categories, quadrants, page } => {
            let mut filters = FilterStore::new();
            if let Some(term) = search {
                filters.set_search_term(term);
            }
            filters.set_selected_categories(categories);
            filters.set_selected_quadrants(quadrants);
            let visible = directory.visible(&filters.snapshot());
            print!("{}", render::page(&visible.page(page, settings.display.page_size), settings.display.max_keywords));
        }
        Command::Categories => {
            if directory.categories().is_empty() {
                println!("No categories available");
            }
            for category in directory.categories() {
                println!("{}", category);
            }
        }
        Command::Show { id, raw } => {
            let member = directory.member(&id).with_context(|| format!("no member with id '{}'", id))?;
            if raw {
                print!("{}", render::raw(member)?);
            } else {
                print!("{}", render::profile(member));
            }
        }
        Command::Export { output } => {
            let json = serde_json::to_string_pretty(&directory.export())?;
            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Exported {} members to {}", directory.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}
