//! Command-line shell over the status catalog.
//!
//! Usage:
//!   httpcodes list --query "not found"
//!   httpcodes show 404 --share
//!   printf '4\n40\n404\n' | httpcodes search --json
//!   httpcodes validate --file catalogs/http_status_v1.json

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use httpcodes::logging::init_logging;
use httpcodes::render::{
    DetailView, ListView, ShareCard, render_detail, render_json_line, render_list, render_share,
};
use httpcodes::{CatalogIndex, SearchSession, Settings, StatusCode, asset_lookup, load_catalog};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "httpcodes")]
#[command(about = "Browse and search HTTP status codes by category")]
struct Cli {
    /// Catalog document to use instead of the embedded table (or set HTTPCODES_CATALOG).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Directory of per-code images (or set HTTPCODES_ASSETS).
    #[arg(long, global = true)]
    assets: Option<PathBuf>,
    /// Log debug details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the categorized list, optionally filtered by a search query.
    List {
        #[arg(long, short, default_value = "", allow_hyphen_values = true)]
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the detail view for one status code.
    Show {
        code: u16,
        /// Print the shareable card instead of the detail view.
        #[arg(long)]
        share: bool,
        #[arg(long)]
        json: bool,
    },
    /// Read one query per stdin line and print the results after each.
    Search {
        #[arg(long)]
        json: bool,
    },
    /// Validate a catalog document against the schema and catalog rules.
    Validate {
        /// Document to check; defaults to the configured catalog.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help lands here too; it prints to stdout and succeeds.
        Err(err) if !err.use_stderr() => {
            err.print().context("printing help")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let settings = Settings::from_env().with_overrides(cli.catalog, cli.assets, cli.verbose);
    init_logging(&settings.log_filter)?;
    debug!(?settings, "resolved settings");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List { query, json } => list(&settings, &query, json, &mut out)?,
        Command::Show { code, share, json } => show(&settings, code, share, json, &mut out)?,
        Command::Search { json } => search(&settings, json, &mut out)?,
        Command::Validate { file } => validate(&settings, file, &mut out)?,
    }

    out.flush().context("flushing stdout")?;
    Ok(())
}

fn list<W: Write>(settings: &Settings, query: &str, json: bool, out: &mut W) -> Result<()> {
    let index = load_catalog(settings)?;
    let filtered = index.catalog().filter(query);
    if json {
        render_json_line(out, &ListView::new(index.key(), query, &filtered.categories))
    } else {
        render_list(out, &filtered.categories)
    }
}

fn show<W: Write>(
    settings: &Settings,
    code: u16,
    share: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let index = load_catalog(settings)?;
    let assets = asset_lookup(settings);
    let code = StatusCode(code);
    let (category, entry) = index
        .locate(code)
        .ok_or_else(|| anyhow!("status code {code} not found in catalog"))?;

    if share {
        let card = ShareCard::new(entry, &*assets);
        info!(code = code.0, image = ?card.image, "prepared share card");
        if json {
            render_json_line(out, &card)
        } else {
            render_share(out, &card)
        }
    } else {
        let view = DetailView::new(category, entry, &*assets);
        if json {
            render_json_line(out, &view)
        } else {
            render_detail(out, &view)
        }
    }
}

fn search<W: Write>(settings: &Settings, json: bool, out: &mut W) -> Result<()> {
    let index = load_catalog(settings)?;
    let mut session = SearchSession::new(index.catalog());
    let stdin = io::stdin();
    for (idx, line) in stdin.lock().lines().enumerate() {
        let query = line.with_context(|| format!("reading query on line {}", idx + 1))?;
        session.set_query(&query);
        if json {
            render_json_line(
                out,
                &ListView::new(index.key(), session.query(), session.results()),
            )?;
        } else {
            if idx > 0 {
                writeln!(out)?;
            }
            writeln!(out, "> {}", session.query())?;
            render_list(out, session.results())?;
        }
        out.flush().context("flushing search results")?;
    }
    Ok(())
}

fn validate<W: Write>(settings: &Settings, file: Option<PathBuf>, out: &mut W) -> Result<()> {
    let (origin, index) = match file {
        Some(path) => {
            let index = CatalogIndex::load(&path)?;
            (path.display().to_string(), index)
        }
        None => {
            let origin = settings
                .catalog_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "embedded catalog".to_string());
            (origin, load_catalog(settings)?.into_owned())
        }
    };
    writeln!(
        out,
        "ok: {} ({}, {} categories, {} entries)",
        origin,
        index.key().0,
        index.categories().len(),
        index.len()
    )?;
    Ok(())
}
