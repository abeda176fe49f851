use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgerlift_finance::categories::{self, Category};
use ledgerlift_finance::export::{export_edited, export_records, format_amount, locate_export};
use ledgerlift_finance::report::UploadReport;
use ledgerlift_finance::review::{UpdateRequest, label_warnings, validate_update};
use ledgerlift_ingest::{Extraction, TextExtractionError, process_file, process_text_file};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;
mod logging;
mod state;

use config::Config;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLIFT_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlift",
    version,
    long_version = LONG_VERSION,
    about = "Pull transactions out of bank statement PDFs into a spreadsheet"
)]
struct Cli {
    /// Config file (default: ~/.ledgerlift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement and export them
    Extract {
        /// Statement PDF (or extracted text with --text)
        file: PathBuf,

        /// Treat FILE as already-extracted text instead of a PDF
        #[arg(long)]
        text: bool,

        /// Directory for the exported spreadsheet
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Export file name prefix (default from config: expense_tracker)
        #[arg(long)]
        prefix: Option<String>,

        /// Only print what was found; write nothing
        #[arg(long)]
        no_export: bool,

        /// Print the upload report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-export reviewed transactions from an edits JSON file
    Update {
        /// JSON: {"filename": "...", "transactions": [...]}
        edits: PathBuf,

        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Copy a previous export out of the results directory
    Download {
        /// Export file name, as printed by `extract` or `update`
        name: String,

        /// Destination file or directory
        #[arg(long, default_value = ".")]
        to: PathBuf,

        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// List review categories, or the subcategories of one
    Categories {
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive substring filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.logging, cli.verbose)?;

    match cli.command {
        Command::Extract {
            file,
            text,
            out_dir,
            prefix,
            no_export,
            json,
        } => {
            let opts = ExtractOptions {
                text,
                out_dir,
                prefix,
                no_export,
                json,
            };
            return run_extract(&cfg, &file, &opts);
        }

        Command::Update { edits, out_dir, json } => {
            run_update(&cfg, &edits, out_dir.as_deref(), json)?;
        }

        Command::Download { name, to, out_dir } => {
            let dir = cfg.results_dir(out_dir.as_deref())?;
            let src = locate_export(&dir, &name)?;
            let dest = if to.is_dir() { to.join(&name) } else { to };
            std::fs::copy(&src, &dest).with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
            println!("{}", dest.display());
        }

        Command::Categories { category, filter } => {
            print_categories(category.as_deref(), filter.as_deref().unwrap_or(""))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

struct ExtractOptions {
    text: bool,
    out_dir: Option<PathBuf>,
    prefix: Option<String>,
    no_export: bool,
    json: bool,
}

/// Found and Empty both exit 0; an unreadable document exits 1.
fn run_extract(cfg: &Config, file: &Path, opts: &ExtractOptions) -> Result<ExitCode> {
    let name = state::document_name(file);

    let outcome: Result<Extraction, TextExtractionError> = if opts.text {
        process_text_file(file, &cfg.extract)
    } else {
        process_file(file, &cfg.extract)
    };

    let (report, code) = match outcome {
        Ok(Extraction::Found(records)) => {
            tracing::info!(document = %name, transactions = records.len(), "extracted transactions");
            let export = if opts.no_export {
                None
            } else {
                let dir = cfg.results_dir(opts.out_dir.as_deref())?;
                let prefix = opts.prefix.as_deref().unwrap_or(&cfg.export.file_prefix);
                Some(export_records(&dir, &records, prefix, now())?)
            };
            (UploadReport::found(&name, records, export.as_ref()), ExitCode::SUCCESS)
        }
        Ok(Extraction::Empty) => {
            tracing::info!(document = %name, "no transactions matched");
            (UploadReport::empty(&name), ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(document = %name, error = %e, "could not read document");
            (UploadReport::failed(&name, &e), ExitCode::FAILURE)
        }
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(code)
}

fn print_report(report: &UploadReport) {
    println!("{}: {}", report.filename, report.message);
    if report.transaction_data.is_empty() {
        return;
    }
    println!();
    for r in &report.transaction_data {
        println!("{}  {:>12}  {}", r.date, format_amount(r.amount), r.description);
    }
}

#[derive(Serialize)]
struct UpdateReport {
    success: bool,
    message: String,
    filename: String,
}

fn run_update(cfg: &Config, edits: &Path, out_dir: Option<&Path>, json: bool) -> Result<()> {
    let body = std::fs::read_to_string(edits).with_context(|| format!("read {}", edits.display()))?;
    let req = UpdateRequest::from_json(&body).with_context(|| format!("parse {}", edits.display()))?;
    let txns = validate_update(&req)?;

    for (row, check) in label_warnings(txns) {
        tracing::warn!(row, ?check, "label outside the category list");
    }

    let dir = cfg.results_dir(out_dir)?;
    let summary = export_edited(&dir, txns, &cfg.export.updated_prefix, now())?;
    tracing::info!(source = %req.filename, rows = summary.rows, "re-exported reviewed transactions");

    if json {
        let report = UpdateReport {
            success: true,
            message: "Export updated successfully.".to_string(),
            filename: summary.file_name,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Wrote {} ({} rows)", summary.path.display(), summary.rows);
    }
    Ok(())
}

fn print_categories(category: Option<&str>, filter: &str) -> Result<()> {
    match category {
        None => {
            for name in categories::filter_options(&categories::categories(), filter) {
                let cat = Category::from_name(name).context("category list out of sync")?;
                println!("{}: {}", name, cat.subcategories().join(", "));
            }
        }
        Some(c) => {
            if Category::from_name(c).is_none() {
                bail!("unknown category: {} (run `ledgerlift categories`)", c);
            }
            let subs: Vec<&str> = categories::subcategories(Some(c))
                .into_iter()
                .map(|o| o.subcategory)
                .collect();
            for s in categories::filter_options(&subs, filter) {
                println!("{}", s);
            }
        }
    }
    Ok(())
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
