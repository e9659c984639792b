use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use cli::batch;
use docsum_core::config::{self, AppConfig};
use docsum_core::{DocumentSummary, ProcessOutcome};
use std::path::PathBuf;
use storage::{OutputStore, SearchFilter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            out,
            max_sentences,
            per_file_json,
            json,
        } => {
            apply_overrides(&mut cfg, out, max_sentences)?;
            if per_file_json {
                cfg.output.per_file_json = true;
            }
            run_process(&cfg, &input, json)
        }
        Commands::Analyze {
            file,
            max_sentences,
        } => {
            apply_overrides(&mut cfg, None, max_sentences)?;
            run_analyze(&cfg, &file)
        }
        Commands::Search {
            query,
            tag,
            lang,
            out,
            json,
        } => {
            apply_overrides(&mut cfg, out, None)?;
            run_search(
                &cfg,
                SearchFilter {
                    query,
                    tag,
                    language: lang,
                },
                json,
            )
        }
        Commands::Show { hash, out } => {
            apply_overrides(&mut cfg, out, None)?;
            run_show(&cfg, &hash)
        }
        Commands::Facets { out } => {
            apply_overrides(&mut cfg, out, None)?;
            run_facets(&cfg)
        }
    }
}

#[derive(Parser)]
#[command(name = "docsum")]
#[command(about = "Office document summarizer", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every supported document under the input directories and append the results
    Process {
        /// Input directories (defaults to scan.include)
        #[arg(short, long)]
        input: Vec<PathBuf>,
        /// Output directory for the log, routes and snapshots
        #[arg(short, long)]
        out: Option<String>,
        /// Max sentences in each summary
        #[arg(long)]
        max_sentences: Option<usize>,
        /// Write a .json snapshot per processed file
        #[arg(long, default_value_t = false)]
        per_file_json: bool,
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Analyze one file and print the record without storing it
    Analyze {
        file: PathBuf,
        /// Max sentences in the summary
        #[arg(long)]
        max_sentences: Option<usize>,
    },
    /// Search stored summaries
    Search {
        /// Free-text query over name, title, summary, actions, dates and amounts
        #[arg(short, long)]
        query: Option<String>,
        /// Tag filter
        #[arg(long)]
        tag: Option<String>,
        /// Language code filter
        #[arg(long)]
        lang: Option<String>,
        #[arg(short, long)]
        out: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the stored record for a content hash
    Show {
        hash: String,
        #[arg(short, long)]
        out: Option<String>,
    },
    /// List tags and languages present in the store
    Facets {
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn apply_overrides(
    cfg: &mut AppConfig,
    out: Option<String>,
    max_sentences: Option<usize>,
) -> Result<()> {
    if let Some(out) = out {
        cfg.output.dir = out;
    }
    if let Some(n) = max_sentences {
        cfg.summary.max_sentences = n;
    }
    cfg.summary.validate()?;
    Ok(())
}

fn open_store(cfg: &AppConfig) -> Result<OutputStore> {
    OutputStore::open(&cfg.output.dir)
}

fn run_process(cfg: &AppConfig, input: &[PathBuf], json: bool) -> Result<()> {
    let out_dir = PathBuf::from(&cfg.output.dir);
    let summary = batch::process_inputs(cfg, input, &out_dir)?;
    let log_path = out_dir.join(storage::LOG_FILE_NAME);
    if json {
        let summary_json = serde_json::json!({
            "status": "ok",
            "log": log_path,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&summary_json)?);
    } else {
        println!(
            "process: discovered {}, processed {}, no text {}, failed {}",
            summary.discovered, summary.processed, summary.not_processed, summary.failed
        );
        for path in &summary.failures {
            println!("  failed: {}", path.display());
        }
        println!("Done. CSV: {}", log_path.display());
    }
    Ok(())
}

fn run_analyze(cfg: &AppConfig, file: &PathBuf) -> Result<()> {
    let analyzer = batch::build_analyzer(cfg)?;
    match analyzer.process(file)? {
        ProcessOutcome::Summarized(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ProcessOutcome::NotProcessed { path } => {
            println!("not processed: no text could be extracted from {}", path.display());
        }
    }
    Ok(())
}

fn run_search(cfg: &AppConfig, filter: SearchFilter, json: bool) -> Result<()> {
    let rows = open_store(cfg)?.search(&filter)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No summaries found.");
        return Ok(());
    }
    for row in &rows {
        print_row(row);
    }
    println!("{} result(s)", rows.len());
    Ok(())
}

fn print_row(row: &DocumentSummary) {
    println!(
        "{}  {}  [{}]  {}  {}",
        row.observed_at_string(),
        &row.content_hash[..row.content_hash.len().min(12)],
        row.language,
        row.file_name,
        row.tags.join("; ")
    );
    println!("    {}", row.title);
}

fn run_show(cfg: &AppConfig, hash: &str) -> Result<()> {
    match open_store(cfg)?.find_by_hash(hash)? {
        Some(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        None => bail!("summary not found for content hash {hash}"),
    }
}

fn run_facets(cfg: &AppConfig) -> Result<()> {
    let facets = open_store(cfg)?.facets()?;
    println!("tags: {}", facets.tags.join(", "));
    println!("languages: {}", facets.languages.join(", "));
    Ok(())
}
