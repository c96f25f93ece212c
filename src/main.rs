mod db;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use infotext_import::{CatalogEntry, Classification, ImportError, ParseResult};

#[derive(Parser)]
#[command(name = "infotext_import", about = "Import structured teaching documents into content blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one document and show its sections
    Parse {
        file: PathBuf,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse documents and store their sections as blocks
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Block store path (default: from settings)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Suggest a target block per classification
    Suggest {
        /// JSON catalog file: [{"identifier": ..., "label": ...}]
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Block store path, used when no catalog file is given
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show block store statistics
    Stats {
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::Settings::load()?;
    init_tracing(&settings.log_filter);

    let t0 = Instant::now();

    let result = match cli.command {
        Commands::Parse { file, json } => {
            let text = read_document(&file)?;
            let parsed = infotext_import::parse(&text)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                print_summary(&parsed);
            }
            Ok(())
        }
        Commands::Import { files, db } => {
            let conn = db::connect(&db.unwrap_or(settings.db_path))?;
            db::init_schema(&conn)?;
            println!("Importing {} documents...", files.len());
            let counts = import_documents(&conn, &files, settings.batch_size)?;
            counts.print();
            Ok(())
        }
        Commands::Suggest { catalog, db, json } => {
            let entries = match catalog {
                Some(path) => read_catalog(&path)?,
                None => {
                    let conn = db::connect(&db.unwrap_or(settings.db_path))?;
                    db::init_schema(&conn)?;
                    db::fetch_catalog(&conn)?
                }
            };
            info!("Matching against {} catalog entries", entries.len());
            let suggestions = infotext_import::suggest(&entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                for (class, id) in &suggestions {
                    println!("{:<8} -> {}", class, id.as_deref().unwrap_or("-"));
                }
            }
            Ok(())
        }
        Commands::Stats { db } => {
            let conn = db::connect(&db.unwrap_or(settings.db_path))?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Blocks:  {}", s.total);
            for (class, n) in &s.by_classification {
                println!("  {:<8} {}", class, n);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid catalog {}", path.display()))
}

fn print_summary(parsed: &ParseResult) {
    if parsed.sections.is_empty() {
        println!("No sections found.");
        return;
    }

    println!(
        "{:>3} | {:<24} | {:<8} | {:<32} | {:>6}",
        "#", "Topic", "Class", "Title", "Bytes"
    );
    println!("{}", "-".repeat(86));
    for (i, s) in parsed.sections.iter().enumerate() {
        println!(
            "{:>3} | {:<24} | {:<8} | {:<32} | {:>6}",
            i + 1,
            truncate(&s.topic, 24),
            s.classification,
            truncate(&s.title, 32),
            s.markup.len()
        );
    }

    let counts: Vec<String> = Classification::ALL
        .iter()
        .map(|c| format!("{} {}", parsed.stats.by_classification.get(c).copied().unwrap_or(0), c))
        .collect();
    println!("\n{} sections ({})", parsed.stats.total, counts.join(", "));
}

struct ImportCounts {
    documents: usize,
    failed: usize,
    blocks: usize,
}

impl ImportCounts {
    fn print(&self) {
        println!(
            "Imported {} documents ({} failed), {} blocks written.",
            self.documents, self.failed, self.blocks,
        );
    }
}

fn import_documents(
    conn: &rusqlite::Connection,
    files: &[PathBuf],
    batch_size: usize,
) -> Result<ImportCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ImportCounts {
        documents: 0,
        failed: 0,
        blocks: 0,
    };

    for chunk in files.chunks(batch_size.max(1)) {
        let results: Vec<_> = chunk.par_iter().map(|path| (path, parse_file(path))).collect();

        for (path, result) in results {
            match result {
                Ok(parsed) => {
                    let source = path.display().to_string();
                    counts.blocks += db::save_sections(conn, &source, &parsed.sections)?;
                    counts.documents += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    counts.failed += 1;
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        documents = counts.documents,
        failed = counts.failed,
        blocks = counts.blocks,
        "import finished"
    );
    Ok(counts)
}

fn parse_file(path: &Path) -> Result<ParseResult> {
    let text = read_document(path)?;
    match infotext_import::parse(&text) {
        Err(ImportError::EmptyInput) => anyhow::bail!("no content"),
        other => Ok(other?),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
