use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::info;

use abbreviations::corpus::{CorpusAggregator, CorpusConfig};
use abbreviations::discovery::{self, DiscoveryConfig};
use abbreviations::{clean_text, reader, AbbreviationConfig, AbbreviationEngine, RewriteDirection};

#[derive(Parser, Debug)]
#[command(name = "abbreviations")]
#[command(about = "Find parenthetical abbreviations and expand or compress them in text documents")]
#[command(version)]
struct Cli {
    /// Longest abbreviation considered, in characters
    #[arg(long, global = true, default_value_t = abbreviations::abbreviation::DEFAULT_MAX_ABBREVIATION_LEN)]
    max_len: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print each abbreviation with its inferred term
    Find(FindArgs),

    /// Replace abbreviations with their full terms
    Expand(RewriteArgs),

    /// Replace full terms with their abbreviations
    Compress(RewriteArgs),

    /// Tally (abbreviation, term) pairs across a folder of *.txt documents
    Corpus(CorpusArgs),
}

#[derive(Args, Debug)]
struct FindArgs {
    /// Document to scan
    file: PathBuf,

    /// Emit a JSON object instead of tab-separated lines
    #[arg(long)]
    json: bool,

    /// Skip whitespace and encoding cleanup
    #[arg(long)]
    no_clean: bool,
}

#[derive(Args, Debug)]
struct RewriteArgs {
    /// Document to rewrite
    file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip whitespace and encoding cleanup
    #[arg(long)]
    no_clean: bool,
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Folder of *.txt documents
    folder: PathBuf,

    /// Include documents in subdirectories
    #[arg(long)]
    recursive: bool,

    /// Skip whitespace and encoding cleanup
    #[arg(long)]
    no_clean: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

async fn load_document(path: &Path, no_clean: bool) -> Result<String> {
    let text = reader::read_document(path).await?;
    Ok(if no_clean { text } else { clean_text(&text) })
}

async fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, content)
            .await
            .with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

async fn run_find(engine: &AbbreviationEngine, args: FindArgs) -> Result<()> {
    let text = load_document(&args.file, args.no_clean).await?;
    let map = engine.findall(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (abbreviation, term) in map.iter() {
            println!("{}\t{}", abbreviation, term.unwrap_or_default());
        }
    }
    Ok(())
}

async fn run_rewrite(
    engine: &AbbreviationEngine,
    args: RewriteArgs,
    direction: RewriteDirection,
) -> Result<()> {
    let text = load_document(&args.file, args.no_clean).await?;
    let rewritten = engine.rewrite_all(&text, direction);
    emit(args.output.as_deref(), &rewritten).await
}

async fn run_corpus(abbreviation: AbbreviationConfig, args: CorpusArgs) -> Result<()> {
    // WHY: validate folder early to fail fast with clear error
    if !args.folder.is_dir() {
        anyhow::bail!("Corpus folder is not a directory: {}", args.folder.display());
    }

    let config = CorpusConfig {
        clean: !args.no_clean,
        discovery: DiscoveryConfig {
            fail_fast: args.fail_fast,
            recursive: args.recursive,
        },
        abbreviation,
    };

    let files = discovery::collect_text_files(&args.folder, config.discovery.clone()).await?;
    info!("Discovered {} documents in {}", files.len(), args.folder.display());

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} documents {msg}")?,
        );
        bar
    };

    let mut aggregator = CorpusAggregator::new(config);
    for file in &files {
        let stats = aggregator.process_file(file).await?;
        progress.set_message(stats.path.clone());
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = aggregator.finish();
    match args.output {
        Some(ref path) => report.write_tsv(path).await?,
        None => print!("{}", report.to_tsv()),
    }
    if let Some(ref path) = args.stats_out {
        report.write_stats(path).await?;
    }

    info!(
        "Corpus complete: {} pairs from {} documents ({} failed)",
        report.rows.len(),
        report.stats.files_processed,
        report.stats.files_failed
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: logs go to stderr as JSON so stdout carries only results
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    info!(?cli, "Parsed CLI arguments");

    let abbreviation = AbbreviationConfig {
        max_abbreviation_len: cli.max_len,
    };

    match cli.command {
        Command::Find(args) => run_find(&AbbreviationEngine::new(abbreviation), args).await,
        Command::Expand(args) => {
            run_rewrite(&AbbreviationEngine::new(abbreviation), args, RewriteDirection::Expand).await
        }
        Command::Compress(args) => {
            run_rewrite(&AbbreviationEngine::new(abbreviation), args, RewriteDirection::Compress).await
        }
        Command::Corpus(args) => run_corpus(abbreviation, args).await,
    }
}
