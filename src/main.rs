use anyhow::{Context, Result};
use caption_sentiment::annotate::{self, AnnotateConfig, DEFAULT_OUTPUT_COLUMN, DEFAULT_TEXT_COLUMN};
use caption_sentiment::{discovery, summary, ResourcePaths, SentimentScorer};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "caption-sentiment")]
#[command(about = "Rule-based lexicon sentiment scoring for social-media captions")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    resources: ResourceArgs,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ResourceArgs {
    /// Directory holding the stopword, negation and lexicon files
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Stopword list (overrides --data-dir)
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,

    /// Negation word list (overrides --data-dir)
    #[arg(long, global = true)]
    negations: Option<PathBuf>,

    /// Positive polarity lexicon (overrides --data-dir)
    #[arg(long, global = true)]
    positive: Option<PathBuf>,

    /// Negative polarity lexicon (overrides --data-dir)
    #[arg(long, global = true)]
    negative: Option<PathBuf>,
}

impl ResourceArgs {
    fn paths(&self) -> ResourcePaths {
        let defaults = ResourcePaths::in_dir(&self.data_dir);
        ResourcePaths {
            stopwords: self.stopwords.clone().unwrap_or(defaults.stopwords),
            negations: self.negations.clone().unwrap_or(defaults.negations),
            positive_lexicon: self.positive.clone().unwrap_or(defaults.positive_lexicon),
            negative_lexicon: self.negative.clone().unwrap_or(defaults.negative_lexicon),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score texts given as arguments, or one text per stdin line
    Score {
        texts: Vec<String>,
    },

    /// Add a sentiment column to every CSV file in a directory
    Annotate {
        /// Directory to scan for *.csv files
        root_dir: PathBuf,

        /// Column holding the text to score
        #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
        text_column: String,

        /// Column receiving the score
        #[arg(long, default_value = DEFAULT_OUTPUT_COLUMN)]
        output_column: String,

        /// Write annotated copies here instead of overwriting the inputs
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Scan subdirectories too
        #[arg(long)]
        recursive: bool,

        /// Abort on first error
        #[arg(long)]
        fail_fast: bool,

        /// Files processed concurrently (default: number of CPUs)
        #[arg(long)]
        jobs: Option<usize>,

        /// Suppress console progress bar
        #[arg(long)]
        no_progress: bool,

        /// Stats output file path
        #[arg(long, default_value = "run_stats.json")]
        stats_out: PathBuf,
    },

    /// Per-party descriptive statistics of an annotated sentiment column
    Summarize {
        /// Directory to scan for *.csv files
        root_dir: PathBuf,

        /// Sentiment column to summarize
        #[arg(long, default_value = DEFAULT_OUTPUT_COLUMN)]
        column: String,

        /// Scan subdirectories too
        #[arg(long)]
        recursive: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // WHY: stdout carries results, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::Score { texts } => {
            let scorer = load_scorer(&cli.resources).await?;
            run_score(&scorer, texts).await
        }
        Command::Annotate {
            root_dir,
            text_column,
            output_column,
            output_dir,
            recursive,
            fail_fast,
            jobs,
            no_progress,
            stats_out,
        } => {
            validate_root(&root_dir)?;
            let scorer = Arc::new(load_scorer(&cli.resources).await?);

            let discovery_config = discovery::DiscoveryConfig { fail_fast, recursive };
            let discovered = discovery::collect_discovered_files(&root_dir, discovery_config).await?;
            let files: Vec<PathBuf> = discovered
                .into_iter()
                .filter(|f| f.error.is_none())
                .map(|f| f.path)
                .collect();

            let defaults = AnnotateConfig::default();
            let config = AnnotateConfig {
                text_column,
                output_column,
                output_dir,
                input_root: Some(root_dir),
                fail_fast,
                max_concurrency: jobs.unwrap_or(defaults.max_concurrency),
            };

            let progress = progress_bar(files.len() as u64, no_progress)?;
            let run = annotate::annotate_files(scorer, files, config, progress).await?;
            run.save(&stats_out).await?;

            println!("Annotation complete:");
            println!("  Annotated: {} files, {} rows", run.files_succeeded, run.rows_scored);
            if run.files_skipped > 0 {
                println!("  Skipped (no text column): {} files", run.files_skipped);
            }
            if run.files_failed > 0 {
                println!("  Failed: {} files", run.files_failed);
            }
            println!("  Stats written to {}", stats_out.display());
            Ok(())
        }
        Command::Summarize {
            root_dir,
            column,
            recursive,
            json,
        } => {
            validate_root(&root_dir)?;
            let files = discovery::find_csv_files(&root_dir, recursive).await?;
            let summaries = summary::summarize_files(&files, &column)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", summary::render_table(&summaries));
            }
            Ok(())
        }
    }
}

async fn load_scorer(args: &ResourceArgs) -> Result<SentimentScorer> {
    let paths = args.paths();
    SentimentScorer::load_async(&paths)
        .await
        .context("Failed to initialize sentiment scorer")
}

async fn run_score(scorer: &SentimentScorer, texts: Vec<String>) -> Result<()> {
    if !texts.is_empty() {
        for text in &texts {
            println!("{}", serde_json::to_string(&scorer.analyze(text))?);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        println!("{}", serde_json::to_string(&scorer.analyze(&line))?);
    }
    Ok(())
}

fn validate_root(root_dir: &Path) -> Result<()> {
    if !root_dir.exists() {
        anyhow::bail!("Root directory does not exist: {}", root_dir.display());
    }
    if !root_dir.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", root_dir.display());
    }
    Ok(())
}

fn progress_bar(len: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} files",
    )?);
    Ok(bar)
}
