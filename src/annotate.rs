// WHY: Batch caller of the scorer: attach a sentiment column to every record
// of each discovered CSV file, collecting per-file statistics

use anyhow::{Context, Result};
use csv::StringRecord;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::scorer::SentimentScorer;

/// Default caption column of the cleaned Instagram exports
pub const DEFAULT_TEXT_COLUMN: &str = "data.caption.text";
/// Default column the score is written to
pub const DEFAULT_OUTPUT_COLUMN: &str = "sentiment_rulebased";

/// Configuration for batch annotation
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Column holding the text to score
    pub text_column: String,
    /// Column receiving the score; replaced if present, appended otherwise
    pub output_column: String,
    /// Write annotated copies here instead of rewriting files in place
    pub output_dir: Option<PathBuf>,
    /// Discovery root; files below it keep their relative path under `output_dir`
    pub input_root: Option<PathBuf>,
    /// Abort on first failed file
    pub fail_fast: bool,
    /// Files scored concurrently
    pub max_concurrency: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            output_column: DEFAULT_OUTPUT_COLUMN.to_string(),
            output_dir: None,
            input_root: None,
            fail_fast: false,
            max_concurrency: num_cpus::get().max(1),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Success,
    Skipped,
    Failed,
}

/// Per-file annotation statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// Source CSV path
    pub path: String,
    /// Where the annotated file was written
    pub output_path: Option<String>,
    /// Records scored
    pub rows: u64,
    /// Records whose text field was empty or missing
    pub empty_texts: u64,
    /// Mean of the written scores, `None` when no rows were scored
    pub mean_sentiment: Option<f64>,
    pub processing_time_ms: u64,
    pub status: FileStatus,
    pub error: Option<String>,
}

impl FileStats {
    fn skipped(path: &Path, reason: String, started: Instant) -> Self {
        Self {
            path: path.display().to_string(),
            output_path: None,
            rows: 0,
            empty_texts: 0,
            mean_sentiment: None,
            processing_time_ms: started.elapsed().as_millis() as u64,
            status: FileStatus::Skipped,
            error: Some(reason),
        }
    }

    fn failed(path: &Path, error: &anyhow::Error, elapsed: Duration) -> Self {
        Self {
            path: path.display().to_string(),
            output_path: None,
            rows: 0,
            empty_texts: 0,
            mean_sentiment: None,
            processing_time_ms: elapsed.as_millis() as u64,
            status: FileStatus::Failed,
            error: Some(format!("{error:#}")),
        }
    }
}

/// Totals for one annotation run, written to the stats file
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub files_succeeded: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub rows_scored: u64,
    pub total_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    fn record(&mut self, stats: FileStats) {
        match stats.status {
            FileStatus::Success => self.files_succeeded += 1,
            FileStatus::Skipped => self.files_skipped += 1,
            FileStatus::Failed => self.files_failed += 1,
        }
        self.rows_scored += stats.rows;
        self.files.push(stats);
    }

    /// Write as pretty JSON
    pub async fn save(&self, stats_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = stats_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(stats_path, content)
            .await
            .with_context(|| format!("Failed to write stats file {}", stats_path.display()))?;
        Ok(())
    }
}

/// Score format written into CSV cells: always carries a decimal point ("1.0", "-0.5")
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

/// Destination of the annotated copy of `source`
///
/// With an output directory, a file below `input_root` keeps its relative path
/// (`root/a/x.csv` → `out/a/x.csv`); anything else lands under its file name.
pub fn output_path_for(source: &Path, config: &AnnotateConfig) -> PathBuf {
    let Some(dir) = &config.output_dir else {
        return source.to_path_buf();
    };
    let relative = config
        .input_root
        .as_deref()
        .and_then(|root| source.strip_prefix(root).ok())
        .filter(|rel| rel.file_name().is_some());
    match (relative, source.file_name()) {
        (Some(rel), _) => dir.join(rel),
        (None, Some(name)) => dir.join(name),
        (None, None) => source.to_path_buf(),
    }
}

/// Fail when two inputs would be written to the same destination
fn check_destinations(files: &[PathBuf], config: &AnnotateConfig) -> Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    for file in files {
        let destination = output_path_for(file, config);
        if let Some(previous) = seen.insert(destination.clone(), file.as_path()) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                file.display(),
                destination.display()
            );
        }
    }
    Ok(())
}

/// Annotate one CSV file (blocking)
///
/// A file without the text column is skipped, not failed. The output is written
/// to a temporary sibling and renamed into place, so a failure never leaves a
/// half-written CSV behind.
pub fn annotate_file(scorer: &SentimentScorer, path: &Path, config: &AnnotateConfig) -> Result<FileStats> {
    let started = Instant::now();
    debug!("Annotating {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header of {}", path.display()))?
        .clone();

    let Some(text_idx) = headers.iter().position(|h| h == config.text_column) else {
        let reason = format!("Column {} not found", config.text_column);
        warn!("{} in {}, skipping", reason, path.display());
        return Ok(FileStats::skipped(path, reason, started));
    };

    let output_idx = headers.iter().position(|h| h == config.output_column);
    let mut out_headers = headers.clone();
    if output_idx.is_none() {
        out_headers.push_field(&config.output_column);
    }
    let output_idx = output_idx.unwrap_or(headers.len());

    let destination = output_path_for(path, config);
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let tmp_path = tmp_path_for(&destination);

    // The reader is consumed here, so the source is closed before the rename
    let written = write_annotated(scorer, reader, &out_headers, text_idx, output_idx, &tmp_path)
        .with_context(|| format!("Failed to annotate {}", path.display()));
    let (rows, empty_texts, score_sum) = match written {
        Ok(counts) => counts,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    std::fs::rename(&tmp_path, &destination)
        .with_context(|| format!("Failed to move annotated file to {}", destination.display()))?;

    let stats = FileStats {
        path: path.display().to_string(),
        output_path: Some(destination.display().to_string()),
        rows,
        empty_texts,
        mean_sentiment: (rows > 0).then(|| score_sum / rows as f64),
        processing_time_ms: started.elapsed().as_millis() as u64,
        status: FileStatus::Success,
        error: None,
    };
    info!(
        "Annotated {}: {} rows ({} empty) in {}ms",
        path.display(),
        rows,
        empty_texts,
        stats.processing_time_ms
    );
    Ok(stats)
}

fn tmp_path_for(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    destination.with_file_name(name)
}

fn write_annotated<R: std::io::Read>(
    scorer: &SentimentScorer,
    mut reader: csv::Reader<R>,
    out_headers: &StringRecord,
    text_idx: usize,
    output_idx: usize,
    tmp_path: &Path,
) -> Result<(u64, u64, f64)> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(tmp_path)?;
    writer.write_record(out_headers)?;

    let mut record = StringRecord::new();
    let mut rows = 0u64;
    let mut empty_texts = 0u64;
    let mut score_sum = 0.0;

    while reader.read_record(&mut record)? {
        // Missing text scores as empty input
        let text = record.get(text_idx).unwrap_or("");
        if text.trim().is_empty() {
            empty_texts += 1;
        }
        let score = scorer.analyze(text).sentiment;
        score_sum += score;
        rows += 1;

        writer.write_record(&with_field(&record, output_idx, &format_score(score)))?;
    }

    writer.flush()?;
    Ok((rows, empty_texts, score_sum))
}

/// Copy of `record` with `value` at `idx`, padding short records with empty fields
fn with_field(record: &StringRecord, idx: usize, value: &str) -> StringRecord {
    let len = record.len().max(idx + 1);
    (0..len)
        .map(|i| if i == idx { value } else { record.get(i).unwrap_or("") })
        .collect()
}

/// Annotate many files, at most `config.max_concurrency` at a time
///
/// Results keep input order. Without `fail_fast` a failing file is recorded
/// and the run continues.
pub async fn annotate_files(
    scorer: Arc<SentimentScorer>,
    files: Vec<PathBuf>,
    config: AnnotateConfig,
    progress: ProgressBar,
) -> Result<RunStats> {
    let started = Instant::now();
    info!("Starting annotation of {} files", files.len());
    check_destinations(&files, &config)?;

    let config = Arc::new(config);
    let concurrency = config.max_concurrency.max(1);
    let mut results = stream::iter(files)
        .map(|path| {
            let scorer = Arc::clone(&scorer);
            let config = Arc::clone(&config);
            async move {
                let task_started = Instant::now();
                let task_path = path.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || annotate_file(&scorer, &task_path, &config)).await;
                (path, outcome, task_started.elapsed())
            }
        })
        .buffered(concurrency);

    let mut run = RunStats::default();
    while let Some((path, outcome, elapsed)) = results.next().await {
        progress.inc(1);
        let outcome = outcome.with_context(|| format!("Annotation task for {} panicked", path.display()))?;
        match outcome {
            Ok(stats) => run.record(stats),
            Err(e) => {
                if config.fail_fast {
                    progress.abandon();
                    return Err(e);
                }
                warn!("Failed to annotate {}: {:#}", path.display(), e);
                run.record(FileStats::failed(&path, &e, elapsed));
            }
        }
    }

    progress.finish();
    run.total_time_ms = started.elapsed().as_millis() as u64;
    info!(
        "Annotation completed: {} succeeded, {} skipped, {} failed, {} rows",
        run.files_succeeded, run.files_skipped, run.files_failed, run.rows_scored
    );
    Ok(run)
}
