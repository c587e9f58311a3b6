// WHY: Per-party descriptive statistics over annotated CSV exports

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Descriptive statistics of one party's sentiment scores
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartySummary {
    pub party: String,
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two scores
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p75: f64,
    pub max: f64,
}

/// Party name encoded in an export file name
///
/// `12_Junge_Gruene__cleaned.csv` -> `Junge_Gruene`, `SVP__cleaned.csv` -> `SVP`
pub fn infer_party(file_name: &str) -> String {
    let base = file_name
        .rfind(".csv")
        .map_or(file_name, |idx| &file_name[..idx]);
    let base = base.split("__").next().unwrap_or(base);

    match base.split_once('_') {
        Some((index, rest)) if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) => {
            rest.to_string()
        }
        _ => base.to_string(),
    }
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Summarize one party; `None` when there are no scores
pub fn describe(party: &str, values: &[f64]) -> Option<PartySummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    });

    Some(PartySummary {
        party: party.to_string(),
        n,
        mean,
        median: quantile(&sorted, 0.5),
        std,
        min: sorted[0],
        p25: quantile(&sorted, 0.25),
        p75: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    })
}

/// Numeric values of `column`; `Ok(None)` when the file lacks the column
///
/// Empty and non-numeric cells are left out of the count.
pub fn read_scores(path: &Path, column: &str) -> Result<Option<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV {}", path.display()))?;
    let Some(idx) = reader.headers()?.iter().position(|h| h == column) else {
        return Ok(None);
    };

    let mut values = Vec::new();
    let mut unparsable = 0usize;
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read record in {}", path.display()))?;
        if let Some(cell) = record.get(idx).map(str::trim).filter(|cell| !cell.is_empty()) {
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => unparsable += 1,
            }
        }
    }

    if unparsable > 0 {
        warn!("{}: ignored {} non-numeric {} cells", path.display(), unparsable, column);
    }
    debug!("Read {} scores from {}", values.len(), path.display());
    Ok(Some(values))
}

/// Group the files' scores by inferred party and summarize, highest mean first
pub fn summarize_files(files: &[PathBuf], column: &str) -> Result<Vec<PartySummary>> {
    let mut by_party: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for path in files {
        let Some(values) = read_scores(path, column)? else {
            warn!("Skipping {}: '{}' not found", path.display(), column);
            continue;
        };
        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        by_party
            .entry(infer_party(&file_name))
            .or_default()
            .extend(values);
    }

    let mut summaries: Vec<PartySummary> = by_party
        .iter()
        .filter_map(|(party, values)| describe(party, values))
        .collect();
    summaries.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.party.cmp(&b.party)));

    info!("Summarized {} parties from {} files", summaries.len(), files.len());
    Ok(summaries)
}

/// Fixed-width text table
pub fn render_table(summaries: &[PartySummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "party", "n", "mean", "median", "std", "min", "p25", "p75", "max"
    );
    for s in summaries {
        let std = s.std.map_or_else(|| "NaN".to_string(), |v| format!("{v:.4}"));
        let _ = writeln!(
            out,
            "{:<16} {:>6} {:>8.4} {:>8.4} {:>8} {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
            s.party, s.n, s.mean, s.median, std, s.min, s.p25, s.p75, s.max
        );
    }
    out
}
