use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Configuration for CSV discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Descend into subdirectories instead of scanning only the top level
    pub recursive: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Discovers `*.csv` files under the given root directory (`**/*.csv` when recursive).
/// Returns an async stream of validated file paths in glob (alphabetical) order.
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        }
    )
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    fn pattern(&self) -> String {
        // WHY: glob metacharacters in the root itself must not be interpreted
        let root = glob::Pattern::escape(&self.root_dir.to_string_lossy());
        if self.config.recursive {
            format!("{root}/**/*.csv")
        } else {
            format!("{root}/*.csv")
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.glob_iter.is_none() {
            let pattern = self.pattern();
            debug!("Starting CSV discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("CSV discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        loop {
            let next = self.glob_iter.as_mut()?.next();
            match next {
                Some(Ok(path)) => {
                    debug!("Found file: {}", path.display());
                    return Some(self.validate_file(path).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                    // Continue to next file on non-fatal glob errors
                }
                None => {
                    info!("CSV discovery completed");
                    return None;
                }
            }
        }
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
            Ok(_) => {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                Ok(FileValidation { path, error: Some(error) })
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);

                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(FileValidation { path, error: Some(error) })
                }
            }
        }
    }
}

/// Collect all discovered files into a Vec for easier processing
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }

    info!("CSV discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Convenience function returning only the paths of valid CSV files
pub async fn find_csv_files<P: AsRef<Path>>(root_dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let config = DiscoveryConfig { fail_fast: false, recursive };
    let validations = collect_discovered_files(root_dir, config).await?;

    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}
