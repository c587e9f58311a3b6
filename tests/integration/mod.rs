// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use caption_sentiment::{ResourcePaths, SentimentScorer};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for temporary data directories and CSV exports
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a file with given content, creating parent directories as needed
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write the four resource files into `data/` and return their paths
    pub fn create_resources(
        &self,
        stopwords: &str,
        negations: &str,
        positive: &str,
        negative: &str,
    ) -> ResourcePaths {
        let data_dir = self.root_path.join("data");
        let paths = ResourcePaths::in_dir(&data_dir);
        fs::create_dir_all(&data_dir).expect("Failed to create data directory");
        fs::write(&paths.stopwords, stopwords).expect("Failed to write stopwords");
        fs::write(&paths.negations, negations).expect("Failed to write negations");
        fs::write(&paths.positive_lexicon, positive).expect("Failed to write positive lexicon");
        fs::write(&paths.negative_lexicon, negative).expect("Failed to write negative lexicon");
        paths
    }

    /// Resources from the German sample fixtures
    pub fn create_sample_resources(&self) -> ResourcePaths {
        self.create_resources(
            fixtures::STOPWORDS,
            fixtures::NEGATIONS,
            fixtures::POSITIVE_LEXICON,
            fixtures::NEGATIVE_LEXICON,
        )
    }

    /// Scorer loaded from the German sample fixtures
    pub fn sample_scorer(&self) -> SentimentScorer {
        SentimentScorer::load(&self.create_sample_resources()).expect("Failed to load sample scorer")
    }

    /// Create an export CSV under `exports/`
    pub fn create_export(&self, name: &str, content: &str) -> PathBuf {
        self.create_file(Path::new("exports").join(name), content)
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.root_path.join("exports")
    }
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines",
            context, expected_lines.len(), actual_lines.len()
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context, i + 1, expected_line, actual_line
            );
        }
    }
}
