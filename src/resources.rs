// WHY: One-time loading of stopwords, negation markers and both polarity
// lexicons; everything returned here is read-only for the scorer's lifetime

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::LoadError;
use crate::lexicon::Lexicon;

/// Default resource file names inside a data directory
pub const STOPWORDS_FILE: &str = "stopWords.txt";
pub const NEGATIONS_FILE: &str = "negationswoerter.txt";
pub const POSITIVE_LEXICON_FILE: &str = "SentiWS_v2.0_Positive.txt";
pub const NEGATIVE_LEXICON_FILE: &str = "SentiWS_v2.0_Negative.txt";

/// Immutable set of lowercase words (stopwords or negation markers)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

pub type StopwordSet = WordList;
pub type NegationSet = WordList;

impl WordList {
    /// Parse one word per line; lines are trimmed and lowercased, blanks skipped
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keep tokens that are not in this list, preserving order
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| !self.contains(t)).collect()
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_lowercase).collect(),
        }
    }
}

/// Locations of the four resource files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    pub stopwords: PathBuf,
    pub negations: PathBuf,
    pub positive_lexicon: PathBuf,
    pub negative_lexicon: PathBuf,
}

impl ResourcePaths {
    /// Default file names resolved against `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            stopwords: dir.join(STOPWORDS_FILE),
            negations: dir.join(NEGATIONS_FILE),
            positive_lexicon: dir.join(POSITIVE_LEXICON_FILE),
            negative_lexicon: dir.join(NEGATIVE_LEXICON_FILE),
        }
    }
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

/// Everything the scorer reads during `analyze`
#[derive(Debug, Clone, Default)]
pub struct Resources {
    pub stopwords: StopwordSet,
    pub negations: NegationSet,
    pub positive: Lexicon,
    pub negative: Lexicon,
}

impl Resources {
    /// Blocking load of all four resources; the first failure aborts
    pub fn load(paths: &ResourcePaths) -> Result<Self, LoadError> {
        info!("Loading sentiment resources");
        let stopwords = WordList::parse(&read_resource(&paths.stopwords)?);
        let negations = WordList::parse(&read_resource(&paths.negations)?);
        let positive = Lexicon::parse(&read_resource(&paths.positive_lexicon)?, &paths.positive_lexicon)?;
        let negative = Lexicon::parse(&read_resource(&paths.negative_lexicon)?, &paths.negative_lexicon)?;

        let resources = Self {
            stopwords,
            negations,
            positive,
            negative,
        };
        resources.log_summary();
        Ok(resources)
    }

    /// Async variant for callers already inside a tokio runtime
    pub async fn load_async(paths: &ResourcePaths) -> Result<Self, LoadError> {
        info!("Loading sentiment resources (async)");
        let (stopwords, negations, positive, negative) = tokio::try_join!(
            read_resource_async(&paths.stopwords),
            read_resource_async(&paths.negations),
            read_resource_async(&paths.positive_lexicon),
            read_resource_async(&paths.negative_lexicon),
        )?;

        let resources = Self {
            stopwords: WordList::parse(&stopwords),
            negations: WordList::parse(&negations),
            positive: Lexicon::parse(&positive, &paths.positive_lexicon)?,
            negative: Lexicon::parse(&negative, &paths.negative_lexicon)?,
        };
        resources.log_summary();
        Ok(resources)
    }

    fn log_summary(&self) {
        info!(
            stopwords = self.stopwords.len(),
            negations = self.negations.len(),
            positive_entries = self.positive.len(),
            negative_entries = self.negative.len(),
            "Sentiment resources loaded"
        );
    }
}

fn read_resource(path: &Path) -> Result<String, LoadError> {
    debug!("Reading resource: {}", path.display());
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn read_resource_async(path: &Path) -> Result<String, LoadError> {
    debug!("Reading resource: {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_resources(dir: &Path, positive: &str) -> ResourcePaths {
        let paths = ResourcePaths::in_dir(dir);
        std::fs::write(&paths.stopwords, "Und\n\n  der \n").unwrap();
        std::fs::write(&paths.negations, "nicht\nKEIN\n").unwrap();
        std::fs::write(&paths.positive_lexicon, positive).unwrap();
        std::fs::write(&paths.negative_lexicon, "schlecht\t-1.0\n").unwrap();
        paths
    }

    #[test]
    fn test_word_list_parse() {
        let list = WordList::parse("Und\n\n  der \r\nnicht\n");
        assert_eq!(list.len(), 3);
        assert!(list.contains("und"));
        assert!(list.contains("der"));
        assert!(!list.contains("Und"));
    }

    #[test]
    fn test_word_list_filter_preserves_order() {
        let list: WordList = ["das", "und"].into_iter().collect();
        let tokens = vec!["das", "ist", "gut", "und", "das"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(list.filter(tokens), vec!["ist", "gut"]);
        assert!(list.filter(Vec::new()).is_empty());
    }

    #[test]
    fn test_default_paths() {
        let paths = ResourcePaths::default();
        assert_eq!(paths.stopwords, PathBuf::from("data").join(STOPWORDS_FILE));
        assert_eq!(paths.negative_lexicon, PathBuf::from("data").join(NEGATIVE_LEXICON_FILE));
    }

    #[test]
    fn test_load_all_resources() {
        let temp_dir = TempDir::new().unwrap();
        let paths = write_resources(temp_dir.path(), "gut\t1.0\tgute\n");

        let resources = Resources::load(&paths).unwrap();
        assert_eq!(resources.stopwords.len(), 2);
        assert!(resources.negations.contains("kein"));
        assert_eq!(resources.positive.len(), 1);
        assert_eq!(resources.negative.values_for("schlecht"), &[-1.0]);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = write_resources(temp_dir.path(), "gut\t1.0\n");
        std::fs::remove_file(&paths.negations).unwrap();

        let err = Resources::load(&paths).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.path(), Some(paths.negations.as_path()));
        assert!(err.to_string().contains(NEGATIONS_FILE));
    }

    #[test]
    fn test_load_malformed_lexicon_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = write_resources(temp_dir.path(), "gut\t1.0\nbroken line\n");

        let err = Resources::load(&paths).unwrap_err();
        assert_eq!(err.path(), Some(paths.positive_lexicon.as_path()));
        assert_eq!(err.line(), Some(2));
    }

    #[tokio::test]
    async fn test_load_async_matches_sync() {
        let temp_dir = TempDir::new().unwrap();
        let paths = write_resources(temp_dir.path(), "gut\t1.0\tgute\n");

        let sync = Resources::load(&paths).unwrap();
        let async_loaded = Resources::load_async(&paths).await.unwrap();
        assert_eq!(sync.stopwords, async_loaded.stopwords);
        assert_eq!(sync.negations, async_loaded.negations);
        assert_eq!(sync.positive.entries(), async_loaded.positive.entries());
    }
}
