pub mod annotate;
pub mod discovery;
pub mod error;
pub mod lexicon;
pub mod resources;
pub mod scorer;
pub mod summary;
pub mod tokenizer;

// Re-export the scoring surface for convenient access
pub use error::LoadError;
pub use lexicon::{Lexicon, LexiconEntry, NEGATION_FACTOR};
pub use resources::{NegationSet, ResourcePaths, Resources, StopwordSet, WordList};
pub use scorer::{aggregate, SentimentResult, SentimentScorer};
pub use tokenizer::Tokenizer;

// Re-export batch processing types
pub use annotate::{annotate_file, annotate_files, AnnotateConfig, FileStats, FileStatus, RunStats};
pub use summary::{infer_party, summarize_files, PartySummary};
