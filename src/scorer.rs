// WHY: Explicit scorer handle owning its loaded resources, so several
// independently configured scorers can live in one process without globals

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::resources::{ResourcePaths, Resources};
use crate::tokenizer::Tokenizer;

/// Bounded sentiment of one text, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: f64,
}

/// Rule-based lexicon scorer; `Send + Sync`, share it behind an `Arc`
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    tokenizer: Tokenizer,
    resources: Resources,
}

impl SentimentScorer {
    /// Load all resources from disk and build the scorer
    pub fn load(paths: &ResourcePaths) -> Result<Self, LoadError> {
        Self::from_resources(Resources::load(paths)?)
    }

    pub async fn load_async(paths: &ResourcePaths) -> Result<Self, LoadError> {
        Self::from_resources(Resources::load_async(paths).await?)
    }

    /// Build from resources already in memory
    pub fn from_resources(resources: Resources) -> Result<Self, LoadError> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            resources,
        })
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Tokenized text with stopwords removed: the sequence both lexicon passes see
    pub fn filtered_tokens(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        self.resources.stopwords.filter(tokens)
    }

    /// Unbounded total of the positive lexicon pass
    pub fn positive_sentiment(&self, text: &str) -> f64 {
        let tokens = self.filtered_tokens(text);
        self.resources.positive.score(&tokens, &self.resources.negations)
    }

    /// Unbounded total of the negative lexicon pass
    pub fn negative_sentiment(&self, text: &str) -> f64 {
        let tokens = self.filtered_tokens(text);
        self.resources.negative.score(&tokens, &self.resources.negations)
    }

    /// Score one text; empty input yields 0.0
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = self.filtered_tokens(text);
        let negations = &self.resources.negations;
        let positive_total = self.resources.positive.score(&tokens, negations);
        let negative_total = self.resources.negative.score(&tokens, negations);

        SentimentResult {
            sentiment: aggregate(positive_total, negative_total),
        }
    }
}

/// Round the summed passes to two decimals, then clamp to [-1.0, 1.0]
pub fn aggregate(positive_total: f64, negative_total: f64) -> f64 {
    let raw = round2(positive_total + negative_total);
    let clamped = raw.clamp(-1.0, 1.0);
    // -0.0 from rounding a tiny negative sum reads as 0.0
    if clamped == 0.0 {
        0.0
    } else {
        clamped
    }
}

/// Two-decimal rounding on the exact stored value; binary ties go to the even digit
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
