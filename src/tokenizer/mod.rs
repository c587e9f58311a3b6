// WHY: Tokenizer pipeline: sentence split -> word split -> normalize
// Sentence boundaries are not retained past this stage

pub mod normalization;
pub mod sentence_split;
pub mod word_split;

pub use normalization::{is_punctuation, normalize_token, normalize_token_into};
pub use sentence_split::split_sentences;
pub use word_split::WordSplitter;

use crate::error::LoadError;

/// Produces the flat, order-preserving sequence of normalized tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    words: WordSplitter,
}

impl Tokenizer {
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self {
            words: WordSplitter::new()?,
        })
    }

    /// Tokenize arbitrary text; empty or punctuation-only input yields no tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();

        for sentence in split_sentences(text) {
            for raw in self.words.split(sentence) {
                normalize_token_into(raw, &mut buffer);
                if !buffer.is_empty() {
                    tokens.push(buffer.clone());
                }
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn test_tokenize_scenario_sentence() {
        let tokens = tokenizer().tokenize("Das ist gut und nicht schlecht");
        assert_eq!(tokens, vec!["das", "ist", "gut", "und", "nicht", "schlecht"]);
    }

    #[test]
    fn test_tokenize_multiple_sentences() {
        let text = "Die E-ID ist die beste Idee! Wir setzen uns für dieses gute Projekt ein.";
        let tokens = tokenizer().tokenize(text);
        assert_eq!(
            tokens,
            vec![
                "die", "eid", "ist", "die", "beste", "idee", "wir", "setzen", "uns", "für",
                "dieses", "gute", "projekt", "ein"
            ]
        );
    }

    #[test]
    fn test_tokenize_empty_and_punctuation_only() {
        assert!(tokenizer().tokenize("").is_empty());
        assert!(tokenizer().tokenize("   ").is_empty());
        assert!(tokenizer().tokenize("...!?!...").is_empty());
    }

    #[test]
    fn test_tokenize_newlines_and_quotes() {
        let tokens = tokenizer().tokenize("\u{201E}Nicht\u{201C}\ngeeignet,\r\ngar nicht durchdacht.");
        assert_eq!(tokens, vec!["nicht", "geeignet", "gar", "nicht", "durchdacht"]);
    }

    #[test]
    fn test_tokenize_contraction_split_is_normalized() {
        let tokens = tokenizer().tokenize("Don't stop, it's great.");
        assert_eq!(tokens, vec!["do", "nt", "stop", "it", "s", "great"]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let t = tokenizer();
        let text = "Gut. Schlecht? Na ja!";
        assert_eq!(t.tokenize(text), t.tokenize(text));
    }
}
