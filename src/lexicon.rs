// WHY: Polarity lexicon with a precomputed surface-form index so scoring is
// O(tokens) instead of O(tokens x entries)

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::resources::WordList;

/// Discount applied to a match with a negation marker next to it
pub const NEGATION_FACTOR: f64 = -0.5;

/// One lexicon line: `lemma|lemma2<TAB>value[<TAB>infl1,infl2,...]`
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    /// Lowercase lemma parts from field 0
    pub lemmas: Vec<String>,
    /// Lowercase inflected forms from field 2
    pub inflections: Vec<String>,
    /// Polarity value from field 1
    pub value: f64,
}

impl LexiconEntry {
    pub fn new(lemmas: Vec<String>, inflections: Vec<String>, value: f64) -> Self {
        Self {
            lemmas,
            inflections,
            value,
        }
    }

    /// Parse a single lexicon line
    /// `line_no` is 1-based and only used for error reporting
    pub fn parse_line(line: &str, origin: &Path, line_no: usize) -> Result<Self, LoadError> {
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() < 2 {
            return Err(LoadError::MissingValue {
                path: origin.to_path_buf(),
                line: line_no,
                found: cells.len(),
            });
        }

        let raw_value = cells[1].trim();
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::InvalidValue {
                path: origin.to_path_buf(),
                line: line_no,
                value: raw_value.to_string(),
            })?;

        let lemmas = split_forms(cells[0], '|');
        let inflections = cells.get(2).map(|c| split_forms(c, ',')).unwrap_or_default();

        Ok(Self::new(lemmas, inflections, value))
    }

    /// Deduplicated union of lemma and inflection forms
    pub fn surface_forms(&self) -> HashSet<&str> {
        self.lemmas
            .iter()
            .chain(self.inflections.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn matches(&self, token: &str) -> bool {
        self.lemmas.iter().chain(self.inflections.iter()).any(|f| f == token)
    }
}

fn split_forms(field: &str, delimiter: char) -> Vec<String> {
    field
        .split(delimiter)
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Ordered lexicon entries plus a form -> values index
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    /// One value per entry containing the form, in entry order
    index: HashMap<String, Vec<f64>>,
}

impl Lexicon {
    pub fn new(entries: Vec<LexiconEntry>) -> Self {
        let mut index: HashMap<String, Vec<f64>> = HashMap::new();
        for entry in &entries {
            for form in entry.surface_forms() {
                index.entry(form.to_string()).or_default().push(entry.value);
            }
        }
        Self { entries, index }
    }

    /// Parse lexicon file content; any malformed line, blank ones included, is fatal
    pub fn parse(content: &str, origin: &Path) -> Result<Self, LoadError> {
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            entries.push(LexiconEntry::parse_line(line, origin, idx + 1)?);
        }

        let lexicon = Self::new(entries);
        debug!(
            "Parsed lexicon {}: {} entries, {} surface forms",
            origin.display(),
            lexicon.len(),
            lexicon.form_count()
        );
        Ok(lexicon)
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct surface forms across all entries
    pub fn form_count(&self) -> usize {
        self.index.len()
    }

    /// Values of every entry the token matches; empty when none
    pub fn values_for(&self, token: &str) -> &[f64] {
        self.index.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum the signed contribution of every lexicon match in `tokens`
    ///
    /// `tokens` must already be stopword-filtered: negation adjacency is
    /// checked on that filtered sequence. The result is unbounded.
    pub fn score(&self, tokens: &[String], negations: &WordList) -> f64 {
        let mut total = 0.0;
        for (idx, token) in tokens.iter().enumerate() {
            let values = self.values_for(token);
            if values.is_empty() {
                continue;
            }
            let factor = negation_factor(tokens, idx, negations);
            for value in values {
                total += value * factor;
            }
        }
        total
    }
}

/// Previous token is checked first; the next token only when the previous is not a negation
pub fn negation_factor(tokens: &[String], idx: usize, negations: &WordList) -> f64 {
    let prev_negated = idx > 0 && negations.contains(&tokens[idx - 1]);
    let next_negated = || tokens.get(idx + 1).is_some_and(|t| negations.contains(t));

    if prev_negated || next_negated() {
        NEGATION_FACTOR
    } else {
        1.0
    }
}
