// WHY: Treebank-style word splitting: punctuation becomes its own token,
// clitics are split off, hyphenated words stay whole while "--" is a token

use regex_automata::meta::Regex;

use crate::error::LoadError;

/// English clitics split from the end of a word ("don't" -> "do" "n't")
const CLITIC_PATTERN: &str = r"(?i)(?:n['’]t|['’](?:s|m|d|ll|re|ve))$";

/// Characters always emitted as standalone tokens
pub const SEPARATORS: &[char] = &[
    '?', '!', ';', '@', '#', '$', '%', '&', '(', ')', '[', ']', '{', '}', '<', '>', '"', '`', '.',
    '\u{201C}', '\u{201D}', '\u{201E}', '\u{2018}', '\u{201A}', '\u{00AB}', '\u{00BB}', '\u{2039}',
    '\u{203A}', '\u{2013}', '\u{2014}', '\u{2026}',
];

/// Word splitter holding the compiled clitic pattern
#[derive(Debug, Clone)]
pub struct WordSplitter {
    clitic: Regex,
}

impl WordSplitter {
    pub fn new() -> Result<Self, LoadError> {
        let clitic = Regex::new(CLITIC_PATTERN)?;
        Ok(Self { clitic })
    }

    /// Split one sentence into raw word tokens, preserving order
    pub fn split<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;
        let mut chars = sentence.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            let next = chars.peek().map(|&(_, c)| c);
            let mut width = ch.len_utf8();

            let separate = if ch.is_whitespace() {
                None
            } else if ch == '-' && next == Some('-') {
                chars.next();
                width += 1;
                Some(true)
            } else if SEPARATORS.contains(&ch) {
                Some(true)
            } else if ch == ',' || ch == ':' {
                // Followed by a digit stays attached: "1,5", "10:30", "Preis:100"
                Some(!next.is_some_and(|n| n.is_ascii_digit()))
            } else {
                Some(false)
            };

            match separate {
                None => {
                    if let Some(start) = word_start.take() {
                        self.push_word(&mut tokens, &sentence[start..pos]);
                    }
                }
                Some(true) => {
                    if let Some(start) = word_start.take() {
                        self.push_word(&mut tokens, &sentence[start..pos]);
                    }
                    tokens.push(&sentence[pos..pos + width]);
                }
                Some(false) => {
                    word_start.get_or_insert(pos);
                }
            }
        }

        if let Some(start) = word_start {
            self.push_word(&mut tokens, &sentence[start..]);
        }
        tokens
    }

    fn push_word<'a>(&self, tokens: &mut Vec<&'a str>, word: &'a str) {
        // Bare trailing apostrophe ("Leuts'") is its own token
        if let Some(stem) = word.strip_suffix(|c: char| c == '\'' || c == '’') {
            if !stem.is_empty() {
                self.push_word(tokens, stem);
                tokens.push(&word[stem.len()..]);
                return;
            }
        }

        match self.clitic.find(word) {
            Some(m) if m.start() > 0 => {
                tokens.push(&word[..m.start()]);
                tokens.push(&word[m.start()..]);
            }
            _ => tokens.push(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> WordSplitter {
        WordSplitter::new().unwrap()
    }

    #[test]
    fn test_split_trailing_punctuation() {
        let tokens = splitter().split("Das ist gut.");
        assert_eq!(tokens, vec!["Das", "ist", "gut", "."]);
    }

    #[test]
    fn test_split_keeps_hyphenated_words() {
        let tokens = splitter().split("Die E-ID kommt!");
        assert_eq!(tokens, vec!["Die", "E-ID", "kommt", "!"]);
    }

    #[test]
    fn test_split_commas_and_numbers() {
        let tokens = splitter().split("gut, besser, 1,5 Punkte um 10:30");
        assert_eq!(tokens, vec!["gut", ",", "besser", ",", "1,5", "Punkte", "um", "10:30"]);
    }

    #[test]
    fn test_split_comma_and_colon_before_digit_stay_attached() {
        let tokens = splitter().split("Preis:100 und Stand,3 aber Ende:");
        assert_eq!(tokens, vec!["Preis:100", "und", "Stand,3", "aber", "Ende", ":"]);

        let tokens = splitter().split("Preis: 100");
        assert_eq!(tokens, vec!["Preis", ":", "100"]);
    }

    #[test]
    fn test_split_double_dash() {
        let tokens = splitter().split("gut--schlecht");
        assert_eq!(tokens, vec!["gut", "--", "schlecht"]);

        let tokens = splitter().split("a---b");
        assert_eq!(tokens, vec!["a", "--", "-b"]);

        let tokens = splitter().split("E-ID -- ja");
        assert_eq!(tokens, vec!["E-ID", "--", "ja"]);
    }

    #[test]
    fn test_split_quotes_and_brackets() {
        let tokens = splitter().split("\"Nein\" (sagen wir)");
        assert_eq!(tokens, vec!["\"", "Nein", "\"", "(", "sagen", "wir", ")"]);

        let tokens = splitter().split("\u{201E}Ja\u{201C}");
        assert_eq!(tokens, vec!["\u{201E}", "Ja", "\u{201C}"]);
    }

    #[test]
    fn test_split_clitics() {
        let tokens = splitter().split("don't we'll it's");
        assert_eq!(tokens, vec!["do", "n't", "we", "'ll", "it", "'s"]);
    }

    #[test]
    fn test_split_bare_apostrophe_and_lone_clitic() {
        let tokens = splitter().split("Leuts' 's");
        assert_eq!(tokens, vec!["Leuts", "'", "'s"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(splitter().split("").is_empty());
        assert!(splitter().split("  \n ").is_empty());
    }
}
