// WHY: standalone token normalization so the word splitter and the lexicon
// loader agree on what a surface form looks like

/// Non-ASCII punctuation removed alongside ASCII punctuation
/// Covers the quote, dash and ellipsis forms common in German captions
pub const UNICODE_PUNCTUATION: &[char] = &[
    '\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', // “ ” „ ‟
    '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', // ‘ ’ ‚ ‛
    '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}', // « » ‹ ›
    '\u{2013}', '\u{2014}', '\u{2015}', '\u{2026}', // – — ― …
    '\u{00A1}', '\u{00BF}', '\u{00B7}', '\u{2022}', // ¡ ¿ · •
];

/// True for any character stripped during normalization
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || UNICODE_PUNCTUATION.contains(&ch)
}

/// Strip punctuation and lowercase a raw word token
/// Returns an empty string when nothing but punctuation remains
pub fn normalize_token(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    normalize_token_into(raw, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
pub fn normalize_token_into(raw: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(raw.len());

    for ch in raw.chars().filter(|&ch| !is_punctuation(ch)) {
        // WHY: to_lowercase may expand to several chars (e.g. 'İ')
        buffer.extend(ch.to_lowercase());
    }
}
