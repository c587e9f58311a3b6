// WHY: minimal sentence splitter that needs no trained model or abbreviation list

/// Characters that close a sentence
pub const END_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Split text into trimmed sentences, each keeping its terminal punctuation
///
/// Every '.', '!' or '?' closes the current sentence, so "U.S.A." yields three
/// sentences. Whitespace-only sentences are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (byte_pos, ch) in text.char_indices() {
        if END_PUNCTUATION.contains(&ch) {
            let end = byte_pos + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    // Flush trailing buffer without terminal punctuation
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, raw: &'a str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
