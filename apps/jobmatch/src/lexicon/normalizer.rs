//! Text Normalizer: lower-cases and tokenizes resume / job text for lexicon lookup.
//!
//! Tokens keep `+` and `#` so that "C++" and "C#" stay distinct from "C", and a
//! dot that starts a word stays on it so ".NET" never reads as the word "net".
//! Everything else that is not alphanumeric separates tokens. Clause punctuation
//! (commas, semicolons, line breaks, bullets, sentence-ending dots) additionally
//! closes a segment: skill phrases are only ever matched inside one segment, so
//! "Machine, Learning" never reads as "machine learning".

/// Characters that end a clause. A `.` only ends one when followed by whitespace
/// or the end of input, which keeps "node.js" inside a single segment.
fn is_clause_break(c: char) -> bool {
    matches!(
        c,
        ',' | ';'
            | ':'
            | '\n'
            | '\r'
            | '|'
            | '•'
            | '·'
            | '▪'
            | '●'
            | '(' | ')'
            | '[' | ']'
            | '{' | '}'
            | '!' | '?'
            | '"'
    )
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Splits text into clause segments of normalized tokens.
///
/// Empty or punctuation-only input yields an empty vector.
pub fn normalize_segments(text: &str) -> Vec<Vec<String>> {
    let lower = text.to_lowercase();
    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut token = String::new();

    let mut chars = lower.chars().peekable();
    while let Some(c) = chars.next() {
        if is_token_char(c) {
            token.push(c);
            continue;
        }
        if c == '.' && token.is_empty() && chars.peek().map_or(false, |n| n.is_alphabetic()) {
            token.push(c);
            continue;
        }

        flush_token(&mut token, &mut current);

        let sentence_end = c == '.' && chars.peek().map_or(true, |n| n.is_whitespace());
        if sentence_end || is_clause_break(c) {
            flush_segment(&mut current, &mut segments);
        }
    }

    flush_token(&mut token, &mut current);
    flush_segment(&mut current, &mut segments);
    segments
}

/// Flat token stream over the whole text.
pub fn normalize(text: &str) -> Vec<String> {
    normalize_segments(text).into_iter().flatten().collect()
}

/// Normalized single-line key for a phrase, e.g. "Node.JS" → "node js".
pub fn normalize_phrase(phrase: &str) -> String {
    normalize(phrase).join(" ")
}

fn flush_token(token: &mut String, current: &mut Vec<String>) {
    if token.is_empty() {
        return;
    }
    // Markdown heading marks and stray plus signs lead; "c#" / "c++" trail.
    let trimmed = token.trim_start_matches(['#', '+']);
    if trimmed.chars().any(|c| c.is_alphanumeric()) {
        current.push(trimmed.to_string());
    }
    token.clear();
}

fn flush_segment(current: &mut Vec<String>, segments: &mut Vec<Vec<String>>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}
