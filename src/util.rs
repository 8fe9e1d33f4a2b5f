//! Text decoding and whitespace normalization helpers.

use std::borrow::Cow;

/// Decode page bytes to a string.
///
/// Tries UTF-8 first (a BOM is handled by encoding_rs), then the hinted
/// encoding if one is known, and finally Windows-1252, which older wiki
/// exports occasionally use.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse runs of ASCII spaces to a single space. Other whitespace is kept.
pub fn collapse_spaces(text: &str) -> String {
    collapse_runs(text, ' ', 1)
}

/// Collapse runs of two or more newlines to exactly one blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    collapse_runs(text, '\n', 2)
}

/// Trim, then collapse blank-line runs and space runs.
pub fn clean_text(text: &str) -> String {
    collapse_spaces(&collapse_blank_lines(text.trim()))
}

/// Shorten every run of `ch` longer than `keep` to exactly `keep` characters.
fn collapse_runs(text: &str, ch: char, keep: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == ch {
            run += 1;
            if run > keep {
                continue;
            }
        } else {
            run = 0;
        }
        result.push(c);
    }
    result
}

/// Collapse runs of more than `max` consecutive `marker` strings to `max`.
pub fn collapse_repeated(text: &str, marker: &str, max: usize) -> String {
    if marker.is_empty() {
        return text.to_string();
    }
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    let mut run = 0;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(marker) {
            run += 1;
            if run <= max {
                result.push_str(marker);
            }
            rest = after;
        } else {
            run = 0;
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                result.push(c);
            }
            rest = chars.as_str();
        }
    }
    result
}
