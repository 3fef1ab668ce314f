//! Sentence splitting over section content.
//!
//! Rule-based boundary detection: a terminator (`.` `!` `?`), optionally
//! followed by closing quotes or brackets, ends a sentence only when
//! whitespace and a sentence-opening character follow. Dotted abbreviations
//! ("et al.", "e.g.", "Fig. 3", initials) and decimal numbers never split.
//! Produced spans index into the document text and are trimmed, so a
//! sentence span never starts or ends on whitespace.

use crate::model::Span;

/// Lowercased words that take a trailing period without ending the sentence.
/// Single-letter words ("J." in "J. Smith", the parts of "e.g.") are always
/// treated as abbreviations and are not listed.
const ABBREVIATIONS: [&str; 12] = [
    "al", "cf", "dr", "eq", "eqs", "fig", "figs", "mr", "mrs", "ms", "sec", "vs",
];

/// Characters that may sit between a terminator and the following whitespace.
fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// Characters a new sentence can start with.
fn is_opener(c: char) -> bool {
    c.is_uppercase() || matches!(c, '(' | '[' | '"' | '\u{201c}' | '\u{2018}')
}

/// Split `text` into sentence spans, offset by `base` into the document
/// text. Empty and all-whitespace input produces no spans.
pub fn split_sentences(text: &str, base: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut sent_start = 0usize;

    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        // Terminator plus any closing quotes/brackets.
        let mut end = idx + c.len_utf8();
        while let Some((i, next)) = chars.peek().copied() {
            if is_closer(next) {
                end = i + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        if c == '.' && is_abbreviation(&text[..idx]) {
            continue;
        }
        if !is_boundary(&text[end..]) {
            continue;
        }

        push_trimmed(&mut spans, text, sent_start, end, base);
        sent_start = end;
    }

    push_trimmed(&mut spans, text, sent_start, text.len(), base);
    spans
}

/// After the terminator there must be whitespace, then a character a
/// sentence can open with. A decimal point or a mid-token period fails the
/// whitespace test; ". the" fails the opener test.
fn is_boundary(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => {}
        None => return true,
        _ => return false,
    }
    for c in chars {
        if c.is_whitespace() {
            continue;
        }
        return is_opener(c);
    }
    true
}

/// Whether the text ends in a dotted abbreviation (the period itself is not
/// included in `before`).
fn is_abbreviation(before: &str) -> bool {
    let word: String = before
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 {
        return true;
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

fn push_trimmed(spans: &mut Vec<Span>, text: &str, start: usize, end: usize, base: usize) {
    let slice = &text[start..end];
    let trimmed = slice.trim_start();
    let lead = slice.len() - trimmed.len();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        return;
    }
    let s = start + lead;
    spans.push(Span::new(base + s, base + s + trimmed.len()));
}
