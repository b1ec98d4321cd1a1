// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query normalization: free text in, one run of `[a-z]` out.
//!
//! Rendered dataset names have no spaces and no punctuation ("unitedkingdom"),
//! so queries are brought into the same shape before comparing:
//!
//! 1. Split on ASCII whitespace and parentheses.
//! 2. Drop whole-token stop-words (`the`, `of`, `and`) and strip a trailing
//!    `'s`. "thesaurus" keeps its "the"; only a token that *is* "the" goes.
//! 3. Keep ASCII letters, lowercased. Everything else disappears.
//!
//! A query made only of stop-words keeps them. Otherwise `normalize("the")`
//! would be empty and `normalize("t he") == "the"` would normalize differently
//! a second time.

/// Words that carry no identity in country names.
pub const STOP_WORDS: [&str; 3] = ["the", "of", "and"];

const POSSESSIVE: &[u8] = b"'s";

#[inline]
fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'(' || b == b')'
}

/// Byte ranges of the tokens in `s`.
fn tokens(s: &[u8]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, &b) in s.iter().enumerate() {
        match (is_delimiter(b), start) {
            (true, Some(st)) => {
                out.push((st, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        out.push((st, s.len()));
    }
    out
}

fn is_stop_word(token: &[u8]) -> bool {
    STOP_WORDS
        .iter()
        .any(|w| token.eq_ignore_ascii_case(w.as_bytes()))
}

/// Per-byte keep flags for `bytes`, plus the token spans they came from.
fn keep_mask(bytes: &[u8]) -> (Vec<bool>, Vec<(usize, usize)>) {
    let spans = tokens(bytes);
    let drop_stop_words = !spans
        .iter()
        .all(|&(start, end)| is_stop_word(&bytes[start..end]));

    let mut keep = vec![true; bytes.len()];
    for &(start, end) in &spans {
        let token = &bytes[start..end];
        if drop_stop_words && is_stop_word(token) {
            keep[start..end].fill(false);
        } else if token.len() >= POSSESSIVE.len()
            && token[token.len() - POSSESSIVE.len()..].eq_ignore_ascii_case(POSSESSIVE)
        {
            keep[end - POSSESSIVE.len()..end].fill(false);
        }
    }
    (keep, spans)
}

/// Normalize `buf` in place.
pub fn normalize_in_place(buf: &mut String) {
    let (keep, _) = keep_mask(buf.as_bytes());
    let mut pos = 0;
    buf.retain(|c| {
        let kept = keep[pos] && c.is_ascii_alphabetic();
        pos += c.len_utf8();
        kept
    });
    buf.make_ascii_lowercase();
}

/// The surviving tokens of a name, each normalized, empties dropped.
///
/// Dataset names are stored as token lists; concatenated they equal
/// `normalize(name)`, so rendered names compare directly against queries.
pub fn name_tokens(name: &str) -> Vec<String> {
    let bytes = name.as_bytes();
    let (keep, spans) = keep_mask(bytes);
    spans
        .into_iter()
        .map(|(start, end)| {
            (start..end)
                .filter(|&i| keep[i] && bytes[i].is_ascii_alphabetic())
                .map(|i| char::from(bytes[i].to_ascii_lowercase()))
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Normalize a query into the comparison alphabet.
pub fn normalize(query: &str) -> String {
    let mut buf = query.to_string();
    normalize_in_place(&mut buf);
    buf
}
