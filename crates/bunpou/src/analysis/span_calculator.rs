//! Span reconstruction
//!
//! Maps a run of matched tokens back to character offsets in the original sentence.
//! Offsets count `char`s, not bytes.
//!
//! The search is forward-only and picks the first occurrence at or after the cursor, so a
//! surface repeated earlier in the sentence than its real position can shift the span.
//! When a surface does not occur literally (elision, normalization by the analyzer), the
//! cursor advances by the surface length instead, so a span is always produced.

use crate::models::{Span, Token};

/// Computes the character span of `matched_indices` inside `sentence`
///
/// - `start`: first occurrence of the first matched surface; if absent, the summed lengths
///   of all preceding token surfaces
/// - `end`: cursor after walking every matched surface forward from `start`
///
/// An empty index list yields `{0, 0}`. Indices outside `tokens` are ignored.
pub fn compute_span(sentence: &str, tokens: &[Token], matched_indices: &[usize]) -> Span {
  let Some(first) = matched_indices.first().and_then(|&i| tokens.get(i).map(|t| (i, t))) else {
    return Span::default();
  };
  let (first_idx, first_token) = first;

  let start = find_chars(sentence, &first_token.surface, 0).unwrap_or_else(|| {
    tokens[..first_idx].iter().map(|t| char_len(&t.surface)).sum()
  });

  let mut end = start;
  for token in matched_indices.iter().filter_map(|&i| tokens.get(i)) {
    let len = char_len(&token.surface);
    end = match find_chars(sentence, &token.surface, end) {
      Some(pos) => pos + len,
      None => end + len,
    };
  }

  Span { start, end }
}

fn char_len(s: &str) -> usize {
  s.chars().count()
}

/// Character position of `needle` in `haystack`, searching from character `from`
fn find_chars(haystack: &str, needle: &str, from: usize) -> Option<usize> {
  let from_byte = char_to_byte(haystack, from)?;
  let byte_pos = from_byte + haystack[from_byte..].find(needle)?;

  Some(from + char_len(&haystack[from_byte..byte_pos]))
}

/// Byte offset of character `idx`; `None` past the end of the string
fn char_to_byte(s: &str, idx: usize) -> Option<usize> {
  s.char_indices().map(|(b, _)| b).chain(std::iter::once(s.len())).nth(idx)
}
