//! Split an utterance into clause-level segments.
//!
//! Segments keep their byte offsets into the analyzed text so extracted
//! symptoms can be traced back to the clause that produced them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Statements with at most this many tokens are kept whole.
const SHORT_STATEMENT_TOKENS: usize = 5;
const MIN_FRAGMENT_CHARS: usize = 3;

const WHOLE_SHORT_CONFIDENCE: f32 = 0.9;
const FRAGMENT_CONFIDENCE: f32 = 0.8;
const FALLBACK_CONFIDENCE: f32 = 0.7;

/// Clause separators: sentence punctuation, commas, then joining words.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[.;!?,]|\b(?:as\s+well\s+as|along\s+with|and|with|plus|but)\b")
        .expect("Invalid segment separator regex pattern")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

impl Segment {
    fn new(source: &str, start: usize, end: usize, confidence: f32) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
            confidence,
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Segment `text`. Never empty for non-blank input.
pub fn segment(text: &str) -> Vec<Segment> {
    let Some((start, end)) = trimmed_bounds(text, 0, text.len()) else {
        return Vec::new();
    };

    if text.split_whitespace().count() <= SHORT_STATEMENT_TOKENS {
        return vec![Segment::new(text, start, end, WHOLE_SHORT_CONFIDENCE)];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for sep in SEPARATORS.find_iter(text) {
        push_fragment(text, cursor, sep.start(), &mut segments);
        cursor = sep.end();
    }
    push_fragment(text, cursor, text.len(), &mut segments);

    if segments.is_empty() {
        segments.push(Segment::new(text, start, end, FALLBACK_CONFIDENCE));
    }
    segments
}

/// Index of the segment containing `offset`, falling back to the nearest
/// segment that starts before it.
pub fn segment_index_for(segments: &[Segment], offset: usize) -> usize {
    segments
        .iter()
        .position(|s| s.contains(offset))
        .or_else(|| segments.iter().rposition(|s| s.start <= offset))
        .unwrap_or(0)
}

fn push_fragment(text: &str, from: usize, to: usize, out: &mut Vec<Segment>) {
    if let Some((start, end)) = trimmed_bounds(text, from, to) {
        if text[start..end].chars().count() >= MIN_FRAGMENT_CHARS {
            out.push(Segment::new(text, start, end, FRAGMENT_CONFIDENCE));
        }
    }
}

fn trimmed_bounds(text: &str, from: usize, to: usize) -> Option<(usize, usize)> {
    let slice = &text[from..to];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let start = from + leading;
    Some((start, start + trimmed.len()))
}
