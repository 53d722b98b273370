//! Text preflight: canonicalize the raw input and decide whether it is worth
//! sending to the external normalizer.
//!
//! Most statements are plain enough to analyze directly; normalization is
//! requested only for text showing shorthand, letter elongation ("sooo") or
//! heavy non-alphabetic noise.

/// Chat shorthand that the pattern library does not understand.
const SHORTHAND_TOKENS: &[&str] = &[
    "u", "ur", "r", "rly", "idk", "bc", "b/c", "w/", "w/o", "thx", "tmrw", "2day", "2nite",
    "smth", "sth", "pls", "plz", "cuz", "coz", "abt", "hrt", "hed",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Preflight {
    /// Input with typographic quotes straightened and whitespace collapsed.
    pub text: String,
    pub needs_normalization: bool,
}

pub fn preflight(raw: &str) -> Preflight {
    let text = canonicalize(raw);
    let needs_normalization = needs_normalization(&text);
    Preflight {
        text,
        needs_normalization,
    }
}

/// Straighten curly quotes and collapse runs of whitespace.
pub fn canonicalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
                    '\u{201C}' | '\u{201D}' => '"',
                    other => other,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn needs_normalization(text: &str) -> bool {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.len() < 3 {
        return false;
    }

    if tokens.iter().any(|t| SHORTHAND_TOKENS.contains(&t.as_str())) {
        return true;
    }

    if tokens.iter().any(|t| has_elongation(t)) {
        return true;
    }

    let alphabetic = tokens
        .iter()
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .count();
    alphabetic * 2 < tokens.len()
}

/// Three or more identical letters in a row.
fn has_elongation(token: &str) -> bool {
    let mut run = 1;
    let mut prev: Option<char> = None;
    for c in token.chars() {
        if Some(c) == prev && c.is_alphabetic() {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 1;
        }
        prev = Some(c);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_statement_skips_normalization() {
        let p = preflight("I have a mild headache since yesterday");
        assert!(!p.needs_normalization);
        assert_eq!(p.text, "I have a mild headache since yesterday");
    }

    #[test]
    fn shorthand_requests_normalization() {
        assert!(preflight("my hed hurts rly bad").needs_normalization);
        assert!(preflight("idk what is wrong w/ me").needs_normalization);
    }

    #[test]
    fn elongated_words_request_normalization() {
        assert!(preflight("i am sooo tired today").needs_normalization);
        assert!(!preflight("I feel sleepy all week").needs_normalization);
    }

    #[test]
    fn very_short_input_never_requests_normalization() {
        assert!(!preflight("sooo bad").needs_normalization);
    }

    #[test]
    fn canonicalize_straightens_quotes_and_whitespace() {
        assert_eq!(canonicalize("  I can\u{2019}t   sleep \n"), "I can't sleep");
    }
}
