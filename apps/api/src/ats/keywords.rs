//! Keyword extraction and matching.
//!
//! A job description is lower-cased, split on runs of whitespace, commas,
//! periods, and hyphens, filtered by minimum token length, then deduplicated
//! in first-seen order. Matching against the resume is a plain containment
//! check by default; `MatchMode::WordBoundary` is the stricter opt-in.

use std::collections::HashSet;

/// How a keyword is located inside the (lower-cased) resume text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Any occurrence counts, including inside longer words ("test" in "testable").
    #[default]
    Substring,
    /// The occurrence must not be flanked by alphanumeric characters.
    WordBoundary,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word_boundary" | "word-boundary" => Ok(MatchMode::WordBoundary),
            other => Err(format!(
                "unknown match mode '{other}' (expected 'substring' or 'word_boundary')"
            )),
        }
    }
}

/// Normalized, deduplicated keywords in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | '-')
}

/// Extracts the keyword set from a job description.
///
/// Tokens shorter than `min_len` characters are dropped. An empty result is
/// not an error here; the scorer decides what an empty set means.
pub fn extract_keywords(text: &str, min_len: usize) -> KeywordSet {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in lowered.split(is_separator) {
        if token.is_empty() || token.chars().count() < min_len {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
        }
    }

    KeywordSet(keywords)
}

/// Returns true if `keyword` occurs in `haystack` under the given mode.
/// Both arguments are expected to be lower-cased already.
pub fn contains_keyword(haystack: &str, keyword: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => haystack.contains(keyword),
        MatchMode::WordBoundary => {
            let Some(first_len) = keyword.chars().next().map(char::len_utf8) else {
                return false;
            };
            // Every start position is tried, so overlapping occurrences are not skipped.
            let mut from = 0;
            while let Some(offset) = haystack[from..].find(keyword) {
                let start = from + offset;
                if is_word_bounded(haystack, start, start + keyword.len()) {
                    return true;
                }
                from = start + first_len;
            }
            false
        }
    }
}

fn is_word_bounded(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
