use crate::dictionary::AcronymDictionary;
use crate::error::{BotError, Result};
use regex::Regex;
use std::collections::HashSet;

/// Characters that may directly follow an acronym and still end the token.
/// `+` and `%` are deliberately absent so "UW+" or "DEF%" never match.
const TRAILING_PUNCTUATION: &str = ".,!?;:)";

/// Finds known acronyms appearing as standalone tokens in comment text.
///
/// Patterns are compiled once per dictionary; `find` is then cheap to call
/// for every comment in a scan.
#[derive(Debug)]
pub struct AcronymMatcher {
    patterns: Vec<(String, Regex)>,
}

impl AcronymMatcher {
    pub fn new(dictionary: &AcronymDictionary) -> Result<Self> {
        let patterns = dictionary
            .iter()
            .map(|(key, _)| {
                token_pattern(key)
                    .map(|re| (key.to_string(), re))
                    .map_err(|source| BotError::Pattern {
                        key: key.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Return the dictionary keys found in `text`, in dictionary order, each
    /// at most once and in the dictionary's canonical case.
    pub fn find(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let upper = text.to_uppercase();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut found = Vec::new();
        for (key, re) in &self.patterns {
            if re.is_match(&upper) && seen.insert(key.as_str()) {
                found.push(key.clone());
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn token_pattern(key: &str) -> std::result::Result<Regex, regex::Error> {
    let pattern = format!(
        r"(?:^|\s){}(?:\s|[{}]|$)",
        regex::escape(&key.to_uppercase()),
        regex::escape(TRAILING_PUNCTUATION),
    );
    Regex::new(&pattern)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
