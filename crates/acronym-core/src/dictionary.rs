use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::Path;

// ---------------------------------------------------------------------------
// AcronymDictionary
// ---------------------------------------------------------------------------

/// Acronym → explanation mapping, kept in declaration order.
///
/// Matching and reply formatting both iterate in this order, so the order of
/// keys in `acronyms.json` is part of the bot's observable behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcronymDictionary {
    entries: IndexMap<String, String>,
}

impl AcronymDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(acronym, explanation)` pairs. A repeated acronym keeps its
    /// first position and takes the later explanation.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_entries(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    fn from_entries(mut entries: IndexMap<String, String>) -> Self {
        let before = entries.len();
        entries.retain(|acronym, _| !acronym.trim().is_empty());
        if entries.len() < before {
            tracing::warn!(dropped = before - entries.len(), "ignoring blank acronym keys");
        }
        Self { entries }
    }

    pub fn get(&self, acronym: &str) -> Option<&str> {
        self.entries.get(acronym).map(String::as_str)
    }

    pub fn contains(&self, acronym: &str) -> bool {
        self.entries.contains_key(acronym)
    }

    /// Iterate `(acronym, explanation)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Load the dictionary, degrading to an empty one if the file is missing
    /// or malformed. The failure is logged; the caller keeps running.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(dict) => {
                tracing::info!(count = dict.len(), path = %path.display(), "loaded acronyms");
                dict
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "could not load acronyms");
                Self::new()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AcronymDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IndexMap::deserialize(deserializer).map(Self::from_entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
