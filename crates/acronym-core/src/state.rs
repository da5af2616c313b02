use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ReplyState
// ---------------------------------------------------------------------------

/// On-disk record of comments already replied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyState {
    #[serde(default)]
    pub replied_ids: BTreeSet<String>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    /// Size of `replied_ids` as of the last save.
    #[serde(default)]
    pub total_replies: u64,
}

// ---------------------------------------------------------------------------
// ReplyStateStore
// ---------------------------------------------------------------------------

/// Owns the reply state for one run and writes it back after every reply.
#[derive(Debug)]
pub struct ReplyStateStore {
    path: PathBuf,
    state: ReplyState,
}

impl ReplyStateStore {
    /// An empty store that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: ReplyState::default(),
        }
    }

    /// Load persisted state from `path`.
    ///
    /// A missing file is a fresh start. An unreadable or corrupt file is
    /// logged and also treated as a fresh start.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::read(&path) {
            Ok(Some(state)) => {
                tracing::info!(count = state.replied_ids.len(), "loaded replied comment ids");
                Self { path, state }
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "no reply state found, starting fresh");
                Self::empty(path)
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "could not read reply state, starting fresh"
                );
                Self::empty(path)
            }
        }
    }

    fn read(path: &Path) -> Result<Option<ReplyState>> {
        let Some(data) = crate::io::read_optional(path)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&data)?))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.replied_ids.contains(id)
    }

    /// Record `id` as replied to. Returns `false` if it was already recorded.
    pub fn mark_replied(&mut self, id: &str) -> bool {
        self.state.replied_ids.insert(id.to_string())
    }

    /// Write the full state, stamped with the current time, replacing the
    /// previous file atomically.
    pub fn persist(&mut self) -> Result<()> {
        self.state.last_run = Some(Utc::now());
        self.state.total_replies = self.state.replied_ids.len() as u64;
        let data = serde_json::to_string_pretty(&self.state)?;
        crate::io::atomic_write(&self.path, data.as_bytes())?;
        tracing::debug!(
            count = self.state.replied_ids.len(),
            total = self.state.total_replies,
            "saved reply state"
        );
        Ok(())
    }

    pub fn state(&self) -> &ReplyState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.state.replied_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.replied_ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
