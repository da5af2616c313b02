use crate::error::Result;
use crate::paths;
use crate::scan::{ScanOptions, DEFAULT_MIN_ACRONYMS, DEFAULT_MIN_BODY_CHARS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// BotConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Subreddit to sweep, without the `r/` prefix.
    pub subreddit: Option<String>,
    pub scan_limit: usize,
    pub min_acronyms: usize,
    pub min_body_chars: usize,
    pub acronyms_file: PathBuf,
    pub state_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

pub const DEFAULT_SCAN_LIMIT: usize = 100;

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            subreddit: None,
            scan_limit: DEFAULT_SCAN_LIMIT,
            min_acronyms: DEFAULT_MIN_ACRONYMS,
            min_body_chars: DEFAULT_MIN_BODY_CHARS,
            acronyms_file: PathBuf::from(paths::ACRONYMS_FILE),
            state_file: PathBuf::from(paths::STATE_FILE),
            user_agent: None,
        }
    }
}

impl BotConfig {
    /// Load `acronym-bot.yaml` from `root`, or defaults if there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        match crate::io::read_optional(&path)? {
            Some(data) => Ok(serde_yaml::from_str(&data)?),
            None => Ok(Self::default()),
        }
    }

    pub fn acronyms_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.acronyms_file)
    }

    pub fn state_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.state_file)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            min_acronyms: self.min_acronyms,
            min_body_chars: self.min_body_chars,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        match self.subreddit.as_deref().map(str::trim) {
            None | Some("") => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "subreddit is not set (use 'subreddit' or SUBREDDIT_NAME)".to_string(),
            }),
            Some(s) if s.starts_with("r/") => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("subreddit '{s}' should not include the 'r/' prefix"),
            }),
            Some(_) => {}
        }

        if self.scan_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "scan_limit is 0: no comments will be examined".to_string(),
            });
        }

        if self.min_acronyms < 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "min_acronyms must be at least 1".to_string(),
            });
        } else if self.min_acronyms == 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "min_acronyms is 1: every casual abbreviation gets a reply".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
