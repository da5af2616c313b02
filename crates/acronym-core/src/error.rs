use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("invalid acronym pattern for '{key}': {source}")]
    Pattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;

/// Failures reported by a comment feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("feed rejected request: {0}")]
    Api(String),

    #[error("could not decode feed response: {0}")]
    Decode(String),
}
