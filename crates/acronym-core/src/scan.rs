use crate::dictionary::AcronymDictionary;
use crate::error::{FeedError, Result};
use crate::feed::{Comment, Feed};
use crate::formatter::format_response;
use crate::matcher::AcronymMatcher;
use crate::state::ReplyStateStore;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ScanOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Fewest distinct acronyms a comment needs before the bot replies.
    pub min_acronyms: usize,
    /// Bodies shorter than this many characters are skipped outright.
    pub min_body_chars: usize,
}

pub const DEFAULT_MIN_ACRONYMS: usize = 2;
pub const DEFAULT_MIN_BODY_CHARS: usize = 3;

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_acronyms: DEFAULT_MIN_ACRONYMS,
            min_body_chars: DEFAULT_MIN_BODY_CHARS,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-comment outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyReplied,
    OwnComment,
    AuthorMissing,
    TooShort,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::AlreadyReplied => "already replied",
            SkipReason::OwnComment => "own comment",
            SkipReason::AuthorMissing => "author missing",
            SkipReason::TooShort => "too short",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDecision {
    Skip(SkipReason),
    Examine,
}

#[derive(Debug)]
pub enum ReplyOutcome {
    Sent { acronyms: Vec<String> },
    BelowThreshold { found: usize },
    /// Posting failed; the comment stays unrecorded and the scan moves on.
    Failed(FeedError),
}

// ---------------------------------------------------------------------------
// ScanReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Every comment the feed yielded, skipped or not.
    pub examined: usize,
    pub skipped: usize,
    pub replies_sent: usize,
    pub reply_failures: usize,
}

// ---------------------------------------------------------------------------
// ScanOrchestrator
// ---------------------------------------------------------------------------

/// Runs one sweep over a feed: skip rules, matching, replying, and state
/// bookkeeping. Constructed once per invocation with its collaborators.
pub struct ScanOrchestrator<F: Feed> {
    feed: F,
    dictionary: AcronymDictionary,
    matcher: AcronymMatcher,
    store: ReplyStateStore,
    options: ScanOptions,
}

impl<F: Feed> ScanOrchestrator<F> {
    pub fn new(
        feed: F,
        dictionary: AcronymDictionary,
        store: ReplyStateStore,
        options: ScanOptions,
    ) -> Result<Self> {
        let matcher = AcronymMatcher::new(&dictionary)?;
        tracing::debug!(patterns = matcher.len(), "compiled acronym patterns");
        Ok(Self {
            feed,
            dictionary,
            matcher,
            store,
            options,
        })
    }

    /// Sweep up to `max_comments` recent comments in feed order.
    ///
    /// Failing to reach the feed (identity or listing) aborts the scan with
    /// an error. A failed reply only affects its own comment.
    pub fn scan(&mut self, max_comments: usize) -> Result<ScanReport> {
        let identity = self.feed.bot_identity()?;
        tracing::info!(bot = %identity, limit = max_comments, "starting scan");

        let comments = self.feed.recent_comments(max_comments)?;
        let mut report = ScanReport::default();

        for comment in comments.iter().take(max_comments) {
            report.examined += 1;

            if let CommentDecision::Skip(reason) = self.decide(comment, &identity) {
                tracing::debug!(comment_id = %comment.id, %reason, "skipping comment");
                report.skipped += 1;
                continue;
            }

            match self.attempt_reply(comment) {
                ReplyOutcome::Sent { acronyms } => {
                    tracing::info!(comment_id = %comment.id, ?acronyms, "replied to comment");
                    report.replies_sent += 1;
                }
                ReplyOutcome::BelowThreshold { found } => {
                    tracing::debug!(comment_id = %comment.id, found, "too few acronyms to reply");
                }
                ReplyOutcome::Failed(e) => {
                    tracing::error!(comment_id = %comment.id, error = %e, "failed to reply");
                    report.reply_failures += 1;
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            replied = report.replies_sent,
            "scan complete"
        );
        Ok(report)
    }

    /// Skip rules, checked in order; the first that applies wins.
    pub fn decide(&self, comment: &Comment, bot_identity: &str) -> CommentDecision {
        if self.store.contains(&comment.id) {
            return CommentDecision::Skip(SkipReason::AlreadyReplied);
        }
        match comment.author.as_deref() {
            Some(author) if author == bot_identity => CommentDecision::Skip(SkipReason::OwnComment),
            None => CommentDecision::Skip(SkipReason::AuthorMissing),
            Some(_) if comment.body.chars().count() < self.options.min_body_chars => {
                CommentDecision::Skip(SkipReason::TooShort)
            }
            Some(_) => CommentDecision::Examine,
        }
    }

    fn attempt_reply(&mut self, comment: &Comment) -> ReplyOutcome {
        let acronyms = self.matcher.find(&comment.body);
        if acronyms.is_empty() || acronyms.len() < self.options.min_acronyms {
            return ReplyOutcome::BelowThreshold {
                found: acronyms.len(),
            };
        }
        tracing::info!(comment_id = %comment.id, ?acronyms, "found acronyms");

        let response = format_response(&acronyms, &self.dictionary);
        if let Err(e) = self.feed.reply(&comment.id, &response) {
            return ReplyOutcome::Failed(e);
        }

        self.store.mark_replied(&comment.id);
        if let Err(e) = self.store.persist() {
            tracing::error!(
                path = %self.store.path().display(),
                error = %e,
                "could not save reply state; continuing with in-memory state"
            );
        }
        ReplyOutcome::Sent { acronyms }
    }

    pub fn store(&self) -> &ReplyStateStore {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
