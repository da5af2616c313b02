use crate::output::{print_fields, print_json};
use acronym_core::{
    config::BotConfig,
    dictionary::AcronymDictionary,
    reddit::{RedditCredentials, RedditFeed, RedditSettings},
    scan::ScanOrchestrator,
    state::ReplyStateStore,
    BotError,
};
use anyhow::Context;
use clap::Args;
use std::path::Path;

#[derive(Args, Default)]
pub struct RunArgs {
    /// Maximum number of recent comments to examine (default: scan_limit from config)
    #[arg(long)]
    limit: Option<usize>,

    /// Subreddit to sweep, overriding the config file
    #[arg(long, env = "SUBREDDIT_NAME")]
    subreddit: Option<String>,

    #[arg(long, env = "REDDIT_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    #[arg(long, env = "REDDIT_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, env = "REDDIT_AUTH_BASE", hide = true)]
    auth_base: Option<String>,

    #[arg(long, env = "REDDIT_API_BASE", hide = true)]
    api_base: Option<String>,
}

impl RunArgs {
    fn credentials(&self) -> Result<RedditCredentials, BotError> {
        fn required(value: &Option<String>, name: &'static str) -> Result<String, BotError> {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(BotError::MissingSetting(name))
        }
        Ok(RedditCredentials {
            client_id: required(&self.client_id, "REDDIT_CLIENT_ID")?,
            client_secret: required(&self.client_secret, "REDDIT_CLIENT_SECRET")?,
            username: required(&self.username, "REDDIT_USERNAME")?,
            password: required(&self.password, "REDDIT_PASSWORD")?,
        })
    }
}

pub fn run(root: &Path, args: RunArgs, json: bool) -> anyhow::Result<()> {
    let config = BotConfig::load(root).context("failed to load acronym-bot.yaml")?;

    let subreddit = args
        .subreddit
        .clone()
        .or_else(|| config.subreddit.clone())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(BotError::MissingSetting("subreddit (config or SUBREDDIT_NAME)"))?;
    let credentials = args.credentials()?;

    tracing::info!("acronym-bot starting");
    let dictionary = AcronymDictionary::load_or_empty(&config.acronyms_path(root));
    let store = ReplyStateStore::load(config.state_path(root));

    let mut settings = RedditSettings::new(&subreddit);
    settings.user_agent = config.user_agent.clone();
    if let Some(base) = args.auth_base.clone() {
        settings.auth_base = base;
    }
    if let Some(base) = args.api_base.clone() {
        settings.api_base = base;
    }

    let feed = RedditFeed::connect(&credentials, settings).context("failed to connect to reddit")?;
    let mut orchestrator = ScanOrchestrator::new(feed, dictionary, store, config.scan_options())?;

    let limit = args.limit.unwrap_or(config.scan_limit);
    let report = match orchestrator.scan(limit) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(subreddit = %subreddit, error = %e, "scan failed");
            return Err(e).with_context(|| format!("scan of r/{subreddit} failed"));
        }
    };
    tracing::info!(tracked = orchestrator.store().len(), "acronym-bot finished");

    if json {
        return print_json(&report);
    }
    print_fields(&[
        ("Subreddit", format!("r/{subreddit}")),
        ("Examined", report.examined.to_string()),
        ("Skipped", report.skipped.to_string()),
        ("Replied", report.replies_sent.to_string()),
        ("Failed", report.reply_failures.to_string()),
    ]);
    Ok(())
}
