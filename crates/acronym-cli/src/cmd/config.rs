use crate::output::print_json;
use acronym_core::config::{BotConfig, WarnLevel};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate {
        /// Subreddit override, as `run` would apply it
        #[arg(long, env = "SUBREDDIT_NAME")]
        subreddit: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate { subreddit } => validate(root, subreddit, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = BotConfig::load(root).context("failed to load acronym-bot.yaml")?;
    if json {
        return print_json(&config);
    }
    println!("subreddit:      {}", config.subreddit.as_deref().unwrap_or("(not set)"));
    println!("scan_limit:     {}", config.scan_limit);
    println!("min_acronyms:   {}", config.min_acronyms);
    println!("min_body_chars: {}", config.min_body_chars);
    println!("acronyms_file:  {}", config.acronyms_path(root).display());
    println!("state_file:     {}", config.state_path(root).display());
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, subreddit: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut config = BotConfig::load(root).context("failed to load acronym-bot.yaml")?;
    if subreddit.is_some() {
        config.subreddit = subreddit;
    }
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
