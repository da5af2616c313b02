use crate::output::{print_fields, print_json};
use acronym_core::{config::BotConfig, state::ReplyStateStore};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = BotConfig::load(root).context("failed to load acronym-bot.yaml")?;
    let store = ReplyStateStore::load(config.state_path(root));
    let state = store.state();

    if json {
        #[derive(serde::Serialize)]
        struct StateOutput<'a> {
            path: String,
            replied: usize,
            total_replies: u64,
            last_run: Option<chrono::DateTime<chrono::Utc>>,
            replied_ids: &'a std::collections::BTreeSet<String>,
        }

        return print_json(&StateOutput {
            path: store.path().display().to_string(),
            replied: store.len(),
            total_replies: state.total_replies,
            last_run: state.last_run,
            replied_ids: &state.replied_ids,
        });
    }

    let last_run = state
        .last_run
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    print_fields(&[
        ("State file", store.path().display().to_string()),
        ("Replied", store.len().to_string()),
        ("Total replies", state.total_replies.to_string()),
        ("Last run", last_run),
    ]);
    Ok(())
}
