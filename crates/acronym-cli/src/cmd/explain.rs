use crate::output::print_json;
use acronym_core::{
    config::BotConfig, dictionary::AcronymDictionary, formatter::format_response,
    matcher::AcronymMatcher,
};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, text: &str, json: bool) -> anyhow::Result<()> {
    let config = BotConfig::load(root).context("failed to load acronym-bot.yaml")?;
    let dictionary = AcronymDictionary::load_or_empty(&config.acronyms_path(root));
    let matcher = AcronymMatcher::new(&dictionary)?;

    let matches = matcher.find(text);
    let would_reply = !matches.is_empty() && matches.len() >= config.min_acronyms;
    let reply = if would_reply {
        Some(format_response(&matches, &dictionary))
    } else {
        None
    };

    if json {
        #[derive(serde::Serialize)]
        struct ExplainOutput<'a> {
            matches: &'a [String],
            would_reply: bool,
            reply: Option<&'a str>,
        }

        return print_json(&ExplainOutput {
            matches: &matches,
            would_reply,
            reply: reply.as_deref(),
        });
    }

    if matches.is_empty() {
        println!("No known acronyms found.");
        return Ok(());
    }
    println!("Matched: {}", matches.join(", "));
    match reply {
        Some(reply) => println!("\n{reply}"),
        None => println!(
            "\nBelow the threshold of {} acronyms; no reply would be posted.",
            config.min_acronyms
        ),
    }
    Ok(())
}
