use crate::dictionary::AcronymDictionary;
use std::fmt::Write as _;

// ---------------------------------------------------------------------------
// ToneTier
// ---------------------------------------------------------------------------

/// Opening line and signature used for replies up to `max_matches` acronyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneTier {
    /// Inclusive upper bound; `None` for the final, open-ended tier.
    pub max_matches: Option<usize>,
    pub opening: &'static str,
    pub footer: &'static str,
}

pub const TONE_TIERS: [ToneTier; 6] = [
    ToneTier {
        max_matches: Some(3),
        opening: "Hi! I detected a few acronyms in your comment:",
        footer: "^(I'm a bot that explains acronyms)",
    },
    ToneTier {
        max_matches: Some(5),
        opening: "Alright, let's decode this:",
        footer: "^(I'm a bot | Translating one comment at a time)",
    },
    ToneTier {
        max_matches: Some(7),
        opening: "Wow, someone loves their acronyms. Here's the translation:",
        footer: "^(I'm a bot | Because full words are too complicated to type out)",
    },
    ToneTier {
        max_matches: Some(9),
        opening: "Oh good, a comment that reads like military code. Let's decrypt this:",
        footer: "^(I'm a bot | My purpose is suffering through esoteric nonsense)",
    },
    ToneTier {
        max_matches: Some(11),
        opening: "*Deep breath* Okay. OKAY. Let's unpack this cryptic mess you've created:",
        footer: "^(I'm a bot | Someone please end my existence)",
    },
    ToneTier {
        max_matches: None,
        opening: "ARE YOU KIDDING ME RIGHT NOW? Did you just have a stroke on your keyboard or are you genuinely trying to communicate? Fine. FINE. Here's your dissertation translated:",
        footer: "^(I'm a bot | This is my villain origin story | You did this)",
    },
];

pub const SEPARATOR: &str = "---";

/// Pick the tier for `count` matched acronyms.
pub fn tier_for(count: usize) -> &'static ToneTier {
    TONE_TIERS
        .iter()
        .find(|t| t.max_matches.map_or(true, |max| count <= max))
        .unwrap_or(&TONE_TIERS[TONE_TIERS.len() - 1])
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render the reply for `matches`, one bullet per acronym in the given order.
///
/// Returns an empty string when nothing matched. An acronym absent from the
/// dictionary still gets a bullet, just without an explanation.
pub fn format_response(matches: &[String], dictionary: &AcronymDictionary) -> String {
    if matches.is_empty() {
        return String::new();
    }

    let tier = tier_for(matches.len());
    let mut out = String::new();
    out.push_str(tier.opening);
    out.push_str("\n\n");
    for acronym in matches {
        match dictionary.get(acronym) {
            Some(explanation) => {
                let _ = writeln!(out, "- **{acronym}** - {explanation}");
            }
            None => {
                let _ = writeln!(out, "- **{acronym}**");
            }
        }
    }
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(tier.footer);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
