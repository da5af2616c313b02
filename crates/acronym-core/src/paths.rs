use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "acronym-bot.yaml";
pub const ACRONYMS_FILE: &str = "acronyms.json";
pub const STATE_FILE: &str = "replied_comments.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured file against the bot root. Absolute paths are kept.
pub fn resolve(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/srv/bot");
        assert_eq!(config_path(root), PathBuf::from("/srv/bot/acronym-bot.yaml"));
        assert_eq!(
            resolve(root, Path::new(ACRONYMS_FILE)),
            PathBuf::from("/srv/bot/acronyms.json")
        );
        assert_eq!(
            resolve(root, Path::new("/var/lib/bot/state.json")),
            PathBuf::from("/var/lib/bot/state.json")
        );
    }
}
