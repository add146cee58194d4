//! Prompt and display-message store. Trivial passthrough: every call reads
//! the file again, no caching, no invalidation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BotError, Result};

/// Read access to the bot's text resources by logical name.
pub trait ResourceStore: Send + Sync {
    /// System prompt text for the given name (`prompts/<name>.txt`).
    fn prompt(&self, name: &str) -> Result<String>;

    /// Display message text for the given name (`messages/<name>.txt`).
    fn message(&self, name: &str) -> Result<String>;

    /// Path of the image for the given name, probing png/jpg/jpeg, if any.
    fn image(&self, name: &str) -> Option<PathBuf>;
}

/// Filesystem-backed store rooted at a resources directory with `prompts/`,
/// `messages/`, and `images/` subdirectories.
pub struct FsResources {
    root: PathBuf,
}

impl FsResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            BotError::Resource(format!("cannot read {}: {}", path.display(), e))
        })
    }
}

impl ResourceStore for FsResources {
    fn prompt(&self, name: &str) -> Result<String> {
        self.read(&self.root.join("prompts").join(format!("{name}.txt")))
    }

    fn message(&self, name: &str) -> Result<String> {
        self.read(&self.root.join("messages").join(format!("{name}.txt")))
    }

    fn image(&self, name: &str) -> Option<PathBuf> {
        let base = self.root.join("images");
        for ext in ["png", "jpg", "jpeg"] {
            let candidate = base.join(format!("{name}.{ext}"));
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }
}
