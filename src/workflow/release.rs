//! Releases from GitHub REST API.

use std::fmt::{self, Display};

use serde::Deserialize;

/// Represents a release from GitHub REST API. Only the fields used for pruning are kept.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
}

impl Release {
    /// Checks if this release is published and points at `tag_name`.
    pub fn is_published_for(&self, tag_name: &str) -> bool {
        !self.draft && self.tag_name == tag_name
    }
}

impl Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag_name, self.id)?;
        if self.draft {
            f.write_str(" [draft]")?;
        }
        Ok(())
    }
}
