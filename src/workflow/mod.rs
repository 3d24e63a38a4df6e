//! Data models of a single tag deletion run.

use std::fmt::{self, Debug, Display};

pub mod release;

/// A GitHub token. Never printed by [`Debug`] or [`Display`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token.
    pub fn new<S>(token: S) -> Self
    where
        S: Into<String>,
    {
        Self(token.into())
    }

    /// Returns the raw token, for authenticating requests only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Checks if no token was given at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// A repository qualified by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRepo {
    /// The user or organization owning the repository.
    pub owner: String,
    /// The repository name.
    pub repo: String,
}

impl QualifiedRepo {
    /// Creates a [`QualifiedRepo`].
    pub fn new<O, R>(owner: O, repo: R) -> Self
    where
        O: Into<String>,
        R: Into<String>,
    {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Splits `owner/repo` into its two leading segments. Segments after the second are ignored.
    ///
    /// Returns the owner and the repository name, each [`None`] if empty.
    pub fn split(value: &str) -> (Option<&str>, Option<&str>) {
        let mut segments = value
            .split('/')
            .map(|segment| (!segment.is_empty()).then_some(segment));
        let owner = segments.next().flatten();
        let repo = segments.next().flatten();
        (owner, repo)
    }
}

impl Display for QualifiedRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Everything a run needs. Built once at the process boundary and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInput {
    /// The token used against GitHub REST API.
    pub credential: Credential,
    /// The repository holding the tag.
    pub repo: QualifiedRepo,
    /// The tag to delete.
    pub tag_name: String,
    /// Whether non-draft releases of the tag are deleted first.
    pub should_delete_releases: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_owner_and_repo() {
        assert_eq!(
            QualifiedRepo::split("a-fake-user/fake-repo"),
            (Some("a-fake-user"), Some("fake-repo"))
        );
        assert_eq!(QualifiedRepo::split("owner/repo/extra"), (Some("owner"), Some("repo")));
        assert_eq!(QualifiedRepo::split("owner"), (Some("owner"), None));
        assert_eq!(QualifiedRepo::split("owner/"), (Some("owner"), None));
        assert_eq!(QualifiedRepo::split("/repo"), (None, Some("repo")));
        assert_eq!(QualifiedRepo::split("/"), (None, None));
        assert_eq!(QualifiedRepo::split(""), (None, None));
        assert_eq!(QualifiedRepo::split("owner /repo"), (Some("owner "), Some("repo")));
    }

    #[test]
    fn credential_is_redacted() {
        let credential = Credential::new("ghp_secret");
        assert_eq!(format!("{credential}"), "***");
        assert!(!format!("{credential:?}").contains("ghp_secret"));
        assert_eq!(credential.expose(), "ghp_secret");
    }
}
