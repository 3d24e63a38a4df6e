//! The narrow slice of GitHub REST API this crate consumes.
//!
//! See: [`GitHubApi`], [`client::GitHubClient`]

use async_trait::async_trait;
use thiserror::Error;

use crate::workflow::{QualifiedRepo, release::Release};

pub mod client;

/// A failed call to GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status, if a response was received at all.
    pub status: Option<u16>,
    /// The `message` reported by GitHub, or a transport error description.
    pub message: String,
}

impl ApiError {
    /// Creates an [`ApiError`] from a received response.
    pub fn new<M>(status: u16, message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an [`ApiError`] for a request that never got a response.
    pub fn transport<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// The capabilities used to delete a tag and its releases.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Lists the releases of `repo`, in the order GitHub returns them.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the releases cannot be listed.
    async fn list_releases(&self, repo: &QualifiedRepo) -> Result<Vec<Release>, ApiError>;

    /// Deletes the release with `release_id`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the release is not deleted.
    async fn delete_release(&self, repo: &QualifiedRepo, release_id: u64) -> Result<(), ApiError>;

    /// Deletes a git reference such as `refs/tags/v1.0.0`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the reference is not deleted, including when it does not exist.
    async fn delete_ref(&self, repo: &QualifiedRepo, reference: &str) -> Result<(), ApiError>;
}
