use thiserror::Error;

use crate::github::ApiError;

/// The result of a transaction.
pub type StateResult<T> = Result<T, StateError>;

/// A failure that ends the run with a non-zero exit status. Nothing is retried.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// An input is missing or malformed. No request was sent.
    #[error("{0}")]
    Configuration(String),
    /// The releases could not be listed, so none were deleted.
    #[error("failed to get list of releases <- {0}")]
    Listing(#[source] ApiError),
    /// A release could not be deleted. Releases deleted before it stay deleted.
    #[error("failed to delete release with id \"{id}\" <- {source}")]
    ReleaseDeletion {
        /// The release that failed.
        id: u64,
        /// The cause reported by GitHub.
        #[source]
        source: ApiError,
    },
    /// The tag could not be deleted for a reason other than not existing.
    #[error("an error occurred while deleting the tag \"{tag}\" <- {source}")]
    TagDeletion {
        /// The tag that failed.
        tag: String,
        /// The cause reported by GitHub.
        #[source]
        source: ApiError,
    },
}

/// How the tag deletion ended, both counting as success.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    /// The tag was deleted by this run.
    Deleted,
    /// The tag did not exist in the first place.
    AlreadyAbsent,
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The releases deleted, in deletion order.
    pub releases_deleted: Vec<u64>,
    /// How the tag deletion ended.
    pub tag: TagOutcome,
}
