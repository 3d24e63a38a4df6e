use tracing::{error, info, warn};

use crate::{
    framework::{StateError, StateResult, TagOutcome},
    github::GitHubApi,
    workflow::QualifiedRepo,
};

/// The message GitHub answers with when the reference is already gone.
pub const REFERENCE_DOES_NOT_EXIST: &str = "Reference does not exist";

/// Creates the git reference of a tag. The tag name is not escaped.
pub fn create_tag_ref(tag_name: &str) -> String {
    format!("refs/tags/{tag_name}")
}

/// Deletes the tag reference of `tag_name` in `repo`.
///
/// A tag that does not exist already counts as deleted, since an absent tag is the goal.
///
/// # Errors
///
/// Returns an error if GitHub fails to delete the reference for any other reason.
pub async fn delete_tag<A>(api: &A, repo: &QualifiedRepo, tag_name: &str) -> StateResult<TagOutcome>
where
    A: GitHubApi + ?Sized,
{
    let reference = create_tag_ref(tag_name);

    match api.delete_ref(repo, &reference).await {
        Ok(()) => {
            info!("✅  \"{tag_name}\" deleted successfully!");
            Ok(TagOutcome::Deleted)
        }
        Err(err) => {
            error!("🌶  failed to delete ref \"{reference}\" <- {err}");

            if err.message == REFERENCE_DOES_NOT_EXIST {
                warn!("😕  proceeding anyway, because tag not existing is the goal");
                Ok(TagOutcome::AlreadyAbsent)
            } else {
                let err = StateError::TagDeletion {
                    tag: tag_name.to_owned(),
                    source: err,
                };
                error!("🌶  {err}");
                Err(err)
            }
        }
    }
}
