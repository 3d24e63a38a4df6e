use tracing::{error, info, warn};

use crate::{
    framework::{StateError, StateResult},
    github::GitHubApi,
    workflow::QualifiedRepo,
};

/// Deletes every non-draft release of `repo` pointing at `tag_name`, one at a time, in listing order.
///
/// Returns the ids of the deleted releases, which is empty if none matched.
///
/// # Errors
///
/// Returns an error if listing the releases fails, or on the first release that fails to delete. Remaining releases are left untouched.
pub async fn prune_releases<A>(
    api: &A,
    repo: &QualifiedRepo,
    tag_name: &str,
) -> StateResult<Vec<u64>>
where
    A: GitHubApi + ?Sized,
{
    let release_ids: Vec<u64> = match api.list_releases(repo).await {
        Ok(releases) => releases
            .iter()
            .filter(|release| release.is_published_for(tag_name))
            .map(|release| release.id)
            .collect(),
        Err(err) => {
            let err = StateError::Listing(err);
            error!("🌶  {err}");
            return Err(err);
        }
    };

    match release_ids.len() {
        0 => {
            warn!("😕  no releases found associated to tag \"{tag_name}\"");
            return Ok(release_ids);
        }
        1 => info!("🍻  found 1 release to delete"),
        count => info!("🍻  found {count} releases to delete"),
    }

    for &id in &release_ids {
        if let Err(source) = api.delete_release(repo, id).await {
            let err = StateError::ReleaseDeletion { id, source };
            error!("🌶  {err}");
            return Err(err);
        }
    }

    info!("👍🏼 all releases deleted successfully!");
    Ok(release_ids)
}
