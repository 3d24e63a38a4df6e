//! Runs the transactions of a tag deletion in their fixed order: releases first, then the tag.
//!
//! See: [`run`]

mod state;

pub use state::*;

use tracing::{error, info};

use crate::{
    github::GitHubApi,
    transactions::{delete_tag, prune_releases},
    workflow::WorkflowInput,
};

/// Checks the fields of `input` that its types cannot guarantee.
///
/// # Errors
///
/// Returns [`StateError::Configuration`] on the first invalid field.
pub fn validate(input: &WorkflowInput) -> StateResult<()> {
    let checks = [
        (input.tag_name.is_empty(), "no tag name provided as an input."),
        (input.credential.is_empty(), "no Github token provided"),
        (
            input.repo.owner.is_empty() || input.repo.repo.is_empty(),
            "an invalid repo was provided!",
        ),
    ];

    match checks.iter().find(|(invalid, _)| *invalid) {
        Some((_, message)) => {
            error!("🌶  {message}");
            Err(StateError::Configuration((*message).to_owned()))
        }
        None => Ok(()),
    }
}

/// Deletes the releases of the tag if asked to, and then the tag itself.
///
/// Nothing is sent to GitHub if `input` is invalid, and the tag is kept if pruning the releases fails.
///
/// # Errors
///
/// Returns the first [`StateError`] met. A missing tag or no matching releases are not errors.
pub async fn run<A>(api: &A, input: &WorkflowInput) -> StateResult<Report>
where
    A: GitHubApi + ?Sized,
{
    validate(input)?;

    let WorkflowInput {
        repo,
        tag_name,
        should_delete_releases,
        ..
    } = input;

    info!("🏷  given tag is \"{tag_name}\"");
    info!("📕  given repo is \"{repo}\"");
    info!("📕  delete releases is set to \"{should_delete_releases}\"");

    let releases_deleted = if *should_delete_releases {
        prune_releases(api, repo, tag_name).await?
    } else {
        Vec::new()
    };
    let tag = delete_tag(api, repo, tag_name).await?;

    Ok(Report {
        releases_deleted,
        tag,
    })
}
