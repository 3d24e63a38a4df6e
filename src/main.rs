//! Deletes a git tag and, optionally, its releases, configured the way GitHub Actions passes inputs.
//!
//! Exits with `0` on success, including when the tag is already gone, and `1` on any failure.

use std::process::ExitCode;

use anyhow::Context as _;
use delete_tag_and_release::{
    env::ProcessEnv,
    framework::{self, Report, TagOutcome},
    github::client::{ApiConfig, GitHubClient},
    telemetry,
    workflow::WorkflowInput,
};
use tracing::{debug, error};

async fn execute() -> anyhow::Result<Option<Report>> {
    let input = match WorkflowInput::resolve(&ProcessEnv) {
        Ok(input) => input,
        // already logged where it was found
        Err(_) => return Ok(None),
    };

    let client = GitHubClient::new(&ApiConfig::from_env(), input.credential.clone())
        .context("failed to set up the GitHub client")?;

    Ok(framework::run(&client, &input).await.ok())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = telemetry::init_logging(telemetry::in_github_actions()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match execute().await {
        Ok(Some(Report {
            releases_deleted,
            tag,
        })) => {
            debug!(
                "deleted {} release(s), tag {}",
                releases_deleted.len(),
                match tag {
                    TagOutcome::Deleted => "deleted",
                    _ => "already absent",
                }
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::FAILURE,
        Err(err) => {
            error!("🌶  {err:#}");
            ExitCode::FAILURE
        }
    }
}
