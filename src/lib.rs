//! Deletes a git tag and, optionally, the published releases pointing at it.
//!
//! A run resolves its [`workflow::WorkflowInput`] once, then [`framework::run`] prunes the releases and deletes the tag through a [`github::GitHubApi`].

pub mod env;
pub mod framework;
pub mod github;
pub mod telemetry;
pub mod transactions;
pub mod workflow;
