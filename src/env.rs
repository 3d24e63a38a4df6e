//! Resolves the inputs of a run from the environment, the way GitHub Actions passes them.
//!
//! An input named `tag_name` arrives as the `INPUT_TAG_NAME` environment variable.

#![cfg(feature = "env")]

use std::{collections::HashMap, hash::BuildHasher, io};

use tracing::{error, warn};

use crate::{
    framework::{StateError, StateResult},
    telemetry::{add_mask, is_github_actions},
    workflow::{Credential, QualifiedRepo, WorkflowInput},
};

/// Accepted spellings of a boolean input, per the YAML 1.2 core schema.
const TRUE_VALUES: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_VALUES: [&str; 3] = ["false", "False", "FALSE"];

/// A source of environment variables.
pub trait InputSource {
    /// Gets a raw environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Gets an action input by name, trimmed. Empty inputs are [`None`].
    fn input(&self, name: &str) -> Option<String> {
        let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
        self.var(&key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }
}

/// Reads from the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl InputSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S> InputSource for HashMap<String, String, S>
where
    S: BuildHasher,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

fn configuration_error(message: String) -> StateError {
    error!("🌶  {message}");
    StateError::Configuration(message)
}

/// Parses a boolean input.
///
/// # Errors
///
/// Returns [`StateError::Configuration`] if `value` is not one of `true | True | TRUE | false | False | FALSE`.
pub fn parse_bool(name: &str, value: &str) -> StateResult<bool> {
    if TRUE_VALUES.contains(&value) {
        Ok(true)
    } else if FALSE_VALUES.contains(&value) {
        Ok(false)
    } else {
        Err(configuration_error(format!(
            "input \"{name}\" does not meet YAML 1.2 \"Core Schema\" specification: \"{value}\". Supported boolean inputs are `true | True | TRUE | false | False | FALSE`"
        )))
    }
}

fn resolve_credential<S>(source: &S) -> StateResult<Credential>
where
    S: InputSource + ?Sized,
{
    if let Some(token) = source.input("github_token") {
        return Ok(Credential::new(token));
    }

    match source.var("GITHUB_TOKEN") {
        Some(token) => {
            warn!(
                "⚠️ providing the GitHub token from the environment variable is deprecated. Provide it as an input with the name \"github_token\" instead."
            );
            Ok(Credential::new(token))
        }
        None => Err(configuration_error(String::from(
            "a valid GitHub token was not provided. Provide it as an input with the name \"github_token\"",
        ))),
    }
}

fn resolve_should_delete_releases<S>(source: &S) -> StateResult<bool>
where
    S: InputSource + ?Sized,
{
    const NAME: &str = "delete_release";

    match source.input(NAME) {
        Some(value) => parse_bool(NAME, &value),
        None => Ok(false),
    }
}

fn resolve_repo<S>(source: &S) -> StateResult<QualifiedRepo>
where
    S: InputSource + ?Sized,
{
    let input = source.input("repo").unwrap_or_default();

    match QualifiedRepo::split(&input) {
        (Some(owner), Some(repo)) => Ok(QualifiedRepo::new(owner, repo)),
        (None, None) => context_repo(source),
        _ => Err(configuration_error(format!(
            "a valid repo was not given. Expected \"{input}\" to be in the form of \"owner/repo\""
        ))),
    }
}

/// Falls back to the repository running the workflow.
fn context_repo<S>(source: &S) -> StateResult<QualifiedRepo>
where
    S: InputSource + ?Sized,
{
    let repository = source.var("GITHUB_REPOSITORY").unwrap_or_default();

    match QualifiedRepo::split(&repository) {
        (Some(owner), Some(repo)) => Ok(QualifiedRepo::new(owner, repo)),
        _ => Err(configuration_error(String::from(
            "no repo was given, and the GITHUB_REPOSITORY environment variable is not set like \"owner/repo\"",
        ))),
    }
}

impl WorkflowInput {
    /// Resolves the inputs of a run, and masks the token in the output of the runner.
    ///
    /// The `github_token` input wins over the deprecated `GITHUB_TOKEN` variable, and the `repo` input wins over `GITHUB_REPOSITORY`.
    ///
    /// See: [`Self::resolve_with`]
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Configuration`] if no token or no repository can be found, `repo` is malformed, or `delete_release` is not a boolean.
    pub fn resolve<S>(source: &S) -> StateResult<Self>
    where
        S: InputSource + ?Sized,
    {
        Self::resolve_with(source, &mut io::stdout().lock())
    }

    /// Resolves the inputs of a run, writing the `add-mask` command for the token to `stdout`.
    ///
    /// The command is only written inside GitHub Actions, where the runner consumes it instead of printing it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Configuration`] if an input is invalid, or the token cannot be masked.
    pub fn resolve_with<S, W>(source: &S, stdout: &mut W) -> StateResult<Self>
    where
        S: InputSource + ?Sized,
        W: io::Write,
    {
        let tag_name = source.input("tag_name").unwrap_or_default();
        let credential = resolve_credential(source)?;
        if !credential.is_empty() && is_github_actions(source.var("GITHUB_ACTIONS").as_deref()) {
            add_mask(stdout, credential.expose()).map_err(|err| {
                configuration_error(format!("failed to mask the GitHub token: {err}"))
            })?;
        }
        let should_delete_releases = resolve_should_delete_releases(source)?;
        let repo = resolve_repo(source)?;

        Ok(Self {
            credential,
            repo,
            tag_name,
            should_delete_releases,
        })
    }
}
