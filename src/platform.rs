//! Hosting platform operations, driven through the `gh` CLI.
use serde::Deserialize;

use crate::errors::{GitImportError, GitImportErrorKind};
use crate::repo::RepoRef;
use crate::runner::{run_mutating, CommandRunner, CommandSpec};

/// Environment variable scoping a gh call to a host.
const GH_HOST_ENV: &str = "GH_HOST";

/// Payload of `gh repo view --json name`.
#[derive(Deserialize, Debug)]
struct RepoView {
    /// Repository name as the platform knows it
    name: String,
}

/// Build the `gh repo view` command for a destination.
pub(crate) fn view_command(repo: &RepoRef, org: Option<&str>) -> CommandSpec {
    CommandSpec::new("gh")
        .env(GH_HOST_ENV, &repo.domain)
        .arg("repo")
        .arg("view")
        .arg(repo.slug(org))
        .arg("--json")
        .arg("name")
}

/// Check whether the destination repository exists.
///
/// A failing view is the not-found branch, not an error. Read-only, so it
/// also runs in dry-run mode.
/// # Errors
/// Error if gh can't be spawned or its payload can't be decoded
pub(crate) async fn repo_exists(
    runner: &dyn CommandRunner,
    repo: &RepoRef,
    org: Option<&str>,
) -> Result<bool, GitImportError> {
    let spec = view_command(repo, org);
    log::debug!("running {spec}");
    let output = runner.run(spec).await?;
    if !output.success {
        return Ok(false);
    }
    let view: RepoView = serde_json::from_str(&output.stdout)?;
    log::debug!("repository {} already exists", view.name);
    Ok(true)
}

/// Create the destination repository with the requested visibility.
/// # Errors
/// Error if the platform call fails
pub(crate) async fn create_repo(
    runner: &dyn CommandRunner,
    repo: &RepoRef,
    private: bool,
    org: Option<&str>,
    dry_run: bool,
) -> Result<(), GitImportError> {
    let visibility = if private { "--private" } else { "--public" };
    let spec = CommandSpec::new("gh")
        .env(GH_HOST_ENV, &repo.domain)
        .arg("repo")
        .arg("create")
        .arg(repo.slug(org))
        .arg(visibility);
    run_mutating(runner, spec, dry_run, GitImportErrorKind::RepoCreation).await
}

/// Mark the destination repository as archived.
/// # Errors
/// Error if the platform call fails
pub(crate) async fn archive_repo(
    runner: &dyn CommandRunner,
    repo: &RepoRef,
    dry_run: bool,
) -> Result<(), GitImportError> {
    let spec = CommandSpec::new("gh")
        .env(GH_HOST_ENV, &repo.domain)
        .arg("repo")
        .arg("archive")
        .arg(repo.slug(None))
        .arg("-y");
    run_mutating(runner, spec, dry_run, GitImportErrorKind::RepoArchive).await
}
