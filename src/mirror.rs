//! Bare-clone and mirror-push one repository.
use std::fs::remove_dir_all;
use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::{GitImportError, GitImportErrorKind};
use crate::input::ImportJob;
use crate::runner::{run_mutating, CommandRunner, CommandSpec};

/// Run-scoped directory holding the transient bare clones.
///
/// Removed again when the value is dropped, whichever way the run ends. In
/// dry-run mode the path is only reserved, never created.
#[derive(Debug)]
pub(crate) struct Workdir {
    /// Location of the directory
    path: PathBuf,

    /// Whether the directory was actually created
    created: bool,
}

impl Workdir {
    /// Pick a fresh directory under the system temp dir.
    /// # Errors
    /// Error if the directory can't be created
    pub(crate) fn new(dry_run: bool) -> Result<Self, GitImportError> {
        let rand_string: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();
        let path = std::env::temp_dir().join(format!("git-import-{rand_string}"));
        if !dry_run {
            std::fs::create_dir(&path)?;
        }
        Ok(Self {
            path,
            created: !dry_run,
        })
    }

    /// Path of the working directory.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Workdir {
    fn drop(&mut self) {
        if self.created && self.path.exists() {
            if let Err(e) = remove_dir_all(&self.path) {
                log::warn!("unable to remove {}: {e}", self.path.display());
            }
        }
    }
}

/// Mirror one repository: bare-clone the source, push all refs (branches,
/// tags, deletions) to the destination, remove the local clone.
///
/// The clone directory is passed to each command explicitly; the process
/// working directory never changes.
/// # Errors
/// Error if the clone or the push fails
pub(crate) async fn mirror_repo(
    runner: &dyn CommandRunner,
    job: &ImportJob,
    workdir: &Path,
    dry_run: bool,
) -> Result<(), GitImportError> {
    let clone_path = workdir.join(format!("{}.git", job.source.name));

    let clone = CommandSpec::new("git")
        .arg("clone")
        .arg("--bare")
        .arg(&job.source_url)
        .arg(clone_path.display().to_string());
    run_mutating(runner, clone, dry_run, GitImportErrorKind::Clone).await?;

    let push = CommandSpec::new("git")
        .arg("push")
        .arg("--mirror")
        .arg(&job.destination_url)
        .current_dir(clone_path.clone());
    run_mutating(runner, push, dry_run, GitImportErrorKind::Push).await?;

    if !dry_run && clone_path.exists() {
        remove_dir_all(&clone_path)?;
    }
    Ok(())
}
