//! Sequential processing of the job list.
use std::path::Path;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::config::RunConfig;
use crate::errors::GitImportError;
use crate::input::ImportJob;
use crate::mirror::{mirror_repo, Workdir};
use crate::platform::{archive_repo, create_repo, repo_exists};
use crate::runner::CommandRunner;

/// Print the planned work for the whole job list.
pub(crate) fn print_plan(jobs: &[ImportJob], run: &RunConfig) {
    println!("\nThe following actions will be performed:");
    for job in jobs {
        println!("- Import {} -> {}", job.source_url, job.destination_url);
        if run.archive {
            println!("  -> Archive {}", job.destination_url);
        }
    }
}

/// get ProgressStyle
fn get_style() -> Option<ProgressStyle> {
    match ProgressStyle::with_template("{prefix:.bold.dim} {spinner} {wide_msg}") {
        Ok(s) => Some(s.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")),
        Err(_) => None,
    }
}

/// Process every job in input order, stopping at the first failure.
///
/// One working directory serves the whole run and is removed again on every
/// exit path, success or not.
/// # Errors
/// Error as soon as any step of any job fails
pub(crate) async fn process_jobs(
    runner: &dyn CommandRunner,
    run: &RunConfig,
    jobs: &[ImportJob],
) -> Result<(), GitImportError> {
    let workdir = Workdir::new(run.dry_run)?;
    let m = MultiProgress::new();
    let total = jobs.len();
    for (idx, job) in jobs.iter().enumerate() {
        let pb = m.add(ProgressBar::new(4));
        if let Some(style) = get_style() {
            pb.set_style(style);
        }
        pb.set_prefix(format!("[{}/{}]", idx + 1, total));
        match process_one_job(runner, run, job, workdir.path(), &pb).await {
            Ok(_) => {
                pb.finish_with_message(format!("{}: imported", job.destination.name));
            }
            Err(e) => {
                pb.finish_with_message(format!("{}: failed", job.destination.name));
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Run the check, create, mirror and archive steps for one job.
async fn process_one_job(
    runner: &dyn CommandRunner,
    run: &RunConfig,
    job: &ImportJob,
    workdir: &Path,
    pb: &ProgressBar,
) -> Result<(), GitImportError> {
    let name = &job.destination.name;
    let org = run.organization.as_deref();

    pb.set_message(format!("{name}: checking {}", job.destination_url));
    let exists = repo_exists(runner, &job.destination, org).await?;
    pb.inc(1);

    if exists {
        pb.set_message(format!("{name}: destination already exists"));
    } else {
        pb.set_message(format!("{name}: creating destination"));
        create_repo(runner, &job.destination, run.private, org, run.dry_run).await?;
    }
    pb.inc(1);

    pb.set_message(format!("{name}: mirroring"));
    mirror_repo(runner, job, workdir, run.dry_run).await?;
    pb.inc(1);

    if run.archive {
        pb.set_message(format!("{name}: archiving"));
        archive_repo(runner, &job.destination, run.dry_run).await?;
    }
    pb.inc(1);
    Ok(())
}
