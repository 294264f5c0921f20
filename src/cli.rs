//! Command line options for the git-import tool
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::config::{GitImportConfig, RunConfig};
use crate::errors::{GitImportError, GitImportErrorKind};
use crate::import::{print_plan, process_jobs};
use crate::input::read_jobs;
use crate::runner::ShellRunner;
use crate::utils::{input, yes_no_input};

/// git-import - Mirror external git repositories into a hosting account
#[derive(Parser, Deserialize, Default, Clone, Debug)]
pub struct GitImportCli {
    /// File listing `<source-url> <destination-url>` pairs, one per line
    #[arg(short, long)]
    pub file: Option<String>,

    /// Create missing destination repositories as private
    #[arg(short, long)]
    pub private: bool,

    /// Organization owning created repositories (defaults to the URL owner)
    #[arg(short, long)]
    pub organization: Option<String>,

    /// Archive each destination repository after a successful mirror
    #[arg(short, long)]
    pub archive: bool,

    /// Print the external commands instead of running them
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Skip the final confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run the git-import tool with the provided command line options
/// # Errors
/// Error if any step of the run fails
pub async fn git_import_main() -> Result<(), GitImportError> {
    let args = GitImportCli::parse();
    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let config = GitImportConfig::try_new(args)?;
    if config.cli_args.show_config_path {
        println!("{}", config.config_path.display());
        return Ok(());
    }

    let file_path = match &config.cli_args.file {
        Some(path) => PathBuf::from(path),
        None => {
            println!("File with one `<source-url> <destination-url>` pair per line:");
            PathBuf::from(input()?)
        }
    };
    if !file_path.is_file() {
        return Err(GitImportError::new(GitImportErrorKind::FileNotFound)
            .with_text(&file_path.display().to_string()));
    }

    let run = RunConfig::resolve(&config)?;
    let jobs = read_jobs(&file_path)?;
    if jobs.is_empty() {
        println!("Nothing to import");
        return Ok(());
    }

    print_plan(&jobs, &run);
    if !run.dry_run && !run.assume_yes && !yes_no_input("\nDo you want to proceed? (y/n)")? {
        println!("Operation canceled.");
        return Ok(());
    }

    let runner = ShellRunner;
    process_jobs(&runner, &run, &jobs).await
}
