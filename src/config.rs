//! Configuration handling
use std::{
    fs::{create_dir_all, read_to_string, File},
    io::Write,
    path::PathBuf,
};

use home::home_dir;
use serde::Deserialize;

use crate::{
    cli::GitImportCli,
    errors::GitImportError,
    utils::{input, yes_no_input},
};

/// Configuration data
#[derive(Deserialize, Default, Clone, Debug)]
pub struct GitImportConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,

    /// CLI arguments
    pub cli_args: GitImportCli,
}

/// Defaults read from the configuration file.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ConfigData {
    /// Default for the private flag
    pub private: Option<bool>,

    /// Default organization owning created repositories
    pub organization: Option<String>,

    /// Default for the archive flag
    pub archive: Option<bool>,
}

impl GitImportConfig {
    /// Create a new Config object
    /// # Errors
    /// Error if the config file can't be opened or parsed
    pub fn try_new(cli_args: GitImportCli) -> Result<Self, GitImportError> {
        let config_path = match cli_args.config.clone() {
            Some(p) => PathBuf::from(p),
            None => Self::get_config_path()?,
        };
        let contents = read_to_string(&config_path)
            .map_err(|e| GitImportError::new_with_source("Unable to open the config file", e))?;
        let config_data = toml::from_str(&contents)?;
        Ok(GitImportConfig {
            config_path,
            cli_args,
            config_data,
        })
    }

    /// Get the path to the config file, creating an empty one on first use
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, GitImportError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err("Unable to get your home dir! home::home_dir() isn't working".into()),
        };
        let config_directory = home_dir.join(".config").join(".git-import");
        let config_path = config_directory.join("config.toml");
        create_dir_all(config_directory)
            .map_err(|e| GitImportError::new_with_source("Unable to create config dir", e))?;
        if !config_path.exists() {
            let mut file = File::create(&config_path)
                .map_err(|e| GitImportError::new_with_source("Unable to create config file", e))?;
            file.write_all(b"")
                .map_err(|e| GitImportError::new_with_source("Unable to write to config file", e))?;
        }
        Ok(config_path)
    }
}

/// Options applied uniformly to every job of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Create missing destination repositories as private
    pub private: bool,

    /// Organization owning created repositories
    pub organization: Option<String>,

    /// Archive each destination after a successful mirror
    pub archive: bool,

    /// Print external commands instead of running them
    pub dry_run: bool,

    /// Skip the final confirmation prompt
    pub assume_yes: bool,
}

impl RunConfig {
    /// Resolve the run options: a CLI flag wins, then a config-file default,
    /// then — only when no `--file` was given, which marks the run as
    /// interactive — a prompt.
    /// # Errors
    /// Error if reading an answer fails
    pub(crate) fn resolve(config: &GitImportConfig) -> Result<Self, GitImportError> {
        let cli = &config.cli_args;
        let data = &config.config_data;
        let interactive = cli.file.is_none();

        let private = if cli.private {
            true
        } else if let Some(value) = data.private {
            value
        } else if interactive {
            yes_no_input(
                "For repositories that need to be created, should they be private? (y/n)",
            )?
        } else {
            false
        };

        let organization = match cli.organization.clone().or_else(|| data.organization.clone()) {
            Some(org) => Some(org),
            None if interactive => {
                println!("Organization for created repositories (leave blank for the personal account):");
                let org = input()?;
                let org = org.trim();
                if org.is_empty() {
                    None
                } else {
                    Some(org.to_string())
                }
            }
            None => None,
        };

        let archive = if cli.archive {
            true
        } else if let Some(value) = data.archive {
            value
        } else if interactive {
            yes_no_input("Archive repositories after import? (y/n)")?
        } else {
            false
        };

        let dry_run = if cli.dry_run {
            true
        } else if interactive {
            yes_no_input("Enable dry run mode? (y/n)")?
        } else {
            false
        };

        Ok(RunConfig {
            private,
            organization,
            archive,
            dry_run,
            assume_yes: cli.yes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// CLI args for a non-interactive run
    fn cli_with_file() -> GitImportCli {
        GitImportCli {
            file: Some("jobs.txt".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn flags_win_without_prompting() {
        let config = GitImportConfig {
            cli_args: GitImportCli {
                private: true,
                organization: Some("platform-team".to_string()),
                archive: true,
                dry_run: true,
                yes: true,
                ..cli_with_file()
            },
            ..Default::default()
        };
        let run = RunConfig::resolve(&config).unwrap();
        assert_eq!(
            run,
            RunConfig {
                private: true,
                organization: Some("platform-team".to_string()),
                archive: true,
                dry_run: true,
                assume_yes: true,
            }
        );
    }

    #[test]
    fn config_file_supplies_defaults() {
        let config_data: ConfigData = toml::from_str(
            "private = true\norganization = \"platform-team\"\n",
        )
        .unwrap();
        let config = GitImportConfig {
            config_data,
            cli_args: cli_with_file(),
            ..Default::default()
        };
        let run = RunConfig::resolve(&config).unwrap();
        assert!(run.private);
        assert_eq!(run.organization.as_deref(), Some("platform-team"));
        assert!(!run.archive);
        assert!(!run.dry_run);
    }

    #[test]
    fn empty_config_file_parses() {
        let config_data: ConfigData = toml::from_str("").unwrap();
        assert!(config_data.private.is_none());
        assert!(config_data.organization.is_none());
        assert!(config_data.archive.is_none());
    }

    #[test]
    fn non_interactive_run_defaults_to_public() {
        let config = GitImportConfig {
            cli_args: cli_with_file(),
            ..Default::default()
        };
        let run = RunConfig::resolve(&config).unwrap();
        assert_eq!(run, RunConfig::default());
    }
}
