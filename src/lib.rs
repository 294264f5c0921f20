//! # git-import
//!
//! Mirror external git repositories into a hosting account
//!
//! ## Usage
//!
//! ```txt
//! Usage: git-import [OPTIONS]
//!
//! Options:
//!   -f, --file <FILE>                  File listing `<source-url> <destination-url>` pairs
//!   -p, --private                      Create missing destination repositories as private
//!   -o, --organization <ORGANIZATION>  Organization owning created repositories
//!   -a, --archive                      Archive each destination after a successful mirror
//!   -n, --dry-run                      Print the external commands instead of running them
//!   -y, --yes                          Skip the final confirmation prompt
//!   -c, --config <CONFIG>              Custom configuration file
//!       --show-config-path             Show the current config path
//!   -v, --verbose...                   Verbose mode (-v, -vv, -vvv)
//!   -h, --help                         Print help
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod import;
pub(crate) mod input;
pub(crate) mod mirror;
pub(crate) mod platform;
pub(crate) mod repo;
pub(crate) mod runner;
pub(crate) mod utils;

pub use cli::{git_import_main, GitImportCli};
pub use config::GitImportConfig;
pub use errors::GitImportError;
pub use repo::RepoRef;
