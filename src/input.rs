//! Import job list read from the input file.
use std::{fs::read_to_string, path::Path};

use crate::errors::{GitImportError, GitImportErrorKind};
use crate::repo::RepoRef;

/// One source/destination pair, taken from a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    /// URL the repository is mirrored from
    pub source_url: String,

    /// URL the repository is mirrored to
    pub destination_url: String,

    /// Parsed source reference
    pub source: RepoRef,

    /// Parsed destination reference
    pub destination: RepoRef,
}

/// Read the job list from a file, one pair of URLs per line.
/// # Errors
/// Error if the file is missing, a line is malformed or a URL is invalid
pub fn read_jobs(path: &Path) -> Result<Vec<ImportJob>, GitImportError> {
    if !path.is_file() {
        return Err(GitImportError::new(GitImportErrorKind::FileNotFound)
            .with_text(&path.display().to_string()));
    }
    let contents = read_to_string(path)
        .map_err(|e| GitImportError::new_with_source("Unable to read the input file", e))?;
    parse_jobs(&contents)
}

/// Parse the job list from the input file contents.
///
/// Blank lines are skipped. Both URLs of every line are parsed here, so a bad
/// URL anywhere aborts before any job runs.
pub(crate) fn parse_jobs(contents: &str) -> Result<Vec<ImportJob>, GitImportError> {
    let mut jobs = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(GitImportError::new(GitImportErrorKind::MalformedLine).with_text(line));
        }
        let source = RepoRef::parse(tokens[0])?;
        let destination = RepoRef::parse(tokens[1])?;
        jobs.push(ImportJob {
            source_url: tokens[0].to_string(),
            destination_url: tokens[1].to_string(),
            source,
            destination,
        });
    }
    Ok(jobs)
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    #[test]
    fn parses_pairs_in_order() {
        let contents = indoc! {"
            https://git.example.com/acme/legacy.git https://github.example.com/acme/legacy

            ssh://git@git.example.com:acme/tools.git https://github.example.com/acme/tools
        "};
        let jobs = parse_jobs(contents).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].destination.name, "legacy");
        assert_eq!(jobs[1].source.name, "tools");
        assert_eq!(
            jobs[1].source_url,
            "ssh://git@git.example.com:acme/tools.git"
        );
    }

    #[test]
    fn malformed_line_names_the_line() {
        let contents = indoc! {"
            https://git.example.com/acme/legacy.git https://github.example.com/acme/legacy
            https://git.example.com/acme/odd.git
        "};
        let error = parse_jobs(contents).unwrap_err();
        assert_eq!(error.kind(), crate::errors::GitImportErrorKind::MalformedLine);
        assert!(error.to_string().contains("acme/odd.git"));
    }

    #[test]
    fn invalid_url_aborts_the_whole_list() {
        let contents = indoc! {"
            https://git.example.com/acme/legacy.git https://github.example.com/acme/legacy
            git://git.example.com/acme/a.git https://github.example.com/acme/a
        "};
        let error = parse_jobs(contents).unwrap_err();
        assert_eq!(error.kind(), crate::errors::GitImportErrorKind::InvalidUrl);
    }

    #[test]
    fn missing_file_is_reported() {
        let path = PathBuf::from("/definitely/not/here.txt");
        let error = read_jobs(&path).unwrap_err();
        assert_eq!(error.kind(), crate::errors::GitImportErrorKind::FileNotFound);
        assert!(error.to_string().contains("/definitely/not/here.txt"));
    }
}
