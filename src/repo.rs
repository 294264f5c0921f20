//! Repository reference parsed from a git URL.
use url::Url;

use crate::errors::{GitImportError, GitImportErrorKind};

/// A repository location on a git host.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct RepoRef {
    /// Host the repository lives on
    pub domain: String,

    /// Account or organization owning the repository
    pub owner: String,

    /// Name of the repository
    pub name: String,
}

impl RepoRef {
    /// Parse a repository URL.
    ///
    /// Accepted forms are `ssh://[git@]host[:/]owner/name.git` and
    /// `https://host/owner/name[.git]` (trailing path segments ignored).
    /// # Errors
    /// Error if the URL matches neither form or a component is empty
    pub fn parse(raw: &str) -> Result<Self, GitImportError> {
        let parsed = if let Some(rest) = raw.strip_prefix("ssh://") {
            Self::parse_ssh(rest)
        } else if raw.starts_with("https://") {
            Self::parse_https(raw)
        } else {
            None
        };
        parsed.ok_or_else(|| GitImportError::new(GitImportErrorKind::InvalidUrl).with_text(raw))
    }

    /// Parse the remainder of an `ssh://` URL.
    ///
    /// The form is scp-like (`host:owner/name.git` or `host/owner/name.git`),
    /// so it is split by hand instead of going through [`Url`].
    fn parse_ssh(rest: &str) -> Option<Self> {
        let rest = rest.strip_prefix("git@").unwrap_or(rest);
        let sep = rest.find([':', '/'])?;
        let domain = &rest[..sep];
        let path = &rest[sep + 1..];
        let (owner, name) = path.split_once('/')?;
        let name = name.strip_suffix(".git")?;
        Self::checked(domain, owner, name)
    }

    /// Parse an `https://` URL.
    fn parse_https(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        let domain = url.host_str()?;
        let mut segments = url.path_segments()?;
        let owner = segments.next()?;
        let name = segments.next()?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        Self::checked(domain, owner, name)
    }

    /// Build a reference, rejecting empty or slash-carrying components.
    fn checked(domain: &str, owner: &str, name: &str) -> Option<Self> {
        if domain.is_empty() || owner.is_empty() || name.is_empty() {
            return None;
        }
        if owner.contains('/') || name.contains('/') {
            return None;
        }
        Some(RepoRef {
            domain: domain.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// `owner/name`, with the owner replaced by `org` when given.
    pub fn slug(&self, org: Option<&str>) -> String {
        format!("{}/{}", org.unwrap_or(&self.owner), self.name)
    }
}
