//! Error handling for the git-import crate.
use std::{error::Error as StdError, fmt};

/// Error type for the git-import crate.
#[derive(Debug)]
pub struct GitImportError {
    /// Inner error.
    inner: Box<Inner>,
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the git-import crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: GitImportErrorKind,

    /// Rendering of the external command that failed.
    command: Option<String>,

    /// Source error.
    source: Option<BoxError>,
}

/// Error kinds for the git-import crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GitImportErrorKind {
    /// A repository URL matched neither the ssh nor the https form.
    InvalidUrl,

    /// The input file is missing.
    FileNotFound,

    /// An input line did not hold exactly two URLs.
    MalformedLine,

    /// Error related to the configuration.
    Config,

    /// An external command could not be spawned.
    Spawn,

    /// Bare-cloning the source repository failed.
    Clone,

    /// Mirror-pushing to the destination failed.
    Push,

    /// Creating the destination repository failed.
    RepoCreation,

    /// Archiving the destination repository failed.
    RepoArchive,

    /// Error related to serde.
    Serde,

    /// Error related to the filesystem.
    Io,
}

impl GitImportErrorKind {
    /// Human-readable description of the kind.
    fn describe(&self) -> &'static str {
        match self {
            GitImportErrorKind::InvalidUrl => "invalid repository URL",
            GitImportErrorKind::FileNotFound => "input file not found",
            GitImportErrorKind::MalformedLine => {
                "malformed input line, expected `<source-url> <destination-url>`"
            }
            GitImportErrorKind::Config => "configuration error",
            GitImportErrorKind::Spawn => "unable to run external command",
            GitImportErrorKind::Clone => "failed to clone repository",
            GitImportErrorKind::Push => "failed to push repository",
            GitImportErrorKind::RepoCreation => "failed to create repository",
            GitImportErrorKind::RepoArchive => "failed to archive repository",
            GitImportErrorKind::Serde => "unexpected platform response",
            GitImportErrorKind::Io => "filesystem error",
        }
    }
}

impl GitImportError {
    /// Create a new error.
    pub(crate) fn new(kind: GitImportErrorKind) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                command: None,
                source: None,
            }),
        }
    }

    /// Attach a text as the error source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }

    /// Attach the rendering of the failing external command.
    pub(crate) fn with_command(mut self, command: &str) -> Self {
        self.inner.command = Some(command.to_string());
        self
    }

    /// Create a new error from a text and an underlying source.
    pub(crate) fn new_with_source<E>(text: &str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(Inner {
                kind: GitImportErrorKind::Io,
                command: None,
                source: Some(Box::new(std::io::Error::other(format!(
                    "{text}: {source}"
                )))),
            }),
        }
    }

    /// Error kind, for assertions.
    #[cfg(test)]
    pub(crate) fn kind(&self) -> GitImportErrorKind {
        self.inner.kind
    }
}

impl fmt::Display for GitImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.kind.describe())?;
        if let Some(command) = &self.inner.command {
            write!(f, " (command: {command})")?;
        }
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for GitImportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<std::io::Error> for GitImportError {
    fn from(e: std::io::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: GitImportErrorKind::Io,
                command: None,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<serde_json::Error> for GitImportError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: GitImportErrorKind::Serde,
                command: None,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<toml::de::Error> for GitImportError {
    fn from(e: toml::de::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: GitImportErrorKind::Config,
                command: None,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<&str> for GitImportError {
    fn from(text: &str) -> Self {
        GitImportError::new(GitImportErrorKind::Config).with_text(text)
    }
}

impl From<String> for GitImportError {
    fn from(text: String) -> Self {
        GitImportError::new(GitImportErrorKind::Config).with_text(&text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_names_the_failing_command() {
        let error = GitImportError::new(GitImportErrorKind::Push)
            .with_command("git push --mirror https://github.example.com/acme/legacy")
            .with_text("remote hung up");
        let rendered = error.to_string();
        assert!(rendered.contains("failed to push repository"));
        assert!(rendered.contains("git push --mirror https://github.example.com/acme/legacy"));
        assert!(rendered.contains("remote hung up"));
    }

    #[test]
    fn kinds_from_conversions() {
        let io = GitImportError::from(std::io::Error::other("nope"));
        assert_eq!(io.kind(), GitImportErrorKind::Io);
        let text = GitImportError::from("bad setting");
        assert_eq!(text.kind(), GitImportErrorKind::Config);
    }
}
