//! Typed invocation of the external git and gh commands.
use std::fmt;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;

use crate::errors::{GitImportError, GitImportErrorKind};

/// Description of a single external command.
///
/// Carries everything needed to either run the command or render the exact
/// line it would run as.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Program to invoke
    program: String,

    /// Arguments, in order
    args: Vec<String>,

    /// Extra environment variables
    envs: Vec<(String, String)>,

    /// Directory the command runs in
    dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Start a new command description.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Run the command from the given directory.
    pub fn current_dir(mut self, dir: PathBuf) -> Self {
        self.dir = Some(dir);
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{key}={value} ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the command exited with status zero
    pub success: bool,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

/// Executes command descriptions.
///
/// One real implementation spawns processes; tests substitute a scripted
/// runner, so the orchestration is exercised without touching git or gh.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is reported through [`CommandOutput::success`], not as
    /// an error.
    /// # Errors
    /// Error if the program can't be run at all
    fn run(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<CommandOutput, GitImportError>> + Send + '_>>;
}

/// Runner that spawns the described process.
#[derive(Debug, Default, Clone)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<CommandOutput, GitImportError>> + Send + '_>>
    {
        Box::pin(async move {
            let mut command = Command::new(&spec.program);
            command
                .args(&spec.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            for (key, value) in &spec.envs {
                command.env(key, value);
            }
            if let Some(dir) = &spec.dir {
                command.current_dir(dir);
            }
            let output = command.output().await.map_err(|e| {
                GitImportError::new(GitImportErrorKind::Spawn)
                    .with_command(&spec.to_string())
                    .with_text(&e.to_string())
            })?;
            Ok(CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        })
    }
}

/// Run a mutating command, or preview it when `dry_run` is set.
///
/// A non-zero exit becomes an error of the given kind, carrying the rendered
/// command line and whatever the command wrote to stderr.
pub(crate) async fn run_mutating(
    runner: &dyn CommandRunner,
    spec: CommandSpec,
    dry_run: bool,
    kind: GitImportErrorKind,
) -> Result<(), GitImportError> {
    if dry_run {
        println!("[dry-run] {spec}");
        return Ok(());
    }
    log::debug!("running {spec}");
    let line = spec.to_string();
    let output = runner.run(spec).await?;
    if !output.success {
        let text = if output.stderr.trim().is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        return Err(GitImportError::new(kind)
            .with_command(&line)
            .with_text(text.trim()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted runner for tests.
    use std::sync::Mutex;

    use super::*;

    /// Runner that records rendered command lines and replays scripted
    /// outputs, first-in first-out. Once the script is exhausted every call
    /// succeeds with empty output.
    pub(crate) struct FakeRunner {
        /// Rendered command lines, in invocation order
        calls: Mutex<Vec<String>>,

        /// Remaining scripted outputs
        outputs: Mutex<Vec<CommandOutput>>,
    }

    impl FakeRunner {
        /// Build a runner with a script of outputs.
        pub(crate) fn new(outputs: Vec<CommandOutput>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outputs: Mutex::new(outputs),
            }
        }

        /// A successful empty output.
        pub(crate) fn ok() -> CommandOutput {
            CommandOutput {
                success: true,
                ..Default::default()
            }
        }

        /// A failing output with the given stderr.
        pub(crate) fn failed(stderr: &str) -> CommandOutput {
            CommandOutput {
                success: false,
                stderr: stderr.to_string(),
                ..Default::default()
            }
        }

        /// A successful output with the given stdout.
        pub(crate) fn with_stdout(stdout: &str) -> CommandOutput {
            CommandOutput {
                success: true,
                stdout: stdout.to_string(),
                ..Default::default()
            }
        }

        /// The command lines seen so far.
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(
            &self,
            spec: CommandSpec,
        ) -> Pin<
            Box<dyn std::future::Future<Output = Result<CommandOutput, GitImportError>> + Send + '_>,
        > {
            Box::pin(async move {
                self.calls.lock().unwrap().push(spec.to_string());
                let mut outputs = self.outputs.lock().unwrap();
                if outputs.is_empty() {
                    Ok(FakeRunner::ok())
                } else {
                    Ok(outputs.remove(0))
                }
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::fake::FakeRunner;
    use super::*;

    #[test]
    fn spec_renders_the_full_line() {
        let spec = CommandSpec::new("gh")
            .env("GH_HOST", "github.example.com")
            .arg("repo")
            .arg("view")
            .arg("acme/legacy")
            .arg("--json")
            .arg("name");
        assert_eq!(
            spec.to_string(),
            "GH_HOST=github.example.com gh repo view acme/legacy --json name"
        );
    }

    #[tokio::test]
    async fn shell_runner_reports_nonzero_exit() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo boom >&2; exit 3");
        let output = ShellRunner.run(spec).await.unwrap();
        assert!(!output.success);
        assert_eq!(output.stderr.trim(), "boom");
    }

    #[tokio::test]
    async fn shell_runner_captures_stdout() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo hello");
        let output = ShellRunner.run(spec).await.unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn dry_run_executes_nothing() {
        let runner = FakeRunner::new(vec![]);
        let spec = CommandSpec::new("git").arg("push");
        run_mutating(&runner, spec, true, GitImportErrorKind::Push)
            .await
            .unwrap();
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn failure_carries_command_and_stderr() {
        let runner = FakeRunner::new(vec![FakeRunner::failed("denied")]);
        let spec = CommandSpec::new("git").arg("push").arg("--mirror");
        let error = run_mutating(&runner, spec, false, GitImportErrorKind::Push)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), GitImportErrorKind::Push);
        let rendered = error.to_string();
        assert!(rendered.contains("git push --mirror"));
        assert!(rendered.contains("denied"));
    }
}
