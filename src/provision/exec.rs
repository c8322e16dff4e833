//! External process invocation.
//!
//! Every step shells out through [`Invocation`], which carries the program,
//! arguments, extra environment, and working directory, and renders the full
//! command line into error messages. Per the fail-fast model there are no
//! retries and no timeouts; a launched tool runs for as long as it needs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use super::error::{Error, Result};

/// A single external command, built up before being run.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    /// Start building a command for the given program.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child only.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Run the child in the given directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The command line as shown in logs and error messages.
    pub fn rendered(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run with inherited stdio, requiring a zero exit.
    pub async fn run(&self) -> Result<()> {
        let status = self.status().await?;
        if !status.success() {
            return Err(Error::CommandStatus {
                command: self.rendered(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Run with inherited stdio, returning the raw exit status.
    ///
    /// Used by the launcher, where the child blocks in the foreground for
    /// the lifetime of the server and the exit status is surfaced as-is.
    pub async fn status(&self) -> Result<ExitStatus> {
        log::debug!("running: {}", self.rendered());
        self.command()
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: self.rendered(),
                error,
            })
    }

    /// Run silently, reporting only whether the command exited zero.
    ///
    /// Spawn failures are still errors; a non-zero exit is `Ok(false)`.
    pub async fn probe(&self) -> Result<bool> {
        log::debug!("probing: {}", self.rendered());
        let status = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: self.rendered(),
                error,
            })?;
        Ok(status.success())
    }

    /// Run capturing stdout, requiring a zero exit. Returns trimmed stdout.
    pub async fn capture(&self) -> Result<String> {
        log::debug!("capturing: {}", self.rendered());
        let output = self
            .command()
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: self.rendered(),
                error,
            })?;
        if !output.status.success() {
            log::debug!(
                "{} stderr: {}",
                self.rendered(),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(Error::CommandStatus {
                command: self.rendered(),
                code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_program_and_args() {
        let inv = Invocation::new("keytool").args(["-list", "-alias", "dev"]);
        assert_eq!(inv.rendered(), "keytool -list -alias dev");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn probe_reports_exit_status_without_failing() {
        let ok = Invocation::new("true").probe().await.expect("spawn true");
        assert!(ok);
        let bad = Invocation::new("false").probe().await.expect("spawn false");
        assert!(!bad);
    }

    #[tokio::test]
    async fn spawn_failure_names_the_command() {
        let err = Invocation::new("definitely-not-a-real-tool")
            .arg("--version")
            .run()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-tool"));
    }
}
