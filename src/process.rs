//! Invocation of external tools.
//! Every command carries its own working directory; the process-wide one is never changed.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub envs: Vec<(String, String)>,
}

impl ExternalCommand {
    pub fn new<S: Into<String>, P: AsRef<Path>>(program: S, cwd: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            envs: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Runs `command` and waits for it to exit.
    ///
    /// # Errors
    /// * `Error::ProcessError` if the program cannot be started or exits unsuccessfully
    fn run(&self, command: &ExternalCommand) -> Result<()>;
}

/// Runs commands as child processes sharing this process's standard streams.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        debug!("Running '{}' in '{}'.", command, command.cwd.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::ProcessError {
                command: command.to_string(),
                reason: match e.kind() {
                    ErrorKind::NotFound => format!("'{}' not found", command.program),
                    _ => e.to_string(),
                },
            })?;

        if !status.success() {
            return Err(Error::ProcessError {
                command: command.to_string(),
                reason: format!("exited with {status}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let command = ExternalCommand::new("gnome-extensions", ".").args(["install", "--force"]);
        assert_eq!(command.to_string(), "gnome-extensions install --force");
    }

    #[test]
    fn test_missing_program_is_a_process_error() {
        let command = ExternalCommand::new("gnome-ext-no-such-program", ".");
        match SystemRunner.run(&command) {
            Err(Error::ProcessError { reason, .. }) => assert!(reason.contains("not found")),
            other => panic!("Expected ProcessError, got {other:?}"),
        }
    }
}
