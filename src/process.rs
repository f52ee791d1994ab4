//! Process-execution capability.
//!
//! Everything external (setup/teardown hooks, the `psql` client) goes through
//! the [`ProcessRunner`] trait so the engine can be exercised in tests without
//! spawning real processes.

use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::errors::SqltestError;

/// Where the child's stdout goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdoutMode {
    /// Collect stdout in memory (hooks).
    Capture,
    /// Stream stdout into the given file while it is produced (the SQL
    /// client's actual-output file). Stderr is inherited in this mode so
    /// client diagnostics show up live.
    ToFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra variables layered on top of the inherited environment.
    pub env: Vec<(String, String)>,
    pub stdout: StdoutMode,
}

impl CommandSpec {
    /// Single-line rendering for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit code, `None` if the child was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

pub trait ProcessRunner {
    /// Runs the command to completion with both streams fully drained.
    /// A non-zero exit is reported through `ProcessOutput`, not as an error;
    /// only a failure to launch the child is an `Err`.
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, SqltestError>;
}

/// Production runner backed by `std::process`.
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, SqltestError> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        command.envs(spec.env.iter().map(|(k, v)| (k, v)));

        match &spec.stdout {
            StdoutMode::Capture => {
                let output = command.output().map_err(|e| spawn_error(spec, e))?;
                Ok(ProcessOutput {
                    status: output.status.code(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                })
            }
            StdoutMode::ToFile(path) => {
                // Handing the file descriptor to the child drains stdout
                // without a pipe in the middle, so no reader thread is needed
                // and the file is complete once the child has exited.
                let file = File::create(path).map_err(|e| {
                    SqltestError::io(format!("create actual file {}", path.display()), e)
                })?;
                let status = command
                    .stdout(Stdio::from(file))
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| spawn_error(spec, e))?;
                Ok(ProcessOutput {
                    status: status.code(),
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                })
            }
        }
    }
}

fn spawn_error(spec: &CommandSpec, source: std::io::Error) -> SqltestError {
    SqltestError::ExternalCommand {
        command: spec.command_line(),
        status: None,
        stderr: String::new(),
        source: Some(source),
    }
}
