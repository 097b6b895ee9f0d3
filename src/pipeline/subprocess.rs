//! Child processes connected to the parent by one pipe.

use crate::error::{Result, SdsError};
use std::io;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use tracing::debug;

/// Which of the child's standard streams is replaced by the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    /// The child writes, the parent reads its standard output.
    Output,
    /// The parent writes, the child reads its standard input.
    Input,
}

/// A spawned child that must be waited on exactly once.
///
/// Dropping an unwaited `Subprocess` reaps it, so the parent's pipe end
/// has to be closed first or the child may never exit.
#[derive(Debug)]
pub struct Subprocess {
    program: String,
    child: Option<Child>,
}

impl Subprocess {
    /// Spawn `command` with its standard output piped to the parent.
    pub fn reading(command: Command, program: impl Into<String>) -> Result<(Self, ChildStdout)> {
        let (mut process, mut child) = Self::spawn(command, program.into(), StreamRole::Output)?;
        let stdout = child.stdout.take().ok_or_else(|| missing_pipe(&process.program))?;
        process.child = Some(child);
        Ok((process, stdout))
    }

    /// Spawn `command` with its standard input piped from the parent.
    pub fn writing(command: Command, program: impl Into<String>) -> Result<(Self, ChildStdin)> {
        let (mut process, mut child) = Self::spawn(command, program.into(), StreamRole::Input)?;
        let stdin = child.stdin.take().ok_or_else(|| missing_pipe(&process.program))?;
        process.child = Some(child);
        Ok((process, stdin))
    }

    fn spawn(mut command: Command, program: String, role: StreamRole) -> Result<(Self, Child)> {
        match role {
            StreamRole::Output => command.stdout(Stdio::piped()),
            StreamRole::Input => command.stdin(Stdio::piped()),
        };

        let child = command
            .spawn()
            .map_err(|e| SdsError::spawn(program.as_str(), e))?;
        debug!(program = %program, pid = child.id(), ?role, "spawned");

        Ok((
            Self {
                program,
                child: None,
            },
            child,
        ))
    }

    /// Name used in diagnostics.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Wait for the child to exit.
    pub fn wait(mut self) -> Result<ExitStatus> {
        match self.child.take() {
            Some(mut child) => {
                let status = child.wait()?;
                debug!(program = %self.program, %status, "reaped");
                Ok(status)
            }
            None => Err(missing_pipe(&self.program)),
        }
    }
}

impl Drop for Subprocess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}

fn missing_pipe(program: &str) -> SdsError {
    SdsError::spawn(
        program,
        io::Error::new(io::ErrorKind::Other, "child has no pipe"),
    )
}
