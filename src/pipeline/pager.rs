//! Choosing and starting a pager.

use super::Subprocess;
use crate::config::PagerConfig;
use crate::error::{Result, SdsError};
use std::io;
use std::path::Path;
use std::process::{ChildStdin, Command};
use tracing::{debug, warn};

/// A pager program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    /// Program name or path.
    pub program: String,
    /// Arguments, without the program.
    pub args: Vec<String>,
}

impl PagerCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Split a `PAGER` value on whitespace, letting `less` pass colors through.
    pub fn from_env_value(value: &str) -> Option<Self> {
        let mut words = value.split_whitespace().map(str::to_string);
        let program = words.next()?;
        let mut args: Vec<String> = words.collect();

        let is_less = Path::new(&program)
            .file_name()
            .is_some_and(|name| name == "less");
        if is_less && !args.iter().any(|a| a == "-R") {
            args.push("-R".to_string());
        }
        Some(Self { program, args })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Pagers to try, in order.
pub fn pager_candidates(config: &PagerConfig) -> Vec<PagerCommand> {
    let mut candidates: Vec<PagerCommand> = config
        .pager
        .as_deref()
        .and_then(PagerCommand::from_env_value)
        .into_iter()
        .collect();

    for fallback in [PagerCommand::new("less", &["-R"]), PagerCommand::new("more", &[])] {
        if !candidates.contains(&fallback) {
            candidates.push(fallback);
        }
    }
    candidates
}

/// Start the first candidate that spawns.
pub fn open_pager(config: &PagerConfig) -> Result<(Subprocess, ChildStdin)> {
    spawn_first(&pager_candidates(config))
}

fn spawn_first(candidates: &[PagerCommand]) -> Result<(Subprocess, ChildStdin)> {
    let mut tried = Vec::new();
    let mut last_error = None;

    for candidate in candidates {
        tried.push(candidate.program.clone());
        match Subprocess::writing(candidate.command(), candidate.program.as_str()) {
            Ok(spawned) => {
                debug!(pager = %candidate.program, args = ?candidate.args, "paging output");
                return Ok(spawned);
            }
            Err(SdsError::Spawn { source, .. }) => {
                warn!(pager = %candidate.program, error = %source, "pager did not start");
                last_error = Some(source);
            }
            Err(other) => return Err(other),
        }
    }

    Err(SdsError::PagerUnavailable {
        tried,
        source: last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no pager configured")),
    })
}
