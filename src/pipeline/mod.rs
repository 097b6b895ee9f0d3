//! Running a sub-tool and paging its output when it would not fit on screen.
//!
//! The sub-tool's standard output is read through a pipe. The first block
//! decides, once, whether the output goes straight to the terminal or
//! through a pager. Every child spawned here is waited on before
//! [`run`] returns, including when the pager quits early.

mod pager;
mod paging;
mod relay;
mod subprocess;

pub use pager::{open_pager, pager_candidates, PagerCommand};
pub use paging::{should_page, TerminalGeometry};
pub use relay::{forward, read_first_block, Delivery, FIRST_BLOCK};
pub use subprocess::{StreamRole, Subprocess};

use crate::config::{DispatchConfig, PagerConfig, Subcommand};
use crate::error::Result;
use std::io;
use std::path::PathBuf;
use std::process::{ChildStdout, Command, ExitStatus};
use tracing::{debug, info};

/// Start the sub-tool for `subcommand` with its output piped back.
pub fn launch(
    subcommand: Subcommand,
    args: &[String],
    interactive: bool,
) -> Result<(Subprocess, ChildStdout)> {
    let binary = subcommand.binary();
    let mut command = Command::new(locate(&binary));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.arg0(subcommand.program_name());
    }
    if interactive {
        command.arg("-G");
    }
    command.args(args);

    Subprocess::reading(command, binary)
}

/// The sub-tool next to the running executable, else the bare name for a
/// `PATH` search.
fn locate(binary: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(binary)))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(binary))
}

/// Run one dispatcher invocation and return the sub-tool's exit status.
pub fn run(
    config: &DispatchConfig,
    pager: &PagerConfig,
    geometry: Option<TerminalGeometry>,
) -> Result<ExitStatus> {
    let (tool, mut output) = launch(config.subcommand, &config.args, config.interactive)?;
    info!(command = %config.subcommand, args = ?config.args, "launched");

    let first = read_first_block(&mut output)?;
    let paged = geometry.is_some_and(|g| should_page(&first, g));
    debug!(bytes = first.len(), paged, ?geometry, "first block");

    let delivery = if paged {
        let (pager_process, mut input) = open_pager(pager)?;
        let delivery = forward(&first, &mut output, &mut input)?;
        drop(input);
        pager_process.wait()?;
        delivery
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        forward(&first, &mut output, &mut lock)?
    };

    drop(output);
    let status = tool.wait()?;
    info!(?delivery, %status, "finished");
    Ok(status)
}
