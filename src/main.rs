//! sds - runs an sds-* sub-tool and pages its output when it would not fit
//! the terminal.

use clap::Parser;
use sds::config::{DispatchArgs, DispatchConfig, PagerConfig};
use sds::pipeline::{self, TerminalGeometry};
use sds::{logging, SdsError};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

const USAGE: &str = "Usage: sds COMMAND ARG...";

fn main() -> ExitCode {
    let args = DispatchArgs::parse();

    if let Err(e) = logging::init(args.log.as_deref()) {
        eprintln!("sds: {:#}", e);
        return ExitCode::from(255);
    }
    tracing::info!("Starting sds");

    let interactive = io::stdout().is_terminal();
    let config = match DispatchConfig::from_args(args, interactive) {
        Ok(config) => config,
        Err(e) => {
            if let SdsError::UnknownCommand(_) = e {
                eprintln!("{}\n", e);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(255);
        }
    };

    let geometry = if interactive {
        TerminalGeometry::query()
    } else {
        None
    };

    match pipeline::run(&config, &PagerConfig::from_env(), geometry) {
        Ok(status) => {
            let code = status.code().unwrap_or(255);
            tracing::info!(code, "exiting");
            ExitCode::from(code as u8)
        }
        Err(e) => {
            tracing::error!(error = %e, "dispatch failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
