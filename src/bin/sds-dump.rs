//! sds-dump - prints a summary, names, attribute values or variable values
//! of a netCDF file.

use clap::CommandFactory;
use sds::config::{DumpArgs, DumpConfig};
use sds::data::NetcdfSource;
use sds::dump::Dumper;
use sds::{logging, SdsError};
use std::io::{self, ErrorKind, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = DumpArgs::parse_normalized();

    if let Err(e) = logging::init(args.log.as_deref()) {
        eprintln!("sds-dump: {:#}", e);
        return ExitCode::from(255);
    }
    tracing::info!("Starting sds-dump");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SdsError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("reader closed standard output");
            ExitCode::SUCCESS
        }
        Err(SdsError::Usage(message)) => {
            let mut command = DumpArgs::command();
            eprintln!("sds-dump: {}\n{}", message, command.render_usage());
            ExitCode::from(255)
        }
        Err(e) => {
            tracing::error!(error = %e, "dump failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(args: DumpArgs) -> sds::Result<()> {
    let stdout = io::stdout();
    let config = DumpConfig::from_args(args, stdout.is_terminal())?;
    let source = NetcdfSource::open(&config.infile)?;
    Dumper::new(&config, &source, stdout.lock()).run()
}
