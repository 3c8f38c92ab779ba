mod args;

use std::io::{self, BufRead as _, Write as _};
use std::process::ExitCode;

use agriculture::{
    command::{Command, write_command},
    logging, serial,
};
use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use tracing::{info, warn};

fn main() -> ExitCode {
    logging::init();

    if let Err(e) = run() {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut port = serial::open(&args.serial)?;

    for (i, line) in io::stdin().lock().lines().enumerate() {
        let line_no = i + 1;
        let line = line.context("failed to read command from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(c) => c,
            Err(e) if args.skip_invalid => {
                warn!(line = line_no, error = %e, "skipping invalid command");
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("invalid command on line {line_no}")),
        };

        let written = write_command(&mut port, &command)
            .with_context(|| format!("failed to send command on line {line_no}"))?;

        info!(
            code = command.code,
            value = command.value,
            bytes = written,
            "sent command"
        );
    }

    port.flush().context("failed to flush serial port")?;

    Ok(())
}
