mod args;

use std::{
    io,
    process::ExitCode,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use agriculture::{
    clock::Clock,
    decoder::InputDecoder,
    logging,
    output::CsvOutput,
    serial::{self, Interruptible},
    session::{self, LoopEnd},
};
use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let input = args.input.input()?;
    let port = serial::open(&args.serial)?;

    let stop = Arc::new(AtomicBool::new(false));
    let stream = Interruptible::new(port, Arc::clone(&stop));
    let decoder = InputDecoder::new(stream, input);
    let clock = Clock::new(args.input.timezone);
    let policy = args.input.error_policy();
    let header = args.header;

    let loop_stop = Arc::clone(&stop);
    let mut reader = tokio::task::spawn_blocking(move || {
        let mut output = CsvOutput::new(io::stdout(), header);
        session::run(decoder, &clock, &loop_stop, policy, |reading| {
            output.write(&reading)
        })
    });

    let end = tokio::select! {
        joined = &mut reader => joined.context("read loop panicked")??,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            info!("interrupt received, stopping");
            stop.store(true, Ordering::SeqCst);
            reader.await.context("read loop panicked")??
        }
    };

    match end {
        LoopEnd::Interrupted => info!("stopped by interrupt"),
        LoopEnd::Exhausted => info!("serial stream closed"),
    }

    Ok(())
}
