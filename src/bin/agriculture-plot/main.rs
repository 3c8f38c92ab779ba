mod args;
mod ui;

use std::{
    process::ExitCode,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use agriculture::{
    clock::Clock,
    decoder::InputDecoder,
    logging,
    serial::{self, Interruptible},
    series::TimeSeries,
    session,
};
use anyhow::{Context as _, Result, anyhow};
use args::Args;
use clap::Parser as _;

use crate::ui::App;

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn run() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init_to_file(path)?;
    }

    let input = args.input.input()?;
    let field = args::plot_field(args.field.as_deref(), &input);
    let port = serial::open(&args.serial)?;

    let stop = Arc::new(AtomicBool::new(false));
    let stream = Interruptible::new(port, Arc::clone(&stop));
    let decoder = InputDecoder::new(stream, input);
    let clock = Clock::new(args.input.timezone);
    let policy = args.input.error_policy();

    let (tx, rx) = mpsc::channel();
    let loop_stop = Arc::clone(&stop);
    let reader = thread::spawn(move || {
        session::run(decoder, &clock, &loop_stop, policy, |reading| {
            tx.send(reading).map_err(|_| anyhow!("plot window closed"))
        })
    });

    let mut app = App::new(TimeSeries::new(field, args.capacity));
    let mut terminal = ratatui::init();
    let shown = app.run(&mut terminal, &rx, Duration::from_millis(args.refresh_ms));
    ratatui::restore();

    stop.store(true, Ordering::SeqCst);
    let read = reader
        .join()
        .map_err(|_| anyhow!("read loop panicked"))?
        .context("read loop failed");

    shown?;
    read?;

    Ok(())
}
