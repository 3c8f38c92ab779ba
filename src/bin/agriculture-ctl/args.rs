use agriculture::cli::SerialArgs;
use clap::Parser;

/// Send `<char> <value>` commands from stdin to the Arduino
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub serial: SerialArgs,

    /// Log and skip invalid command lines instead of stopping
    #[arg(long)]
    pub skip_invalid: bool,
}
