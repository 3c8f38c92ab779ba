use agriculture::cli::{InputArgs, SerialArgs};
use clap::Parser;

/// Print Arduino sensor readings as timestamped CSV lines
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub serial: SerialArgs,

    #[command(flatten)]
    pub input: InputArgs,

    /// Print a header row before the first reading
    #[arg(long)]
    pub header: bool,
}
