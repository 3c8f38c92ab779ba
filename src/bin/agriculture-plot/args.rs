use std::path::PathBuf;

use agriculture::{
    cli::{InputArgs, SerialArgs},
    decoder::Input,
};
use clap::Parser;

/// Live terminal plot of one Arduino sensor field
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub serial: SerialArgs,

    #[command(flatten)]
    pub input: InputArgs,

    /// Field to plot; defaults to `light`, or the last text field in text mode
    #[arg(long)]
    pub field: Option<String>,

    /// Number of most recent points kept on screen
    #[arg(long, default_value_t = 600)]
    pub capacity: usize,

    #[arg(long, default_value_t = 100)]
    pub refresh_ms: u64,

    /// Write logs here; the terminal is taken by the plot
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// The field given on the command line, else one the selected input carries.
pub fn plot_field(field: Option<&str>, input: &Input) -> String {
    if let Some(field) = field {
        return field.to_string();
    }

    match input {
        Input::Text(format) => format
            .fields()
            .last()
            .cloned()
            .unwrap_or_else(|| "light".to_string()),
        Input::Full | Input::Simple => "light".to_string(),
    }
}
