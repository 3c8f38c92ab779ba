use anyhow::{Context as _, Result};
use chrono_tz::Tz;
use clap::{Args, ValueEnum};

use crate::decoder::Input;
use crate::record::LineFormat;
use crate::session::ErrorPolicy;

#[derive(Debug, Clone, Args)]
pub struct SerialArgs {
    /// Serial device the Arduino is attached to
    #[arg(long, env = "AGRICULTURE_PORT", default_value = "/dev/ttyACM0")]
    pub port: String,

    #[arg(long, env = "AGRICULTURE_BAUD_RATE", default_value_t = 115_200)]
    pub baud_rate: u32,

    /// How often a blocked read wakes up to check for Ctrl-C
    #[arg(long, default_value_t = 200)]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Fixed-layout binary records
    Binary,
    /// Delimited text lines
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordLayout {
    /// 11-field packed record (18 bytes)
    Full,
    /// 4-field record (8 bytes)
    Simple,
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    #[arg(long, value_enum, default_value_t = Mode::Binary)]
    pub mode: Mode,

    #[arg(long, value_enum, default_value_t = RecordLayout::Full)]
    pub layout: RecordLayout,

    /// Field delimiter for text mode
    #[arg(long, default_value_t = ' ')]
    pub delimiter: char,

    /// Field names for text mode, in line order
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["thermistor", "photoresistor"]
    )]
    pub fields: Vec<String>,

    /// Log and skip malformed lines instead of stopping
    #[arg(long)]
    pub skip_errors: bool,

    /// IANA time zone for timestamps; local time when unset
    #[arg(long, env = "AGRICULTURE_TZ")]
    pub timezone: Option<Tz>,
}

impl InputArgs {
    pub fn input(&self) -> Result<Input> {
        Ok(match (self.mode, self.layout) {
            (Mode::Binary, RecordLayout::Full) => Input::Full,
            (Mode::Binary, RecordLayout::Simple) => Input::Simple,
            (Mode::Text, _) => Input::Text(
                LineFormat::new(self.delimiter, self.fields.clone())
                    .context("invalid --fields")?,
            ),
        })
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.skip_errors {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Probe {
        #[command(flatten)]
        serial: SerialArgs,

        #[command(flatten)]
        input: InputArgs,
    }

    #[test]
    fn defaults_match_the_arduino_sketch() {
        let probe = Probe::try_parse_from(["probe"]).unwrap();
        assert_eq!(probe.serial.baud_rate, 115_200);
        assert_eq!(probe.input.input().unwrap(), Input::Full);
        assert_eq!(probe.input.error_policy(), ErrorPolicy::Abort);
    }

    #[test]
    fn text_mode_with_custom_fields() {
        let probe = Probe::try_parse_from([
            "probe",
            "--mode",
            "text",
            "--delimiter",
            ",",
            "--fields",
            "temperature,moisture,light",
            "--skip-errors",
        ])
        .unwrap();
        assert_eq!(
            probe.input.input().unwrap(),
            Input::Text(LineFormat::new(',', ["temperature", "moisture", "light"]).unwrap())
        );
        assert_eq!(probe.input.error_policy(), ErrorPolicy::Skip);
    }

    #[test]
    fn repeated_text_field_is_an_error() {
        let probe = Probe::try_parse_from(["probe", "--mode", "text", "--fields", "light,light"])
            .unwrap();
        let err = probe.input.input().unwrap_err();
        assert!(format!("{err:#}").contains("duplicate field name"));
    }
}
