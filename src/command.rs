use std::io::Write;

use crate::error::{Error, Result};
use crate::layout::{ByteOrder, Field, Layout, Packing};

pub const COMMAND_LAYOUT: Layout = Layout {
    name: "command",
    fields: &[Field::u16("cmd"), Field::u16("value")],
    packing: Packing::Natural,
    byte_order: ByteOrder::Little,
};

/// A command for the firmware: a character code and a 16-bit argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub code: u16,
    pub value: u16,
}

impl Command {
    /// Parses `"<char> <value>"`, e.g. `"p 100"`.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let tokens: Vec<&str> = line.split(' ').collect();
        let [code, value] = tokens.as_slice() else {
            return Err(Error::MalformedLine {
                line: line.to_string(),
                expected: 2,
                got: tokens.len(),
            });
        };

        let mut chars = code.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(Error::InvalidCommand(code.to_string()));
        };
        if c.is_control() {
            return Err(Error::InvalidCommand(c.escape_default().to_string()));
        }
        let code = u16::try_from(u32::from(c)).map_err(|_| Error::InvalidCommand(c.to_string()))?;

        let value = value
            .parse::<u16>()
            .map_err(|_| Error::InvalidValue(value.to_string()))?;

        Ok(Self { code, value })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        COMMAND_LAYOUT.encode(&[self.code, self.value])
    }
}

/// Writes one encoded command and returns the number of bytes written.
/// Nothing is read back.
pub fn write_command<W: Write + ?Sized>(writer: &mut W, command: &Command) -> Result<usize> {
    let bytes = command.to_bytes()?;
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}
