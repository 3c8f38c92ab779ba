use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("incomplete read: expected {expected} bytes, got {got}")]
    IncompleteRead { expected: usize, got: usize },

    #[error("frame too long: expected {expected} bytes, got {got}")]
    FrameLength { expected: usize, got: usize },

    #[error("malformed line: expected {expected} fields, got {got}: {line:?}")]
    MalformedLine {
        line: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid command: expected a single printable character, got {0:?}")]
    InvalidCommand(String),

    #[error("invalid value: expected an integer in 0-65535, got {0:?}")]
    InvalidValue(String),

    #[error("duplicate field name: {0:?}")]
    DuplicateField(String),

    #[error("wrong number of field values: expected {expected}, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("value {value} does not fit in field {field}")]
    FieldOverflow { field: &'static str, value: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Errors that only spoil the current line or command, leaving the stream usable.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::MalformedLine { .. } | Error::InvalidCommand(_) | Error::InvalidValue(_)
        )
    }
}
