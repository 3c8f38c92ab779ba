mod measurement;
mod simple;
mod text;

pub use measurement::*;
pub use simple::*;
pub use text::*;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::layout::Layout;

/// A record with a fixed binary layout.
pub trait Record: Sized {
    const LAYOUT: Layout;

    /// Builds the record from decoded values, one per layout field.
    fn from_values(values: &[u16]) -> Self;

    fn to_values(&self) -> Vec<u16>;

    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_values(&Self::LAYOUT.decode(bytes)?))
    }

    fn encode(&self) -> Result<Vec<u8>> {
        Self::LAYOUT.encode(&self.to_values())
    }
}

/// Named fields of a decoded reading, in output order.
pub trait Fields {
    fn names(&self) -> Vec<&str>;

    fn values(&self) -> Vec<String>;

    fn value(&self, name: &str) -> Option<f64>;
}

/// A reading together with the local time it was decoded at.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub measured_at: DateTime<FixedOffset>,
    pub record: T,
}

/// Any of the reading shapes the tools can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Full(MeasurementRecord),
    Simple(SimpleRecord),
    Text(TextRecord),
}

impl Fields for Reading {
    fn names(&self) -> Vec<&str> {
        match self {
            Reading::Full(r) => r.names(),
            Reading::Simple(r) => r.names(),
            Reading::Text(r) => r.names(),
        }
    }

    fn values(&self) -> Vec<String> {
        match self {
            Reading::Full(r) => r.values(),
            Reading::Simple(r) => r.values(),
            Reading::Text(r) => r.values(),
        }
    }

    fn value(&self, name: &str) -> Option<f64> {
        match self {
            Reading::Full(r) => r.value(name),
            Reading::Simple(r) => r.value(name),
            Reading::Text(r) => r.value(name),
        }
    }
}

fn layout_names(layout: &Layout) -> Vec<&'static str> {
    layout.field_names().collect()
}

fn layout_value(layout: &Layout, values: &[u16], name: &str) -> Option<f64> {
    layout
        .field_names()
        .position(|n| n == name)
        .map(|i| f64::from(values[i]))
}
