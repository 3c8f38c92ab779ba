use crate::layout::{ByteOrder, Field, Layout, Packing};
use crate::record::{Fields, Record, layout_names, layout_value};

/// The earlier four-field record, sent without a packing directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimpleRecord {
    pub temperature: u16,

    pub moisture: u16,

    pub light: u16,

    pub button: u16,
}

// All fields share one width, so natural alignment adds no padding here.
pub const SIMPLE_LAYOUT: Layout = Layout {
    name: "simple",
    fields: &[
        Field::u16("temperature"),
        Field::u16("moisture"),
        Field::u16("light"),
        Field::u16("button"),
    ],
    packing: Packing::Natural,
    byte_order: ByteOrder::Little,
};

impl Record for SimpleRecord {
    const LAYOUT: Layout = SIMPLE_LAYOUT;

    fn from_values(v: &[u16]) -> Self {
        Self {
            temperature: v[0],
            moisture: v[1],
            light: v[2],
            button: v[3],
        }
    }

    fn to_values(&self) -> Vec<u16> {
        vec![self.temperature, self.moisture, self.light, self.button]
    }
}

impl Fields for SimpleRecord {
    fn names(&self) -> Vec<&str> {
        layout_names(&Self::LAYOUT)
    }

    fn values(&self) -> Vec<String> {
        self.to_values().iter().map(u16::to_string).collect()
    }

    fn value(&self, name: &str) -> Option<f64> {
        layout_value(&Self::LAYOUT, &self.to_values(), name)
    }
}
