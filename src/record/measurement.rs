use crate::layout::{ByteOrder, Field, Layout, Packing};
use crate::record::{Fields, Record, layout_names, layout_value};

/// Full sensor and actuator state, as sent by the current firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasurementRecord {
    pub temperature: u16,

    pub moisture: u16,

    pub light: u16,

    pub button: u8,

    pub pump_on: u8,

    pub heating_on: u8,

    pub temperature_level: u16,

    pub moisture_level: u16,

    pub water_capacity: u16,

    pub remaining_water: u16,

    pub auto_mode: u8,
}

// Byte order is assumed: the firmware targets little-endian AVR/ARM boards.
pub const MEASUREMENT_LAYOUT: Layout = Layout {
    name: "measurement",
    fields: &[
        Field::u16("temperature"),
        Field::u16("moisture"),
        Field::u16("light"),
        Field::u8("button"),
        Field::u8("pump_on"),
        Field::u8("heating_on"),
        Field::u16("temperature_level"),
        Field::u16("moisture_level"),
        Field::u16("water_capacity"),
        Field::u16("remaining_water"),
        Field::u8("auto_mode"),
    ],
    packing: Packing::Packed,
    byte_order: ByteOrder::Little,
};

impl Record for MeasurementRecord {
    const LAYOUT: Layout = MEASUREMENT_LAYOUT;

    fn from_values(v: &[u16]) -> Self {
        Self {
            temperature: v[0],
            moisture: v[1],
            light: v[2],
            button: v[3] as u8,
            pump_on: v[4] as u8,
            heating_on: v[5] as u8,
            temperature_level: v[6],
            moisture_level: v[7],
            water_capacity: v[8],
            remaining_water: v[9],
            auto_mode: v[10] as u8,
        }
    }

    fn to_values(&self) -> Vec<u16> {
        vec![
            self.temperature,
            self.moisture,
            self.light,
            self.button.into(),
            self.pump_on.into(),
            self.heating_on.into(),
            self.temperature_level,
            self.moisture_level,
            self.water_capacity,
            self.remaining_water,
            self.auto_mode.into(),
        ]
    }
}

impl Fields for MeasurementRecord {
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
