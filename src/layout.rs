//! Byte layouts shared with the Arduino firmware.
//!
//! A [`Layout`] is the ordered list of fields, their widths, the packing mode
//! and the byte order. It replaces reinterpreting raw memory as a struct: the
//! size and every offset are computed from the layout, never from the host's
//! own struct alignment.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
        }
    }

    pub const fn max_value(self) -> u16 {
        match self {
            Width::U8 => u8::MAX as u16,
            Width::U16 => u16::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// No padding at all; each field starts right after the previous one.
    Packed,
    /// C alignment: each field aligned to its own width, total size rounded
    /// up to the widest field.
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: Width,
}

impl Field {
    pub const fn u8(name: &'static str) -> Self {
        Self {
            name,
            width: Width::U8,
        }
    }

    pub const fn u16(name: &'static str) -> Self {
        Self {
            name,
            width: Width::U16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub packing: Packing,
    pub byte_order: ByteOrder,
}

impl Layout {
    pub fn size(&self) -> usize {
        let Some(last) = self.fields.last() else {
            return 0;
        };
        let end = self.offsets().last().copied().unwrap_or(0) + last.width.bytes();

        match self.packing {
            Packing::Packed => end,
            Packing::Natural => align_up(end, self.max_width()),
        }
    }

    pub fn offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.fields.len());
        let mut offset = 0;
        for field in self.fields {
            if self.packing == Packing::Natural {
                offset = align_up(offset, field.width.bytes());
            }
            offsets.push(offset);
            offset += field.width.bytes();
        }
        offsets
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Interprets exactly `self.size()` bytes as field values, in field order.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>> {
        let size = self.size();
        if bytes.len() < size {
            return Err(Error::IncompleteRead {
                expected: size,
                got: bytes.len(),
            });
        }
        if bytes.len() > size {
            return Err(Error::FrameLength {
                expected: size,
                got: bytes.len(),
            });
        }

        let values = self
            .fields
            .iter()
            .zip(self.offsets())
            .map(|(field, offset)| match field.width {
                Width::U8 => u16::from(bytes[offset]),
                Width::U16 => {
                    let raw = [bytes[offset], bytes[offset + 1]];
                    match self.byte_order {
                        ByteOrder::Little => u16::from_le_bytes(raw),
                        ByteOrder::Big => u16::from_be_bytes(raw),
                    }
                }
            })
            .collect();

        Ok(values)
    }

    /// Inverse of [`Layout::decode`]. Padding bytes are written as zero.
    pub fn encode(&self, values: &[u16]) -> Result<Vec<u8>> {
        if values.len() != self.fields.len() {
            return Err(Error::FieldCount {
                expected: self.fields.len(),
                got: values.len(),
            });
        }

        let mut bytes = vec![0u8; self.size()];
        for ((field, offset), &value) in self.fields.iter().zip(self.offsets()).zip(values) {
            if value > field.width.max_value() {
                return Err(Error::FieldOverflow {
                    field: field.name,
                    value,
                });
            }
            match field.width {
                Width::U8 => bytes[offset] = value as u8,
                Width::U16 => {
                    let raw = match self.byte_order {
                        ByteOrder::Little => value.to_le_bytes(),
                        ByteOrder::Big => value.to_be_bytes(),
                    };
                    bytes[offset..offset + 2].copy_from_slice(&raw);
                }
            }
        }

        Ok(bytes)
    }

    fn max_width(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.width.bytes())
            .max()
            .unwrap_or(1)
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: Layout = Layout {
        name: "mixed",
        fields: &[Field::u8("a"), Field::u16("b"), Field::u8("c")],
        packing: Packing::Natural,
        byte_order: ByteOrder::Little,
    };

    #[test]
    fn natural_packing_inserts_padding() {
        assert_eq!(MIXED.offsets(), vec![0, 2, 4]);
        assert_eq!(MIXED.size(), 6);
    }

    #[test]
    fn packed_layout_has_no_padding() {
        let packed = Layout {
            packing: Packing::Packed,
            ..MIXED
        };
        assert_eq!(packed.offsets(), vec![0, 1, 3]);
        assert_eq!(packed.size(), 4);
    }

    #[test]
    fn natural_padding_is_zero_on_encode() {
        let bytes = MIXED.encode(&[0xff, 0x0102, 0x7f]).unwrap();
        assert_eq!(bytes, vec![0xff, 0x00, 0x02, 0x01, 0x7f, 0x00]);
        assert_eq!(MIXED.decode(&bytes).unwrap(), vec![0xff, 0x0102, 0x7f]);
    }

    #[test]
    fn big_endian_fields() {
        const BIG: Layout = Layout {
            name: "big",
            fields: &[Field::u16("a"), Field::u8("b")],
            packing: Packing::Packed,
            byte_order: ByteOrder::Big,
        };
        assert_eq!(BIG.decode(&[0x01, 0x02, 0x03]).unwrap(), vec![0x0102, 0x03]);
        assert_eq!(BIG.encode(&[0x0a0b, 0x0c]).unwrap(), vec![0x0a, 0x0b, 0x0c]);
    }

    #[test]
    fn decode_rejects_wrong_lengths() {
        assert!(matches!(
            MIXED.decode(&[0; 5]),
            Err(Error::IncompleteRead {
                expected: 6,
                got: 5
            })
        ));
        assert!(matches!(
            MIXED.decode(&[0; 7]),
            Err(Error::FrameLength {
                expected: 6,
                got: 7
            })
        ));
    }

    #[test]
    fn encode_checks_values() {
        assert!(matches!(
            MIXED.encode(&[1, 2]),
            Err(Error::FieldCount {
                expected: 3,
                got: 2
            })
        ));
        assert!(matches!(
            MIXED.encode(&[256, 0, 0]),
            Err(Error::FieldOverflow {
                field: "a",
                value: 256
            })
        ));
    }
}
