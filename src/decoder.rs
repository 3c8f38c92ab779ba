use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::record::{LineFormat, MeasurementRecord, Reading, Record, SimpleRecord, TextRecord};

/// Blocks until `layout.size()` bytes have been read, then decodes them.
pub fn read_frame<R: Read + ?Sized>(reader: &mut R, layout: &Layout) -> Result<Vec<u16>> {
    let mut buf = vec![0u8; layout.size()];
    fill(reader, &mut buf)?;
    layout.decode(&buf)
}

pub fn read_record<T: Record, R: Read + ?Sized>(reader: &mut R) -> Result<T> {
    read_frame(reader, &T::LAYOUT).map(|values| T::from_values(&values))
}

fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(Error::IncompleteRead {
                    expected: buf.len(),
                    got: filled,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// A source of decoded readings.
pub trait Decode {
    type Item;

    /// Returns `Ok(None)` once the stream has ended cleanly between items.
    fn decode_next(&mut self) -> Result<Option<Self::Item>>;
}

#[derive(Debug)]
pub struct BinaryDecoder<R, T> {
    reader: R,
    _record: PhantomData<T>,
}

impl<R: Read, T: Record> BinaryDecoder<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            _record: PhantomData,
        }
    }
}

impl<R: Read, T: Record> Decode for BinaryDecoder<R, T> {
    type Item = T;

    fn decode_next(&mut self) -> Result<Option<T>> {
        match read_record(&mut self.reader) {
            Ok(record) => Ok(Some(record)),
            Err(Error::IncompleteRead { got: 0, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug)]
pub struct LineDecoder<R> {
    reader: R,
    format: LineFormat,
    line: Vec<u8>,
}

impl<R: BufRead> LineDecoder<R> {
    pub fn new(reader: R, format: LineFormat) -> Self {
        Self {
            reader,
            format,
            line: Vec::new(),
        }
    }
}

impl<R: BufRead> Decode for LineDecoder<R> {
    type Item = TextRecord;

    fn decode_next(&mut self) -> Result<Option<TextRecord>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&self.line);
        self.format.parse(&line).map(Some)
    }
}

/// What the tools expect to receive on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Full,
    Simple,
    Text(LineFormat),
}

/// Decoder for whichever [`Input`] was selected at startup.
#[derive(Debug)]
pub enum InputDecoder<R> {
    Full(BinaryDecoder<R, MeasurementRecord>),
    Simple(BinaryDecoder<R, SimpleRecord>),
    Text(LineDecoder<BufReader<R>>),
}

impl<R: Read> InputDecoder<R> {
    pub fn new(reader: R, input: Input) -> Self {
        match input {
            Input::Full => InputDecoder::Full(BinaryDecoder::new(reader)),
            Input::Simple => InputDecoder::Simple(BinaryDecoder::new(reader)),
            Input::Text(format) => InputDecoder::Text(LineDecoder::new(BufReader::new(reader), format)),
        }
    }
}

impl<R: Read> Decode for InputDecoder<R> {
    type Item = Reading;

    fn decode_next(&mut self) -> Result<Option<Reading>> {
        Ok(match self {
            InputDecoder::Full(d) => d.decode_next()?.map(Reading::Full),
            InputDecoder::Simple(d) => d.decode_next()?.map(Reading::Simple),
            InputDecoder::Text(d) => d.decode_next()?.map(Reading::Text),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;
    use crate::record::{Fields, MEASUREMENT_LAYOUT};

    /// Hands out at most `chunk` bytes per read, like a serial line.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn sample() -> MeasurementRecord {
        MeasurementRecord {
            temperature: 512,
            moisture: 300,
            light: 42,
            button: 1,
            pump_on: 1,
            heating_on: 0,
            temperature_level: 520,
            moisture_level: 350,
            water_capacity: 1000,
            remaining_water: 640,
            auto_mode: 1,
        }
    }

    #[test]
    fn assembles_record_from_fragments() {
        let bytes = sample().encode().unwrap();
        let mut reader = Trickle {
            data: &bytes,
            chunk: 5,
        };
        let record: MeasurementRecord = read_record(&mut reader).unwrap();
        assert_eq!(record, sample());
    }

    #[test]
    fn truncated_stream_is_incomplete_read() {
        let bytes = sample().encode().unwrap();
        let mut reader = Cursor::new(&bytes[..11]);
        let result: Result<MeasurementRecord> = read_record(&mut reader);
        assert!(matches!(
            result,
            Err(Error::IncompleteRead {
                expected: 18,
                got: 11
            })
        ));
    }

    #[test]
    fn read_frame_takes_layout_at_call_time() {
        let bytes = sample().encode().unwrap();
        let values = read_frame(&mut Cursor::new(&bytes), &MEASUREMENT_LAYOUT).unwrap();
        assert_eq!(values, sample().to_values());
    }

    #[test]
    fn binary_decoder_ends_cleanly_on_boundary() {
        let mut bytes = sample().encode().unwrap();
        bytes.extend(MeasurementRecord::default().encode().unwrap());
        let mut decoder = BinaryDecoder::<_, MeasurementRecord>::new(Cursor::new(bytes));

        assert_eq!(decoder.decode_next().unwrap(), Some(sample()));
        assert_eq!(
            decoder.decode_next().unwrap(),
            Some(MeasurementRecord::default())
        );
        assert_eq!(decoder.decode_next().unwrap(), None);
    }

    #[test]
    fn binary_decoder_reports_trailing_fragment() {
        let mut bytes = sample().encode().unwrap();
        bytes.extend([0x01, 0x02, 0x03]);
        let mut decoder = BinaryDecoder::<_, MeasurementRecord>::new(Cursor::new(bytes));

        decoder.decode_next().unwrap();
        assert!(matches!(
            decoder.decode_next(),
            Err(Error::IncompleteRead { got: 3, .. })
        ));
    }

    #[test]
    fn line_decoder_reads_until_eof() {
        let input = "23.5 512\n24.0 498\r\n24.5 470";
        let mut decoder =
            LineDecoder::new(Cursor::new(input), LineFormat::thermistor_photoresistor());

        let mut seen = Vec::new();
        while let Some(record) = decoder.decode_next().unwrap() {
            seen.push(record.values());
        }
        assert_eq!(
            seen,
            vec![
                vec!["23.5", "512"],
                vec!["24.0", "498"],
                vec!["24.5", "470"]
            ]
        );
    }

    #[test]
    fn line_decoder_continues_after_malformed_line() {
        let input = "garbage\n23.5 512\n";
        let mut decoder =
            LineDecoder::new(Cursor::new(input), LineFormat::thermistor_photoresistor());

        assert!(matches!(
            decoder.decode_next(),
            Err(Error::MalformedLine { .. })
        ));
        assert!(decoder.decode_next().unwrap().is_some());
    }

    #[test]
    fn input_decoder_selects_shape() {
        let bytes = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut decoder = InputDecoder::new(Cursor::new(bytes), Input::Simple);
        let reading = decoder.decode_next().unwrap().unwrap();
        assert_eq!(reading.names(), vec!["temperature", "moisture", "light", "button"]);
        assert_eq!(reading.value("light"), Some(3.0));
    }
}
