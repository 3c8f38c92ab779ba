use std::io::Cursor;
use std::sync::atomic::AtomicBool;

use agriculture::{
    clock::Clock,
    decoder::{Input, InputDecoder},
    output::CsvOutput,
    record::{LineFormat, MeasurementRecord, Record},
    session::{self, ErrorPolicy, LoopEnd},
};
use chrono::DateTime;

fn run_to_csv(bytes: Vec<u8>, input: Input, policy: ErrorPolicy) -> (LoopEnd, Vec<String>) {
    let decoder = InputDecoder::new(Cursor::new(bytes), input);
    let mut output = CsvOutput::new(Vec::new(), true);
    let end = session::run(
        decoder,
        &Clock::new(Some(chrono_tz::Tz::UTC)),
        &AtomicBool::new(false),
        policy,
        |reading| output.write(&reading),
    )
    .unwrap();

    let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
    (end, text.lines().map(str::to_string).collect())
}

#[test]
fn binary_records_become_csv_lines() {
    let record = MeasurementRecord {
        temperature: 498,
        moisture: 612,
        light: 87,
        button: 0,
        pump_on: 1,
        heating_on: 0,
        temperature_level: 500,
        moisture_level: 600,
        water_capacity: 1500,
        remaining_water: 1320,
        auto_mode: 1,
    };
    let mut bytes = record.encode().unwrap();
    bytes.extend(record.encode().unwrap());

    let (end, lines) = run_to_csv(bytes, Input::Full, ErrorPolicy::Abort);

    assert_eq!(end, LoopEnd::Exhausted);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "timestamp,temperature,moisture,light,button,pump_on,heating_on,\
         temperature_level,moisture_level,water_capacity,remaining_water,auto_mode"
    );
    for line in &lines[1..] {
        let (timestamp, fields) = line.split_once(',').unwrap();
        let at = DateTime::parse_from_rfc3339(timestamp).unwrap();
        assert_eq!(at.offset().local_minus_utc(), 0);
        assert_eq!(fields, "498,612,87,0,1,0,500,600,1500,1320,1");
    }
}

#[test]
fn text_lines_skip_garbage_when_asked() {
    let input = b"23.5 512\n\xff\xfe\n24.0 498\n".to_vec();

    let (end, lines) = run_to_csv(
        input,
        Input::Text(LineFormat::thermistor_photoresistor()),
        ErrorPolicy::Skip,
    );

    assert_eq!(end, LoopEnd::Exhausted);
    let fields: Vec<&str> = lines
        .iter()
        .map(|l| l.split_once(',').unwrap().1)
        .collect();
    assert_eq!(
        fields,
        vec!["thermistor,photoresistor", "23.5,512", "24.0,498"]
    );
}
