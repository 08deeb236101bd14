//! Telemetry reports and sinks
//!
//! A `LotReport` is the periodic snapshot of the lot: every parked vehicle,
//! the popularity counters and the simulated time. Field names match the JSON
//! documents the dashboard already consumes.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::simulation::{ParkingLot, SimClock, SpotIndex, Vehicle};

/// One parked vehicle as published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkedCarReport {
    pub brand: String,
    pub color: String,
    pub luxury: u8,
    pub spot: SpotIndex,
    pub is_good_parking: bool,
    /// Minutes until the vehicle leaves
    pub exit_time: i32,
    /// Minutes the vehicle planned to stay
    pub time_desired: i32,
}

impl ParkedCarReport {
    pub fn new(spot: SpotIndex, vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand().to_string(),
            color: vehicle.color().to_string(),
            luxury: vehicle.luxury_score(),
            spot,
            is_good_parking: vehicle.prefers_good_spot(),
            exit_time: vehicle.remaining_time(),
            time_desired: vehicle.desired_duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotReport {
    pub parked_cars: Vec<ParkedCarReport>,
    pub popularity: Vec<u64>,
    pub time: String,
}

impl LotReport {
    pub fn from_lot(lot: &ParkingLot, clock: &SimClock) -> Self {
        Self {
            parked_cars: lot
                .parked()
                .map(|(spot, vehicle)| ParkedCarReport::new(spot, vehicle))
                .collect(),
            popularity: lot.popularity().to_vec(),
            time: clock.to_string(),
        }
    }
}

/// First record written by a sink, before any report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStart {
    pub time_connected: String,
    pub capacity: usize,
    pub entrances: Vec<SpotIndex>,
}

impl SessionStart {
    pub fn new(lot: &ParkingLot, clock: &SimClock) -> Self {
        Self {
            time_connected: clock.to_string(),
            capacity: lot.capacity(),
            entrances: lot.entrances().collect(),
        }
    }
}

/// Destination for lot reports
pub trait TelemetrySink {
    fn start(&mut self, _session: &SessionStart) -> Result<()> {
        Ok(())
    }

    fn publish(&mut self, report: &LotReport) -> Result<()>;
}

/// Writes one JSON document per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
    published: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            published: 0,
        }
    }

    pub fn published(&self) -> usize {
        self.published
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value).context("Failed to serialize telemetry")?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .context("Failed to write telemetry")
    }
}

impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn start(&mut self, session: &SessionStart) -> Result<()> {
        self.write_line(session)
    }

    fn publish(&mut self, report: &LotReport) -> Result<()> {
        self.write_line(report)?;
        self.published += 1;
        Ok(())
    }
}

/// Logs a one-line summary instead of the full document
#[derive(Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn start(&mut self, session: &SessionStart) -> Result<()> {
        info!(
            "Telemetry session started at {} ({} spots, entrances {:?})",
            session.time_connected, session.capacity, session.entrances
        );
        Ok(())
    }

    fn publish(&mut self, report: &LotReport) -> Result<()> {
        info!(
            "{} parked cars: {}, total parks: {}",
            report.time,
            report.parked_cars.len(),
            report.popularity.iter().sum::<u64>()
        );
        Ok(())
    }
}
