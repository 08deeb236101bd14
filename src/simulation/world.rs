//! Simulation driver that ties the lot, the vehicle factory and the clock
//! together
//!
//! This is the entry point for running the parking simulation headless.

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::catalog::{DEFAULT_CAPACITY, DEFAULT_DURATION_RANGE, DEFAULT_ENTRANCES, DEFAULT_START_TIME};
use super::parking_lot::{Departure, ParkError, ParkingLot};
use super::schedule::{ArrivalSchedule, SimClock};
use super::types::{Minutes, SpotIndex, FLOOR_SIZE};
use super::vehicle::Vehicle;
use super::vehicle_factory::VehicleFactory;
use crate::telemetry::{LotReport, SessionStart};

/// Settings for building a `SimWorld`
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub capacity: usize,
    pub entrances: Vec<SpotIndex>,
    pub start_time: String,
    pub duration: (Minutes, Minutes),
    /// Publish a report every this many steps
    pub publish_every: u64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            entrances: DEFAULT_ENTRANCES.to_vec(),
            start_time: DEFAULT_START_TIME.to_string(),
            duration: DEFAULT_DURATION_RANGE,
            publish_every: 5,
            seed: None,
        }
    }
}

/// Everything that happened during one step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Lot state at the start of the step
    pub report: LotReport,
    /// Whether `report` is due for publishing
    pub should_publish: bool,
    pub arrivals: Vec<(SpotIndex, Vehicle)>,
    /// Arrivals that found no spot
    pub rejected: usize,
    pub departures: Vec<Departure>,
}

/// The main simulation world
pub struct SimWorld {
    pub lot: ParkingLot,
    pub factory: VehicleFactory,
    pub schedule: ArrivalSchedule,
    pub clock: SimClock,

    /// Steps completed so far
    pub tick_count: u64,
    publish_every: u64,

    /// Cumulative counters for the summary
    pub total_arrivals: u64,
    pub total_rejected: u64,
    pub total_departures: u64,

    /// Single RNG shared by vehicle generation, arrivals and allocation
    rng: StdRng,
}

impl SimWorld {
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let lot = ParkingLot::new(config.capacity, config.entrances.iter().copied())
            .context("Invalid parking lot layout")?;
        let factory = VehicleFactory::default()
            .with_duration(config.duration.0, config.duration.1)
            .context("Invalid parking duration")?;
        let clock = SimClock::parse(&config.start_time).context("Invalid start time")?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self::with_parts(lot, factory, ArrivalSchedule::default(), clock, rng)
            .publish_every(config.publish_every))
    }

    /// Create a world with the default layout and a seeded RNG
    pub fn new_with_seed(seed: u64) -> Result<Self> {
        Self::from_config(&SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        })
    }

    pub fn with_parts(
        lot: ParkingLot,
        factory: VehicleFactory,
        schedule: ArrivalSchedule,
        clock: SimClock,
        rng: StdRng,
    ) -> Self {
        Self {
            lot,
            factory,
            schedule,
            clock,
            tick_count: 0,
            publish_every: 5,
            total_arrivals: 0,
            total_rejected: 0,
            total_departures: 0,
            rng,
        }
    }

    /// 0 is treated as "every step"
    pub fn publish_every(mut self, steps: u64) -> Self {
        self.publish_every = steps.max(1);
        self
    }

    pub fn session_start(&self) -> SessionStart {
        SessionStart::new(&self.lot, &self.clock)
    }

    /// Park one vehicle using the world RNG
    pub fn park(&mut self, vehicle: Vehicle) -> Result<SpotIndex, ParkError> {
        self.lot.park(vehicle, &mut self.rng)
    }

    /// Run one simulated minute.
    ///
    /// The report reflects the lot before this minute's arrivals and
    /// departures. Arrivals are drawn for the hour being entered and capped at
    /// the number of free spots.
    pub fn step(&mut self) -> StepReport {
        let report = LotReport::from_lot(&self.lot, &self.clock);
        let should_publish = self.tick_count % self.publish_every == 0;

        self.clock.advance();

        let drawn = self.schedule.draw_arrivals(self.clock.hour(), &mut self.rng) as usize;
        let to_park = drawn.min(self.lot.free_count());

        let mut arrivals = Vec::with_capacity(to_park);
        let mut rejected = 0;
        for _ in 0..to_park {
            let vehicle = self.factory.create(&mut self.rng);
            let arriving = vehicle.clone();
            match self.park(vehicle) {
                Ok(index) => arrivals.push((index, arriving)),
                Err(e) => {
                    warn!("{} couldn't be parked: {}", arriving, e);
                    rejected += 1;
                }
            }
        }

        let departures = self.lot.tick();
        self.tick_count += 1;

        self.total_arrivals += arrivals.len() as u64;
        self.total_rejected += rejected as u64;
        self.total_departures += departures.len() as u64;
        debug!(
            "{}: {} arrived, {} left, {}/{} occupied",
            self.clock,
            arrivals.len(),
            departures.len(),
            self.lot.occupied_count(),
            self.lot.capacity()
        );

        StepReport {
            report,
            should_publish,
            arrivals,
            rejected,
            departures,
        }
    }

    /// Print a summary of the lot state
    pub fn print_summary(&self) {
        println!("=== Parking Simulation Summary ===");
        println!("Time: {} (tick {})", self.clock, self.tick_count);
        println!(
            "Occupied: {}/{} ({} free)",
            self.lot.occupied_count(),
            self.lot.capacity(),
            self.lot.free_count()
        );
        println!(
            "Arrivals: {}, Rejected: {}, Departures: {}",
            self.total_arrivals, self.total_rejected, self.total_departures
        );

        let mut busiest: Vec<(SpotIndex, u64)> = self
            .lot
            .popularity()
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect();
        busiest.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        if !busiest.is_empty() {
            let top: Vec<String> = busiest
                .iter()
                .take(5)
                .map(|(index, count)| format!("#{}={}", index, count))
                .collect();
            println!("Most popular spots: {}", top.join(", "));
        }
    }

    /// Draw the lot one floor per row: X = occupied, - = free
    pub fn draw_map(&self) {
        for row in self.lot.occupancy_rows(FLOOR_SIZE) {
            let line: String = row
                .iter()
                .map(|occupied| if *occupied { 'X' } else { '-' })
                .collect();
            println!("{}", line);
        }
    }
}
