//! Parking lot occupancy simulation
//!
//! The core is `ParkingLot` (spot allocation and departures) and
//! `VehicleFactory` (random arrivals). `SimWorld` drives them minute by minute
//! and can run without any output attached.

mod catalog;
mod parking_lot;
mod schedule;
mod types;
mod vehicle;
mod vehicle_factory;
mod world;

// Re-export public types for external use
pub use catalog::{
    BRAND_LUXURY_RANGES, CAR_BRANDS, CAR_COLORS, DEFAULT_CAPACITY, DEFAULT_DURATION_RANGE,
    DEFAULT_ENTRANCES, DEFAULT_START_TIME,
};
pub use parking_lot::{Departure, LotConfigError, ParkError, ParkingLot};
pub use schedule::{ArrivalSchedule, ClockParseError, SimClock};
pub use types::{
    floor_of, Minutes, SpotIndex, DEFAULT_LUXURY_RANGE, FLOOR_SIZE, GOOD_SPOT_PROBABILITY,
    MAX_LUXURY, MINUTES_PER_DAY,
};
pub use vehicle::Vehicle;
pub use vehicle_factory::{FactoryConfigError, VehicleFactory};
pub use world::{SimConfig, SimWorld, StepReport};
