//! Parking Simulation Library
//!
//! Simulates occupancy of a multi-entrance parking lot and produces periodic
//! telemetry snapshots of its state.

pub mod simulation;
pub mod telemetry;
