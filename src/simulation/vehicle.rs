//! Vehicle record
//!
//! Identity attributes are fixed at creation. Only the remaining stay is
//! mutated, and only by the lot that owns the vehicle.

use std::fmt;

use super::types::Minutes;

/// A vehicle that is, or is about to be, parked in the lot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    brand: String,
    color: String,
    luxury_score: u8,
    /// Minutes left before the vehicle leaves
    remaining_time: Minutes,
    /// Length of stay the vehicle arrived with
    desired_duration: Minutes,
    prefers_good_spot: bool,
}

impl Vehicle {
    pub fn new(
        brand: impl Into<String>,
        color: impl Into<String>,
        luxury_score: u8,
        duration: Minutes,
        prefers_good_spot: bool,
    ) -> Self {
        Self {
            brand: brand.into(),
            color: color.into(),
            luxury_score,
            remaining_time: duration,
            desired_duration: duration,
            prefers_good_spot,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn luxury_score(&self) -> u8 {
        self.luxury_score
    }

    pub fn remaining_time(&self) -> Minutes {
        self.remaining_time
    }

    pub fn desired_duration(&self) -> Minutes {
        self.desired_duration
    }

    /// Reporting-only flag; allocation does not look at it
    pub fn prefers_good_spot(&self) -> bool {
        self.prefers_good_spot
    }

    /// Count down one minute, returning true once the stay is over
    pub(crate) fn count_down(&mut self) -> bool {
        self.remaining_time -= 1;
        self.remaining_time <= 0
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}% luxury, {} minutes left, {} parking)",
            self.color,
            self.brand,
            self.luxury_score,
            self.remaining_time,
            if self.prefers_good_spot { "good" } else { "bad" }
        )
    }
}
