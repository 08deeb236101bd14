//! Parking lot state and spot allocation
//!
//! The lot owns every parked vehicle. Arrivals are placed with a weighted
//! random draw that favours spots close to an entrance and on low floors;
//! departures happen when a vehicle's remaining time runs out during `tick`.

use log::debug;
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

use super::types::{floor_of, SpotIndex};
use super::vehicle::Vehicle;

/// Reasons an arriving vehicle could not be parked.
///
/// Both are recoverable: the caller drops the arrival and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParkError {
    #[error("parking lot is full")]
    LotFull,
    #[error("no available spots")]
    NoAvailableSpot,
}

impl ParkError {
    /// Callers skip the arrival and keep simulating
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParkError::LotFull | ParkError::NoAvailableSpot)
    }
}

/// Errors raised when constructing a lot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotConfigError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("at least one entrance is required")]
    NoEntrances,
}

/// A vehicle that left the lot during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub index: SpotIndex,
    pub vehicle: Vehicle,
}

/// A multi-entrance parking lot
#[derive(Debug, Clone)]
pub struct ParkingLot {
    spots: Vec<Option<Vehicle>>,
    /// Successful parks per spot, never reset
    popularity: Vec<u64>,
    entrances: BTreeSet<SpotIndex>,
    /// Distance from each spot to its nearest entrance. Entrances never
    /// change, so this is computed once.
    distances: Vec<usize>,
}

impl ParkingLot {
    /// Create an empty lot.
    ///
    /// Entrances are reference points and may lie outside `0..capacity`
    /// (an entrance at `capacity` models a gate past the last spot).
    pub fn new(
        capacity: usize,
        entrances: impl IntoIterator<Item = SpotIndex>,
    ) -> Result<Self, LotConfigError> {
        if capacity == 0 {
            return Err(LotConfigError::ZeroCapacity);
        }
        let entrances: BTreeSet<SpotIndex> = entrances.into_iter().collect();
        if entrances.is_empty() {
            return Err(LotConfigError::NoEntrances);
        }

        let distances = (0..capacity)
            .map(|index| nearest_entrance_distance(&entrances, index))
            .collect();

        Ok(Self {
            spots: vec![None; capacity],
            popularity: vec![0; capacity],
            entrances,
            distances,
        })
    }

    pub fn capacity(&self) -> usize {
        self.spots.len()
    }

    pub fn entrances(&self) -> impl Iterator<Item = SpotIndex> + '_ {
        self.entrances.iter().copied()
    }

    pub fn popularity(&self) -> &[u64] {
        &self.popularity
    }

    pub fn is_full(&self) -> bool {
        self.spots.iter().all(Option::is_some)
    }

    /// Out of range indices are reported as unoccupied
    pub fn is_occupied(&self, index: SpotIndex) -> bool {
        self.vehicle_at(index).is_some()
    }

    pub fn vehicle_at(&self, index: SpotIndex) -> Option<&Vehicle> {
        self.spots.get(index).and_then(Option::as_ref)
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|spot| spot.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    /// Distance from a spot to the closest entrance
    pub fn entrance_distance(&self, index: SpotIndex) -> Option<usize> {
        self.distances.get(index).copied()
    }

    /// Selection weight of a spot, ignoring whether it is free.
    ///
    /// `1/(distance+1) * 1/(floor+1)`, evaluated in that order so the float
    /// result is stable.
    pub fn spot_weight(&self, index: SpotIndex) -> Option<f64> {
        let distance = self.entrance_distance(index)?;
        Some(1.0 / (distance as f64 + 1.0) * (1.0 / (floor_of(index) + 1) as f64))
    }

    /// Every spot in index order with its vehicle, if any
    pub fn snapshot(&self) -> Vec<(SpotIndex, Option<&Vehicle>)> {
        self.spots
            .iter()
            .enumerate()
            .map(|(index, spot)| (index, spot.as_ref()))
            .collect()
    }

    /// Occupied spots only, in index order
    pub fn parked(&self) -> impl Iterator<Item = (SpotIndex, &Vehicle)> + '_ {
        self.spots
            .iter()
            .enumerate()
            .filter_map(|(index, spot)| spot.as_ref().map(|vehicle| (index, vehicle)))
    }

    /// Occupancy flags split into rows of `width` spots
    pub fn occupancy_rows(&self, width: usize) -> Vec<Vec<bool>> {
        self.spots
            .chunks(width.max(1))
            .map(|row| row.iter().map(Option::is_some).collect())
            .collect()
    }

    /// Park a vehicle and return the chosen spot.
    ///
    /// Nothing is mutated on failure.
    pub fn park<R: Rng + ?Sized>(
        &mut self,
        vehicle: Vehicle,
        rng: &mut R,
    ) -> Result<SpotIndex, ParkError> {
        if self.is_full() {
            return Err(ParkError::LotFull);
        }

        let candidates: Vec<(SpotIndex, f64)> = self
            .spots
            .iter()
            .enumerate()
            .filter(|(_, spot)| spot.is_none())
            .filter_map(|(index, _)| self.spot_weight(index).map(|weight| (index, weight)))
            .collect();

        let index = weighted_pick(&candidates, rng).ok_or(ParkError::NoAvailableSpot)?;

        debug!("→ {} parked at spot {}", vehicle, index);
        self.spots[index] = Some(vehicle);
        self.popularity[index] += 1;
        Ok(index)
    }

    /// Advance one minute.
    ///
    /// Every parked vehicle counts down once; those whose time is up leave in
    /// the same tick and are returned in index order.
    pub fn tick(&mut self) -> Vec<Departure> {
        let mut departures = Vec::new();

        for (index, spot) in self.spots.iter_mut().enumerate() {
            let leaving = spot.as_mut().is_some_and(Vehicle::count_down);
            if !leaving {
                continue;
            }
            if let Some(vehicle) = spot.take() {
                debug!("← {} removed from spot {}", vehicle, index);
                departures.push(Departure { index, vehicle });
            }
        }

        departures
    }
}

fn nearest_entrance_distance(entrances: &BTreeSet<SpotIndex>, index: SpotIndex) -> usize {
    let below = entrances.range(..=index).next_back();
    let above = entrances.range(index..).next();
    below
        .into_iter()
        .chain(above)
        .map(|entrance| entrance.abs_diff(index))
        .min()
        // `new` rejects an empty entrance set
        .unwrap_or(0)
}

/// Single weighted draw over `(index, weight)` pairs.
///
/// Draws in `[0, total)` and walks the candidates in the given order, taking
/// the first whose running sum reaches the draw. Float residue can leave the
/// sum just short of the draw; the last candidate wins in that case.
fn weighted_pick<R: Rng + ?Sized>(candidates: &[(SpotIndex, f64)], rng: &mut R) -> Option<SpotIndex> {
    let (last, _) = *candidates.last()?;
    let total: f64 = candidates.iter().map(|(_, weight)| weight).sum();
    if total.is_nan() || total <= 0.0 {
        return Some(last);
    }

    let draw = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for &(index, weight) in candidates {
        cumulative += weight;
        if cumulative >= draw {
            return Some(index);
        }
    }
    Some(last)
}
