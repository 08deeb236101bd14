//! Shared constants and aliases for the parking simulation

/// Index of a spot in the lot, `0..capacity`
pub type SpotIndex = usize;

/// Simulated minutes (remaining stay, desired stay)
pub type Minutes = i32;

/// Number of consecutive spots that make up one floor
pub const FLOOR_SIZE: usize = 100;

/// Probability that a new vehicle wants a "good" spot
pub const GOOD_SPOT_PROBABILITY: f64 = 0.8;

/// Luxury range used for brands without an entry in the luxury table
pub const DEFAULT_LUXURY_RANGE: (u8, u8) = (0, 50);

/// Upper bound of any luxury score
pub const MAX_LUXURY: u8 = 100;

/// Minutes in one simulated day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Floor a spot belongs to (0 = ground level)
pub fn floor_of(index: SpotIndex) -> usize {
    index / FLOOR_SIZE
}
