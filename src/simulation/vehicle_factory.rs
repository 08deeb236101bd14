//! Random vehicle generation
//!
//! The factory holds validated brand/color/luxury tables so that `create`
//! itself can never fail. All randomness comes from the caller's RNG.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

use super::catalog::{BRAND_LUXURY_RANGES, CAR_BRANDS, CAR_COLORS, DEFAULT_DURATION_RANGE};
use super::types::{Minutes, DEFAULT_LUXURY_RANGE, GOOD_SPOT_PROBABILITY, MAX_LUXURY};
use super::vehicle::Vehicle;

/// Errors raised when factory tables are unusable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryConfigError {
    #[error("{table} table must not be empty")]
    EmptyTable { table: &'static str },
    #[error("{field} range invalid (min {min} > max {max})")]
    InvalidRange {
        field: String,
        min: i64,
        max: i64,
    },
    #[error("luxury range for {brand} exceeds 100 (got max {max})")]
    LuxuryOutOfBounds { brand: String, max: u8 },
}

/// Produces vehicles with randomized attributes
#[derive(Debug, Clone)]
pub struct VehicleFactory {
    brands: Vec<String>,
    colors: Vec<String>,
    luxury_ranges: HashMap<String, (u8, u8)>,
    duration: (Minutes, Minutes),
}

impl Default for VehicleFactory {
    fn default() -> Self {
        Self {
            brands: CAR_BRANDS.iter().map(|b| b.to_string()).collect(),
            colors: CAR_COLORS.iter().map(|c| c.to_string()).collect(),
            luxury_ranges: BRAND_LUXURY_RANGES
                .iter()
                .map(|(brand, range)| (brand.to_string(), *range))
                .collect(),
            duration: DEFAULT_DURATION_RANGE,
        }
    }
}

impl VehicleFactory {
    pub fn new(
        brands: Vec<String>,
        colors: Vec<String>,
        luxury_ranges: HashMap<String, (u8, u8)>,
        duration: (Minutes, Minutes),
    ) -> Result<Self, FactoryConfigError> {
        if brands.is_empty() {
            return Err(FactoryConfigError::EmptyTable { table: "brand" });
        }
        if colors.is_empty() {
            return Err(FactoryConfigError::EmptyTable { table: "color" });
        }
        if duration.0 > duration.1 {
            return Err(FactoryConfigError::InvalidRange {
                field: "duration".to_string(),
                min: duration.0.into(),
                max: duration.1.into(),
            });
        }
        for (brand, &(min, max)) in &luxury_ranges {
            if min > max {
                return Err(FactoryConfigError::InvalidRange {
                    field: format!("{brand} luxury"),
                    min: min.into(),
                    max: max.into(),
                });
            }
            if max > MAX_LUXURY {
                return Err(FactoryConfigError::LuxuryOutOfBounds {
                    brand: brand.clone(),
                    max,
                });
            }
        }

        Ok(Self {
            brands,
            colors,
            luxury_ranges,
            duration,
        })
    }

    /// Same tables, different stay range
    pub fn with_duration(mut self, min: Minutes, max: Minutes) -> Result<Self, FactoryConfigError> {
        if min > max {
            return Err(FactoryConfigError::InvalidRange {
                field: "duration".to_string(),
                min: min.into(),
                max: max.into(),
            });
        }
        self.duration = (min, max);
        Ok(self)
    }

    pub fn duration_range(&self) -> (Minutes, Minutes) {
        self.duration
    }

    /// Inclusive luxury range a brand draws from
    pub fn luxury_range(&self, brand: &str) -> (u8, u8) {
        self.luxury_ranges
            .get(brand)
            .copied()
            .unwrap_or(DEFAULT_LUXURY_RANGE)
    }

    /// Create a vehicle.
    ///
    /// Draw order is brand, color, luxury, duration, spot preference, so a
    /// given seed always yields the same vehicle stream.
    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R) -> Vehicle {
        // tables are non-empty once constructed
        let brand = self.brands.choose(rng).map(String::as_str).unwrap_or_default();
        let color = self.colors.choose(rng).map(String::as_str).unwrap_or_default();
        let (luxury_min, luxury_max) = self.luxury_range(brand);
        let luxury = rng.random_range(luxury_min..=luxury_max);
        let duration = rng.random_range(self.duration.0..=self.duration.1);
        let prefers_good_spot = rng.random_bool(GOOD_SPOT_PROBABILITY);

        Vehicle::new(brand, color, luxury, duration, prefers_good_spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_brand_factory(brand: &str, luxury: Option<(u8, u8)>) -> VehicleFactory {
        let mut ranges = HashMap::new();
        if let Some(range) = luxury {
            ranges.insert(brand.to_string(), range);
        }
        VehicleFactory::new(vec![brand.to_string()], vec!["Red".to_string()], ranges, (10, 20))
            .unwrap()
    }

    #[test]
    fn test_luxury_brand_uses_its_range() {
        let factory = single_brand_factory("Bugatti", Some((95, 100)));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let vehicle = factory.create(&mut rng);
            assert!((95..=100).contains(&vehicle.luxury_score()));
        }
    }

    #[test]
    fn test_unknown_brand_uses_default_range() {
        let factory = single_brand_factory("Dacia", None);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let vehicle = factory.create(&mut rng);
            assert!(vehicle.luxury_score() <= 50);
        }
    }

    #[test]
    fn test_duration_sets_both_fields() {
        let factory = single_brand_factory("Kia", None);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let vehicle = factory.create(&mut rng);
            assert_eq!(vehicle.remaining_time(), vehicle.desired_duration());
            assert!((10..=20).contains(&vehicle.remaining_time()));
        }
    }

    #[test]
    fn test_good_spot_preference_is_mostly_true() {
        let factory = VehicleFactory::default();
        let mut rng = StdRng::seed_from_u64(4);
        let good = (0..5000)
            .filter(|_| factory.create(&mut rng).prefers_good_spot())
            .count();
        // 0.8 expected, generous band
        assert!((3700..=4300).contains(&good), "good = {}", good);
    }

    #[test]
    fn test_brand_and_color_come_from_tables() {
        let factory = VehicleFactory::new(
            vec!["Kia".to_string(), "Fiat".to_string()],
            vec!["Red".to_string(), "Blue".to_string(), "Gray".to_string()],
            HashMap::new(),
            (10, 20),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut brands = std::collections::BTreeSet::new();
        let mut colors = std::collections::BTreeSet::new();
        for _ in 0..300 {
            let vehicle = factory.create(&mut rng);
            brands.insert(vehicle.brand().to_string());
            colors.insert(vehicle.color().to_string());
        }
        assert_eq!(brands.into_iter().collect::<Vec<_>>(), vec!["Fiat", "Kia"]);
        assert_eq!(
            colors.into_iter().collect::<Vec<_>>(),
            vec!["Blue", "Gray", "Red"]
        );
    }

    #[test]
    fn test_same_seed_same_vehicles() {
        let factory = VehicleFactory::default();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(factory.create(&mut a), factory.create(&mut b));
        }
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert_eq!(
            VehicleFactory::new(vec![], vec!["Red".into()], HashMap::new(), (1, 2)).unwrap_err(),
            FactoryConfigError::EmptyTable { table: "brand" }
        );
        assert_eq!(
            VehicleFactory::new(vec!["Kia".into()], vec![], HashMap::new(), (1, 2)).unwrap_err(),
            FactoryConfigError::EmptyTable { table: "color" }
        );
        assert!(matches!(
            VehicleFactory::new(vec!["Kia".into()], vec!["Red".into()], HashMap::new(), (5, 2)),
            Err(FactoryConfigError::InvalidRange { .. })
        ));

        let mut ranges = HashMap::new();
        ranges.insert("Kia".to_string(), (90, 120));
        assert!(matches!(
            VehicleFactory::new(vec!["Kia".into()], vec!["Red".into()], ranges, (1, 2)),
            Err(FactoryConfigError::LuxuryOutOfBounds { .. })
        ));
    }
}
