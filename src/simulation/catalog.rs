//! Default vehicle tables and lot layout
//!
//! These mirror the historical deployment: a 200 spot lot over two floors with
//! entrances at both ends and in the middle.

use super::types::{Minutes, SpotIndex};

/// Spots in the default lot
pub const DEFAULT_CAPACITY: usize = 200;

/// Entrance reference points of the default lot
pub const DEFAULT_ENTRANCES: [SpotIndex; 3] = [0, 100, 200];

/// Shortest and longest stay in minutes, inclusive
pub const DEFAULT_DURATION_RANGE: (Minutes, Minutes) = (15, 140);

/// Wall clock the simulation starts at
pub const DEFAULT_START_TIME: &str = "7:00AM";

/// Brands drawn uniformly. Repeated entries are intentionally more likely.
pub const CAR_BRANDS: [&str; 38] = [
    "BMW",
    "Peugeot",
    "Toyota",
    "Ford",
    "Volkswagen",
    "Opel",
    "Citroen",
    "Seat",
    "Renault",
    "Audi",
    "Honda",
    "Nissan",
    "Mercedes-Benz",
    "Hyundai",
    "Kia",
    "Mazda",
    "Lexus",
    "Jeep",
    "Volvo",
    "Fiat",
    "Mitsubishi",
    "Jeep",
    "Mini",
    "Dodge",
    "Cadillac",
    "Chrysler",
    "Dacia",
    "Suzuki",
    "Alfa Romeo",
    "Rolls-Royce",
    "Maserati",
    "Porsche",
    "Volvo",
    "Jaguar",
    "Bentley",
    "Ferrari",
    "Lamborghini",
    "Bugatti",
];

pub const CAR_COLORS: [&str; 11] = [
    "Red", "Blue", "Green", "Yellow", "Black", "White", "Silver", "Gray", "Brown", "Orange",
    "Purple",
];

/// Inclusive luxury score ranges for premium brands
pub const BRAND_LUXURY_RANGES: [(&str, (u8, u8)); 13] = [
    ("BMW", (70, 100)),
    ("Mercedes-Benz", (80, 100)),
    ("Audi", (70, 90)),
    ("Lexus", (75, 95)),
    ("Rolls-Royce", (90, 100)),
    ("Maserati", (80, 95)),
    ("Porsche", (75, 90)),
    ("Jaguar", (70, 85)),
    ("Bentley", (85, 100)),
    ("Ferrari", (90, 100)),
    ("Lamborghini", (90, 100)),
    ("Bugatti", (95, 100)),
    ("Cadillac", (70, 90)),
];
