use serde::{Deserialize, Serialize};

/// One vehicle extracted from a classifieds listing page.
///
/// `horse_power == 0` marks a listing whose horsepower could not be parsed;
/// such records are dropped before export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub make: String,
    /// Empty when none of the make's known models matched the title.
    pub model: String,
    pub fuel_type: String,
    pub gear_type: String,
    pub horse_power: u32,
    /// Mileage in kilometres.
    pub range: u32,
    /// Kept as text: sources occasionally emit partial values.
    pub year: String,
    pub price: u32,
}

impl Listing {
    /// Whether the record carries a usable horsepower figure.
    #[must_use]
    pub fn has_horse_power(&self) -> bool {
        self.horse_power > 0
    }
}
