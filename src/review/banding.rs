//! Adjectival banding of numeric performance ratings.
//!
//! Individual and office-level forms band the same 1-5 scale with different
//! cut-points. The table is always chosen explicitly by the caller; there is
//! no fallback from one table to the other.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::AdjectivalRating;

/// Lower bounds for individual (IPCR) ratings, highest band first.
const INDIVIDUAL_THRESHOLDS: [(Decimal, AdjectivalRating); 4] = [
    (Decimal::from_parts(45, 0, 0, false, 1), AdjectivalRating::Outstanding),
    (Decimal::from_parts(35, 0, 0, false, 1), AdjectivalRating::VerySatisfactory),
    (Decimal::from_parts(25, 0, 0, false, 1), AdjectivalRating::Satisfactory),
    (Decimal::from_parts(15, 0, 0, false, 1), AdjectivalRating::Unsatisfactory),
];

/// Lower bounds for office-level (DPCR/OPCR) ratings after rounding to two
/// decimals, highest band first.
const OFFICE_THRESHOLDS: [(Decimal, AdjectivalRating); 4] = [
    (Decimal::from_parts(451, 0, 0, false, 2), AdjectivalRating::Outstanding),
    (Decimal::from_parts(351, 0, 0, false, 2), AdjectivalRating::VerySatisfactory),
    (Decimal::from_parts(251, 0, 0, false, 2), AdjectivalRating::Satisfactory),
    (Decimal::from_parts(151, 0, 0, false, 2), AdjectivalRating::Unsatisfactory),
];

/// Named banding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandingTable {
    /// IPCR table: inclusive lower bounds 4.5 / 3.5 / 2.5 / 1.5 on the exact rating.
    Individual,
    /// DPCR/OPCR table: rating rounded half-up to two decimals, then
    /// 4.51-5.00 / 3.51-4.50 / 2.51-3.50 / 1.51-2.50 / up to 1.50.
    Office,
}

impl BandingTable {
    /// The band lower bounds, highest first. Anything below the last bound is Poor.
    pub fn thresholds(self) -> &'static [(Decimal, AdjectivalRating)] {
        match self {
            BandingTable::Individual => &INDIVIDUAL_THRESHOLDS,
            BandingTable::Office => &OFFICE_THRESHOLDS,
        }
    }

    /// The value actually compared against the thresholds.
    fn comparable(self, rating: Decimal) -> Decimal {
        match self {
            BandingTable::Individual => rating,
            BandingTable::Office => {
                rating.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }

    /// Maps a numeric rating to its adjectival band.
    ///
    /// Every value maps to exactly one band; values outside 1-5 fall into the
    /// nearest end band.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::AdjectivalRating;
    /// use hr_engine::review::BandingTable;
    /// use rust_decimal::Decimal;
    ///
    /// let rating = Decimal::new(45, 1); // 4.5
    /// assert_eq!(BandingTable::Individual.band(rating), AdjectivalRating::Outstanding);
    /// assert_eq!(BandingTable::Office.band(rating), AdjectivalRating::VerySatisfactory);
    /// ```
    pub fn band(self, rating: Decimal) -> AdjectivalRating {
        let value = self.comparable(rating);
        self.thresholds()
            .iter()
            .find(|(lower_bound, _)| value >= *lower_bound)
            .map(|(_, band)| *band)
            .unwrap_or(AdjectivalRating::Poor)
    }
}
