//! Form-level rating aggregation.
//!
//! The final rating of a form is the unweighted mean of its line averages.
//! Because every line average is a sum of three integer scores divided by
//! three, the mean is computed as one division of the grand score total by
//! `3 * lines`. That keeps values such as exactly 4.5 exact, which matters
//! because the banding boundaries are inclusive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjectivalRating, RatingLine};

use super::BandingTable;

/// The aggregated rating of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOutcome {
    /// Unweighted mean of the line averages.
    pub final_rating: Decimal,
    /// Band of `final_rating` under `table`.
    pub adjectival_rating: AdjectivalRating,
    /// The banding table applied.
    pub table: BandingTable,
    /// Number of lines aggregated.
    pub lines_rated: usize,
}

/// Checks that every present sub-score is within 1-5.
pub fn validate_scores(lines: &[RatingLine]) -> EngineResult<()> {
    for line in lines {
        if let Some((name, score)) = line.scores.out_of_range() {
            return Err(EngineError::validation(
                format!("lines[{}].scores.{}", line.id, name),
                format!("score {} is outside 1-5", score),
            ));
        }
    }
    Ok(())
}

/// Computes the final rating and adjectival band of a set of rating lines.
///
/// # Errors
///
/// - `Validation` if there are no lines or a score is outside 1-5.
/// - `IncompleteRating` if any line is missing a sub-score. Unscored lines
///   are never skipped.
///
/// # Examples
///
/// ```
/// use hr_engine::models::{AdjectivalRating, LineCategory, LineContent, RatingLine, SubScores};
/// use hr_engine::review::{BandingTable, compute_final_rating};
/// use rust_decimal::Decimal;
///
/// let content = LineContent {
///     category: LineCategory::CoreFunction,
///     output: "Payroll".to_string(),
///     success_indicator: "On time".to_string(),
///     accomplishment: String::new(),
/// };
/// let mut first = RatingLine::new("l1", content.clone());
/// first.scores = SubScores::new(4, 5, 3); // average 4.0
/// let mut second = RatingLine::new("l2", content);
/// second.scores = SubScores::new(5, 5, 5); // average 5.0
///
/// let outcome = compute_final_rating(&[first, second], BandingTable::Individual).unwrap();
/// assert_eq!(outcome.final_rating, Decimal::new(45, 1));
/// assert_eq!(outcome.adjectival_rating, AdjectivalRating::Outstanding);
/// ```
pub fn compute_final_rating(
    lines: &[RatingLine],
    table: BandingTable,
) -> EngineResult<RatingOutcome> {
    if lines.is_empty() {
        return Err(EngineError::validation("lines", "form has no rating lines"));
    }
    validate_scores(lines)?;

    let unrated_lines: Vec<String> = lines
        .iter()
        .filter(|l| !l.scores.is_complete())
        .map(|l| l.id.clone())
        .collect();
    if !unrated_lines.is_empty() {
        return Err(EngineError::IncompleteRating { unrated_lines });
    }

    let grand_total: u32 = lines.iter().filter_map(|l| l.scores.total()).sum();
    let score_count = lines.len() * 3;
    let final_rating = Decimal::from(grand_total) / Decimal::from(score_count);

    Ok(RatingOutcome {
        final_rating,
        adjectival_rating: table.band(final_rating),
        table,
        lines_rated: lines.len(),
    })
}
