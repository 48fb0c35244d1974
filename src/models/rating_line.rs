//! Rating line model.
//!
//! A [`RatingLine`] is one commitment item on a performance form: what the
//! employee or office commits to deliver, how success is measured, what was
//! actually accomplished, and the rater's 1-5 sub-scores.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest valid sub-score.
pub const MIN_SCORE: u8 = 1;

/// Highest valid sub-score.
pub const MAX_SCORE: u8 = 5;

/// The function group a commitment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    /// Strategic priorities set by the agency.
    StrategicPriority,
    /// Core functions of the position or office.
    CoreFunction,
    /// Support functions.
    SupportFunction,
}

/// The three sub-scores of a rating line.
///
/// Each score is on the 1-5 scale and may be absent until the rater
/// enters it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    /// Quantity (Q1).
    #[serde(default)]
    pub quantity: Option<u8>,
    /// Quality/efficiency (E2).
    #[serde(default)]
    pub quality: Option<u8>,
    /// Timeliness (T3).
    #[serde(default)]
    pub timeliness: Option<u8>,
}

impl SubScores {
    /// Creates a fully scored set.
    pub fn new(quantity: u8, quality: u8, timeliness: u8) -> Self {
        Self {
            quantity: Some(quantity),
            quality: Some(quality),
            timeliness: Some(timeliness),
        }
    }

    /// Returns true when all three scores are present.
    pub fn is_complete(&self) -> bool {
        self.total().is_some()
    }

    /// Sum of the three scores, or `None` if any is missing.
    pub fn total(&self) -> Option<u32> {
        Some(u32::from(self.quantity?) + u32::from(self.quality?) + u32::from(self.timeliness?))
    }

    /// Arithmetic mean of the three scores, or `None` if any is missing.
    ///
    /// The mean is a `Decimal` limited to 28 decimal places, so a total that
    /// is not a multiple of three does not come back exact (7/3 is
    /// 2.3333333333333333333333333333). Only the form-level rating, which
    /// divides the score total once, is exact at band boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::SubScores;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(SubScores::new(4, 5, 3).average(), Some(Decimal::from(4)));
    ///
    /// let partial = SubScores { quantity: Some(4), quality: None, timeliness: Some(3) };
    /// assert_eq!(partial.average(), None);
    /// ```
    pub fn average(&self) -> Option<Decimal> {
        self.total()
            .map(|total| Decimal::from(total) / Decimal::from(3))
    }

    /// Returns the first present score that falls outside 1-5, with its name.
    pub fn out_of_range(&self) -> Option<(&'static str, u8)> {
        [
            ("quantity", self.quantity),
            ("quality", self.quality),
            ("timeliness", self.timeliness),
        ]
        .into_iter()
        .find_map(|(name, score)| {
            score
                .filter(|s| !(MIN_SCORE..=MAX_SCORE).contains(s))
                .map(|s| (name, s))
        })
    }
}

/// Owner-editable content of a rating line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineContent {
    /// Function group.
    pub category: LineCategory,
    /// Major final output description.
    pub output: String,
    /// Success indicator (target plus measure).
    pub success_indicator: String,
    /// Actual accomplishment narrative.
    #[serde(default)]
    pub accomplishment: String,
}

/// One commitment item on a performance form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLine {
    /// Identifier of the line, unique within its form.
    pub id: String,
    /// Function group.
    pub category: LineCategory,
    /// Major final output description.
    pub output: String,
    /// Success indicator (target plus measure).
    pub success_indicator: String,
    /// Actual accomplishment narrative.
    #[serde(default)]
    pub accomplishment: String,
    /// Rater's sub-scores.
    #[serde(default)]
    pub scores: SubScores,
    /// Rater's remarks.
    #[serde(default)]
    pub remarks: Option<String>,
}

impl RatingLine {
    /// Creates an unscored line from owner content.
    pub fn new(id: impl Into<String>, content: LineContent) -> Self {
        Self {
            id: id.into(),
            category: content.category,
            output: content.output,
            success_indicator: content.success_indicator,
            accomplishment: content.accomplishment,
            scores: SubScores::default(),
            remarks: None,
        }
    }

    /// The line average; `None` until all three sub-scores are present.
    pub fn average(&self) -> Option<Decimal> {
        self.scores.average()
    }

    /// Replaces the owner-editable content, leaving scores untouched.
    pub fn apply_content(&mut self, content: LineContent) {
        self.category = content.category;
        self.output = content.output;
        self.success_indicator = content.success_indicator;
        self.accomplishment = content.accomplishment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_content() -> LineContent {
        LineContent {
            category: LineCategory::CoreFunction,
            output: "Processed leave applications".to_string(),
            success_indicator: "100% of applications acted on within 3 days".to_string(),
            accomplishment: String::new(),
        }
    }

    #[test]
    fn test_average_of_complete_scores() {
        assert_eq!(SubScores::new(4, 5, 3).average(), Some(dec("4")));
        assert_eq!(SubScores::new(5, 5, 5).average(), Some(dec("5")));
        assert_eq!(SubScores::new(3, 3, 4).average(), Some(dec("10") / dec("3")));
    }

    #[test]
    fn test_average_of_thirds_is_not_exact() {
        let average = SubScores::new(3, 1, 3).average().unwrap();
        assert_eq!(average, dec("2.3333333333333333333333333333"));
        assert_ne!(average * Decimal::from(3), Decimal::from(7));
    }

    #[test]
    fn test_average_is_none_when_any_score_missing() {
        let missing_each = [
            SubScores {
                quantity: None,
                quality: Some(4),
                timeliness: Some(4),
            },
            SubScores {
                quantity: Some(4),
                quality: None,
                timeliness: Some(4),
            },
            SubScores {
                quantity: Some(4),
                quality: Some(4),
                timeliness: None,
            },
        ];

        for scores in missing_each {
            assert_eq!(scores.average(), None);
            assert!(!scores.is_complete());
        }
    }

    #[test]
    fn test_out_of_range_reports_first_bad_score() {
        let scores = SubScores {
            quantity: Some(3),
            quality: Some(0),
            timeliness: Some(9),
        };
        assert_eq!(scores.out_of_range(), Some(("quality", 0)));
        assert_eq!(SubScores::new(1, 5, 3).out_of_range(), None);
        assert_eq!(SubScores::default().out_of_range(), None);
    }

    #[test]
    fn test_new_line_is_unscored() {
        let line = RatingLine::new("line_1", make_content());
        assert_eq!(line.average(), None);
        assert_eq!(line.scores, SubScores::default());
    }

    #[test]
    fn test_apply_content_keeps_scores() {
        let mut line = RatingLine::new("line_1", make_content());
        line.scores = SubScores::new(4, 4, 4);

        let mut content = make_content();
        content.accomplishment = "412 applications processed".to_string();
        line.apply_content(content);

        assert_eq!(line.accomplishment, "412 applications processed");
        assert_eq!(line.scores, SubScores::new(4, 4, 4));
    }

    #[test]
    fn test_line_category_serialization() {
        let json = serde_json::to_string(&LineCategory::StrategicPriority).unwrap();
        assert_eq!(json, "\"strategic_priority\"");
    }
}
