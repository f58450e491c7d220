//! Difficulty engine: rule variants, modifier translation, chart loading,
//! and star-rating calculation.
//!
//! Everything here is synchronous; the handler runs it on the blocking pool.

pub mod calculator;
pub mod chart;
pub mod error;
pub mod mods;
pub mod ruleset;

pub use calculator::{DifficultyAttributes, DifficultyCalculator, StrainCalculator};
pub use chart::{ChartDifficulty, ChartLoader, FlatFileChartLoader, WorkingChart};
pub use error::{CalculationError, ChartError};
pub use mods::{LegacyMods, Mod};
pub use ruleset::{BuiltinRuleset, Ruleset, RulesetKind, RulesetTable};

use legacy_ipc_core::protocol::DifficultyCalculationResponse;

/// Handler result plus the internal reason for a zero rating, if any.
///
/// Only `response` goes on the wire; `failure` exists so logs can tell a
/// failed calculation from a chart that is legitimately rated zero.
#[derive(Debug)]
pub struct CalculationOutcome {
    pub response: DifficultyCalculationResponse,
    pub failure: Option<CalculationError>,
}

impl CalculationOutcome {
    /// A successful rating. Non-finite or negative values become a
    /// `Calculation` failure.
    pub fn rated(star_rating: f64) -> Self {
        Self {
            response: DifficultyCalculationResponse { star_rating },
            failure: None,
        }
        .checked()
    }

    pub fn failed(err: CalculationError) -> Self {
        Self {
            response: DifficultyCalculationResponse::default(),
            failure: Some(err),
        }
    }

    /// Enforce the wire invariant: a failure always carries a zero rating and
    /// a success carries a finite, non-negative one.
    pub fn checked(self) -> Self {
        let star_rating = self.response.star_rating;
        match self.failure {
            Some(err) => Self::failed(err),
            None if star_rating.is_finite() && star_rating >= 0.0 => Self {
                response: self.response,
                failure: None,
            },
            None => Self::failed(CalculationError::Calculation(format!(
                "star rating out of range: {star_rating}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_keeps_valid_ratings() {
        let outcome = CalculationOutcome::rated(4.25);
        assert!(outcome.failure.is_none());
        assert_eq!(outcome.response.star_rating, 4.25);

        assert!(CalculationOutcome::rated(0.0).failure.is_none());
    }

    #[test]
    fn out_of_range_rating_becomes_failure() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.5] {
            let outcome = CalculationOutcome::rated(bad);
            assert_eq!(outcome.response.star_rating, 0.0, "{bad}");
            assert!(
                matches!(outcome.failure, Some(CalculationError::Calculation(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn checked_zeroes_rating_of_failed_outcome() {
        let outcome = CalculationOutcome {
            response: DifficultyCalculationResponse { star_rating: 3.0 },
            failure: Some(CalculationError::InvalidRulesetId(9)),
        }
        .checked();
        assert_eq!(outcome.response.star_rating, 0.0);
        assert!(matches!(outcome.failure, Some(CalculationError::InvalidRulesetId(9))));
    }

    #[test]
    fn checked_catches_literal_nan() {
        let outcome = CalculationOutcome {
            response: DifficultyCalculationResponse { star_rating: f64::NAN },
            failure: None,
        }
        .checked();
        assert_eq!(outcome.response.star_rating, 0.0);
        assert!(outcome.failure.is_some());
    }
}
