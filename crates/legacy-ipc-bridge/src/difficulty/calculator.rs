//! Difficulty calculators.
//!
//! `StrainCalculator` is the reference engine shipped with the bridge: hit
//! objects are bucketed into fixed strain sections, the busiest sections are
//! weighted highest, and the result is scaled by overall difficulty.

use super::chart::WorkingChart;
use super::error::CalculationError;
use super::mods::Mod;
use super::ruleset::RulesetKind;

/// Strain section length in (rate-adjusted) milliseconds.
pub const SECTION_LENGTH_MS: f64 = 400.0;

/// Weight decay between consecutive peaks (sorted descending).
pub const DECAY_WEIGHT: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyAttributes {
    pub star_rating: f64,
    pub object_count: usize,
    pub clock_rate: f64,
}

pub trait DifficultyCalculator: Send + Sync {
    fn calculate(
        &self,
        chart: &WorkingChart,
        mods: &[Mod],
    ) -> Result<DifficultyAttributes, CalculationError>;
}

#[derive(Debug, Clone, Copy)]
pub struct StrainCalculator {
    multiplier: f64,
}

impl StrainCalculator {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    pub fn for_ruleset(kind: RulesetKind) -> Self {
        let multiplier = match kind {
            RulesetKind::Osu => 0.75,
            RulesetKind::Taiko => 0.7,
            RulesetKind::Catch => 0.72,
            RulesetKind::Mania => 0.8,
        };
        Self::new(multiplier)
    }
}

/// First rate-changing mod wins; rate-changing mods are mutually exclusive.
pub fn clock_rate(mods: &[Mod]) -> f64 {
    mods.iter().find_map(|m| m.clock_rate()).unwrap_or(1.0)
}

/// Overall difficulty after HardRock/Easy.
pub fn adjusted_overall_difficulty(od: f64, mods: &[Mod]) -> f64 {
    if mods.contains(&Mod::HardRock) {
        (od * 1.4).min(10.0)
    } else if mods.contains(&Mod::Easy) {
        od * 0.5
    } else {
        od
    }
}

impl DifficultyCalculator for StrainCalculator {
    fn calculate(
        &self,
        chart: &WorkingChart,
        mods: &[Mod],
    ) -> Result<DifficultyAttributes, CalculationError> {
        let rate = clock_rate(mods);
        let object_count = chart.hit_times.len();

        let Some(&first) = chart.hit_times.first() else {
            return Ok(DifficultyAttributes {
                star_rating: 0.0,
                object_count,
                clock_rate: rate,
            });
        };

        // hit_times is sorted, so equal sections are contiguous.
        let mut peaks: Vec<f64> = Vec::new();
        let mut current: Option<(i64, u32)> = None;
        for &t in &chart.hit_times {
            let section = (((t - first) / rate) / SECTION_LENGTH_MS).floor() as i64;
            current = match current {
                Some((s, n)) if s == section => Some((s, n + 1)),
                Some((_, n)) => {
                    peaks.push(f64::from(n));
                    Some((section, 1))
                }
                None => Some((section, 1)),
            };
        }
        if let Some((_, n)) = current {
            peaks.push(f64::from(n));
        }

        peaks.sort_by(|a, b| b.total_cmp(a));
        let mut weight = 1.0;
        let mut weighted = 0.0;
        for peak in peaks {
            weighted += peak * weight;
            weight *= DECAY_WEIGHT;
        }

        let od = adjusted_overall_difficulty(chart.difficulty.overall_difficulty, mods);
        let star_rating = self.multiplier * weighted.sqrt() * (1.0 + (od - 5.0) / 50.0);

        if !star_rating.is_finite() || star_rating < 0.0 {
            return Err(CalculationError::Calculation(format!(
                "star rating out of range: {star_rating}"
            )));
        }

        Ok(DifficultyAttributes {
            star_rating,
            object_count,
            clock_rate: rate,
        })
    }
}
