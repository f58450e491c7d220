//! The difficulty handler is total: every input yields a response.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;
use std::sync::Arc;

use legacy_ipc_bridge::difficulty::{
    CalculationError, DifficultyAttributes, DifficultyCalculator, FlatFileChartLoader,
    LegacyMods, Mod, Ruleset, RulesetKind, RulesetTable, WorkingChart,
};
use legacy_ipc_bridge::dispatch::DifficultyHandler;
use legacy_ipc_bridge::services::DifficultyCalculationHandler;
use legacy_ipc_core::protocol::DifficultyCalculationRequest;

mod common;
use common::{chart_path, reference_rating};

fn req(ruleset_id: i32, mods: i32, beatmap_file: &str) -> DifficultyCalculationRequest {
    DifficultyCalculationRequest {
        ruleset_id,
        mods,
        beatmap_file: beatmap_file.to_owned(),
    }
}

#[tokio::test]
async fn simple_chart_has_known_ratings() {
    // peaks 3,3,2,1 at 1.0x and 4,4,1 at 1.5x; OD 7, osu! multiplier 0.75
    let handler = DifficultyCalculationHandler::builtin();
    let path = chart_path("simple.osu");

    let nomod = handler.handle(req(0, 0, &path)).await.response.star_rating;
    assert!((nomod - 2.212_919_248_413_732_6).abs() < 1e-9, "{nomod}");

    let dt = handler.handle(req(0, 64, &path)).await.response.star_rating;
    assert!((dt - 2.262).abs() < 1e-9, "{dt}");
}

#[tokio::test]
async fn valid_chart_matches_reference_calculator() {
    let handler = DifficultyCalculationHandler::builtin();
    let outcome = handler.handle(req(0, 0, &chart_path("simple.osu"))).await;

    assert!(outcome.failure.is_none(), "{:?}", outcome.failure);
    let expected = reference_rating(0, 0, "simple.osu");
    assert!(expected > 0.0);
    assert_eq!(outcome.response.star_rating, expected);
}

#[tokio::test]
async fn mods_change_the_rating() {
    let handler = DifficultyCalculationHandler::builtin();
    let path = chart_path("simple.osu");

    let nomod = handler.handle(req(0, 0, &path)).await.response.star_rating;
    let dt_bits = LegacyMods::DOUBLE_TIME.bits() as i32;
    let dt = handler.handle(req(0, dt_bits, &path)).await.response.star_rating;
    let nc_bits = (LegacyMods::DOUBLE_TIME | LegacyMods::NIGHTCORE).bits() as i32;
    let nc = handler.handle(req(0, nc_bits, &path)).await.response.star_rating;

    assert!(dt > nomod);
    assert_eq!(dt, nc);
    assert_eq!(dt, reference_rating(0, dt_bits, "simple.osu"));
}

#[tokio::test]
async fn every_ruleset_rates_a_primary_chart() {
    let handler = DifficultyCalculationHandler::builtin();
    for id in 0..=3 {
        let outcome = handler.handle(req(id, 0, &chart_path("simple.osu"))).await;
        assert!(outcome.failure.is_none(), "ruleset {id}: {:?}", outcome.failure);
        assert_eq!(outcome.response.star_rating, reference_rating(id, 0, "simple.osu"));
    }
}

#[tokio::test]
async fn invalid_ruleset_ids_rate_zero() {
    let handler = DifficultyCalculationHandler::builtin();
    for id in [-1, 4, 9, i32::MIN, i32::MAX] {
        let outcome = handler.handle(req(id, 0, &chart_path("simple.osu"))).await;
        assert_eq!(outcome.response.star_rating, 0.0);
        assert!(matches!(outcome.failure, Some(CalculationError::InvalidRulesetId(got)) if got == id));
    }

    let outcome = handler.handle(req(9, 0, "x")).await;
    assert_eq!(outcome.response.star_rating, 0.0);
}

#[tokio::test]
async fn unreadable_charts_rate_zero() {
    let handler = DifficultyCalculationHandler::builtin();
    let dir = tempfile::tempdir().unwrap();

    let mut corrupt = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
    writeln!(corrupt, "this is not a chart").unwrap();

    let missing = dir.path().join("missing.osu");
    let inputs = [
        String::new(),
        missing.to_string_lossy().into_owned(),
        corrupt.path().to_string_lossy().into_owned(),
        dir.path().to_string_lossy().into_owned(),
    ];

    for path in inputs {
        let outcome = handler.handle(req(0, 0, &path)).await;
        assert_eq!(outcome.response.star_rating, 0.0, "path={path:?}");
        assert!(
            matches!(outcome.failure, Some(CalculationError::ChartLoad { .. })),
            "path={path:?}: {:?}",
            outcome.failure
        );
    }
}

#[tokio::test]
async fn mode_specific_chart_only_loads_for_its_ruleset() {
    let handler = DifficultyCalculationHandler::builtin();
    let path = chart_path("taiko_only.osu");

    let taiko = handler.handle(req(1, 0, &path)).await;
    assert!(taiko.failure.is_none());
    assert!(taiko.response.star_rating > 0.0);

    let osu = handler.handle(req(0, 0, &path)).await;
    assert_eq!(osu.response.star_rating, 0.0);
    assert!(osu.failure.is_some());
}

struct BrokenCalculator;

impl DifficultyCalculator for BrokenCalculator {
    fn calculate(&self, _: &WorkingChart, _: &[Mod]) -> Result<DifficultyAttributes, CalculationError> {
        Ok(DifficultyAttributes {
            star_rating: f64::INFINITY,
            object_count: 0,
            clock_rate: 1.0,
        })
    }
}

struct PanickingCalculator;

impl DifficultyCalculator for PanickingCalculator {
    fn calculate(&self, _: &WorkingChart, _: &[Mod]) -> Result<DifficultyAttributes, CalculationError> {
        panic!("calculator bug");
    }
}

struct StubRuleset {
    kind: RulesetKind,
    panics: bool,
}

impl Ruleset for StubRuleset {
    fn kind(&self) -> RulesetKind {
        self.kind
    }

    fn convert_from_legacy_mods(&self, _: LegacyMods) -> Vec<Mod> {
        Vec::new()
    }

    fn create_difficulty_calculator(&self) -> Box<dyn DifficultyCalculator> {
        if self.panics {
            Box::new(PanickingCalculator)
        } else {
            Box::new(BrokenCalculator)
        }
    }
}

#[tokio::test]
async fn calculator_failures_rate_zero() {
    let rulesets = RulesetTable::builtin()
        .with_ruleset(Arc::new(StubRuleset { kind: RulesetKind::Taiko, panics: false }))
        .with_ruleset(Arc::new(StubRuleset { kind: RulesetKind::Catch, panics: true }));
    let handler = DifficultyCalculationHandler::new(rulesets, Arc::new(FlatFileChartLoader));
    let path = chart_path("simple.osu");

    for id in [1, 2] {
        let outcome = handler.handle(req(id, 0, &path)).await;
        assert_eq!(outcome.response.star_rating, 0.0);
        assert!(matches!(outcome.failure, Some(CalculationError::Calculation(_))));
    }

    // untouched slots keep the built-in engine
    let osu = handler.handle(req(0, 0, &path)).await;
    assert!(osu.failure.is_none());
}
