//! Helpers shared by the bridge integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use legacy_ipc_bridge::difficulty::{ChartLoader, FlatFileChartLoader, LegacyMods, RulesetTable};

pub fn chart_path(name: &str) -> String {
    format!("{}/tests/charts/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Star rating straight from the built-in engine, bypassing the protocol.
pub fn reference_rating(ruleset_id: i32, mods: i32, chart: &str) -> f64 {
    let ruleset = RulesetTable::builtin().resolve(ruleset_id).unwrap();
    let mods = ruleset.convert_from_legacy_mods(LegacyMods::from_wire(mods));
    let chart = FlatFileChartLoader.load(&chart_path(chart), ruleset.kind()).unwrap();
    ruleset
        .create_difficulty_calculator()
        .calculate(&chart, &mods)
        .unwrap()
        .star_rating
}
