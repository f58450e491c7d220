use std::sync::Arc;

use async_trait::async_trait;

use legacy_ipc_core::protocol::DifficultyCalculationRequest;

use crate::difficulty::{
    CalculationError, CalculationOutcome, ChartLoader, FlatFileChartLoader, LegacyMods,
    RulesetTable,
};
use crate::dispatch::DifficultyHandler;

/// Rates a chart under a ruleset and legacy mod set.
///
/// Never fails towards the caller: invalid ruleset ids, unreadable charts and
/// calculator errors all produce a zero rating.
#[derive(Clone)]
pub struct DifficultyCalculationHandler {
    rulesets: RulesetTable,
    loader: Arc<dyn ChartLoader>,
}

impl DifficultyCalculationHandler {
    pub fn new(rulesets: RulesetTable, loader: Arc<dyn ChartLoader>) -> Self {
        Self { rulesets, loader }
    }

    /// Built-in rulesets reading charts from disk.
    pub fn builtin() -> Self {
        Self::new(RulesetTable::builtin(), Arc::new(FlatFileChartLoader))
    }

    /// Resolve, translate mods, load and calculate. Blocking.
    pub fn calculate(&self, req: &DifficultyCalculationRequest) -> Result<f64, CalculationError> {
        let ruleset = self.rulesets.resolve(req.ruleset_id)?;
        let mods = ruleset.convert_from_legacy_mods(LegacyMods::from_wire(req.mods));
        let chart = self.loader.load(&req.beatmap_file, ruleset.kind())?;
        let attrs = ruleset.create_difficulty_calculator().calculate(&chart, &mods)?;

        if !attrs.star_rating.is_finite() || attrs.star_rating < 0.0 {
            return Err(CalculationError::Calculation(format!(
                "calculator returned {}",
                attrs.star_rating
            )));
        }
        Ok(attrs.star_rating)
    }
}

impl Default for DifficultyCalculationHandler {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl DifficultyHandler for DifficultyCalculationHandler {
    async fn handle(&self, req: DifficultyCalculationRequest) -> CalculationOutcome {
        let this = self.clone();
        let joined = tokio::task::spawn_blocking(move || this.calculate(&req)).await;

        match joined {
            Ok(Ok(star_rating)) => CalculationOutcome::rated(star_rating),
            Ok(Err(e)) => CalculationOutcome::failed(e),
            Err(e) => CalculationOutcome::failed(CalculationError::Calculation(format!(
                "calculation task did not complete: {e}"
            ))),
        }
    }
}
