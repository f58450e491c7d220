//! Domain errors raised inside the difficulty handler.
//!
//! These never reach the wire: the handler turns every one of them into a
//! zero star rating.

use thiserror::Error;

/// Why a chart could not be turned into a working chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart path is empty")]
    EmptyPath,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing \"osu file format\" header")]
    MissingHeader,
    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("unknown chart mode {0}")]
    UnknownMode(i32),
    #[error("chart for mode {chart} cannot be converted to ruleset {ruleset}")]
    Unconvertible { chart: i32, ruleset: i32 },
}

#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("invalid ruleset id: {0}")]
    InvalidRulesetId(i32),
    #[error("chart load failed ({path}): {source}")]
    ChartLoad {
        path: String,
        #[source]
        source: ChartError,
    },
    #[error("calculation failed: {0}")]
    Calculation(String),
}

impl CalculationError {
    /// Stable kind string for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationError::InvalidRulesetId(_) => "INVALID_RULESET_ID",
            CalculationError::ChartLoad { .. } => "CHART_LOAD",
            CalculationError::Calculation(_) => "CALCULATION",
        }
    }
}
