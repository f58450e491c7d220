//! Built-in message handlers.

pub mod difficulty;

pub use difficulty::DifficultyCalculationHandler;
