pub mod config;
pub mod engine;
pub mod factors;

pub use config::{ScoringConfig, ScoringOverrides};
pub use engine::{FactorScores, ScoreBreakdown, ScoringEngine, MAX_SCORE, MIN_SCORE};
