pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scoring;
pub mod service;

pub use config::AppConfig;
pub use db::{create_pool, init_schema};
pub use error::AppError;
pub use scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};
pub use service::TenderService;
