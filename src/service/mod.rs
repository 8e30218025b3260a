pub mod seed;
pub mod tenders;

pub use seed::{generate_mock_tenders, seed_database, DEFAULT_SEED_COUNT};
pub use tenders::TenderService;
