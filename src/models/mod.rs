pub mod query;
pub mod tender;

pub use query::{SortField, SortOrder, TenderListResponse, TenderQuery};
pub use tender::{Tender, TenderRecord, TenderRow, TenderStatus, TenderType};
