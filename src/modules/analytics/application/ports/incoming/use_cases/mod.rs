pub mod get_summary;

pub use get_summary::{GetSummaryError, GetSummaryUseCase};
