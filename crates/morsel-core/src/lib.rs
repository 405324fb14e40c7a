pub mod aggregate;
pub mod error;
pub mod ingestion;
pub mod outputs;
pub mod transform;
pub mod types;

pub use error::{PipelineError, Result};
pub use types::{price_change_date, DailySales, RunSummary, TARGET_PRODUCT};
