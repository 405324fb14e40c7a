use chrono::NaiveDate;
use serde::Serialize;

pub const COL_PRODUCT: &str = "product";
pub const COL_PRICE: &str = "price";
pub const COL_QUANTITY: &str = "quantity";
pub const COL_DATE: &str = "date";
pub const COL_REGION: &str = "region";
pub const COL_SALES: &str = "sales";

/// The product line this pipeline reports on. Matching is case-insensitive.
pub const TARGET_PRODUCT: &str = "pink morsel";

/// The date the Pink Morsel price changed, marked on the sales chart.
pub fn price_change_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).expect("valid calendar date")
}

/// One point of the daily sales aggregate, ordered by `date` when produced
/// by [`crate::aggregate::daily_totals`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: f64,
}

/// Counters reported at the end of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub files_read: usize,
    pub rows_combined: usize,
    pub rows_written: usize,
    pub days_plotted: usize,
}
