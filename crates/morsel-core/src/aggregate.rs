use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::Result;
use crate::types::{DailySales, COL_DATE, COL_SALES};

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Sum `sales` per calendar day over the tidy output frame.
///
/// Rows whose `date` does not parse are dropped from the aggregate. Null
/// `sales` values contribute nothing to their day's sum, so a day where
/// every sale is null still appears, with a total of 0.0. The result is
/// sorted by date ascending.
pub fn daily_totals(df: &DataFrame) -> Result<Vec<DailySales>> {
    let dates = df.column(COL_DATE)?.str()?;
    let sales = df.column(COL_SALES)?.f64()?;

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for idx in 0..df.height() {
        let Some(raw) = dates.get(idx) else {
            continue;
        };
        let Some(date) = parse_date(raw) else {
            continue;
        };
        let total = totals.entry(date).or_insert(0.0);
        if let Some(amount) = sales.get(idx) {
            *total += amount;
        }
    }

    Ok(totals
        .into_iter()
        .map(|(date, sales)| DailySales { date, sales })
        .collect())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sums_sales_for_the_same_day() {
        let df = df!(
            "sales" => [Some(10.0), Some(5.0)],
            "date" => ["2021-01-10", "2021-01-10"],
            "region" => ["north", "south"]
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        assert_eq!(
            daily,
            vec![DailySales {
                date: date("2021-01-10"),
                sales: 15.0
            }]
        );
    }

    #[test]
    fn output_is_sorted_by_date() {
        let df = df!(
            "sales" => [Some(1.0), Some(2.0), Some(3.0)],
            "date" => ["2021-03-01", "2021-01-01", "2021-02-01"],
            "region" => ["north", "north", "north"]
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        let dates: Vec<NaiveDate> = daily.iter().map(|point| point.date).collect();
        assert_eq!(
            dates,
            vec![date("2021-01-01"), date("2021-02-01"), date("2021-03-01")]
        );
    }

    #[test]
    fn unparseable_dates_are_dropped() {
        let df = df!(
            "sales" => [Some(10.0), Some(5.0)],
            "date" => ["not-a-date", "2021-01-10"],
            "region" => ["north", "south"]
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, date("2021-01-10"));
        assert_eq!(daily[0].sales, 5.0);
    }

    #[test]
    fn day_with_only_null_sales_totals_zero() {
        let df = df!(
            "sales" => [None::<f64>, None::<f64>],
            "date" => ["2021-01-11", "2021-01-11"],
            "region" => ["east", "east"]
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        assert_eq!(
            daily,
            vec![DailySales {
                date: date("2021-01-11"),
                sales: 0.0
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_aggregate() {
        let df = df!(
            "sales" => Vec::<Option<f64>>::new(),
            "date" => Vec::<&str>::new(),
            "region" => Vec::<&str>::new()
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        assert!(daily.is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let df = df!(
            "sales" => [Some(10.0), Some(5.0), None],
            "date" => ["2021-01-10", "2021-01-10", "2021-01-12"],
            "region" => ["north", "south", "east"]
        )
        .unwrap();

        let first = daily_totals(&df).unwrap();
        let second = daily_totals(&df).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn alternate_date_separator_is_accepted() {
        let df = df!(
            "sales" => [Some(4.0)],
            "date" => ["2021/01/10"],
            "region" => ["north"]
        )
        .unwrap();

        let daily = daily_totals(&df).unwrap();
        assert_eq!(daily[0].date, date("2021-01-10"));
    }
}
