use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::types::{COL_DATE, COL_PRICE, COL_PRODUCT, COL_QUANTITY, COL_REGION};

/// Naming convention for the daily exports dropped into the data directory.
pub const SALES_FILE_PATTERN: &str = "daily_sales_data_*.csv";

const REQUIRED_COLUMNS: [&str; 5] = [COL_PRODUCT, COL_PRICE, COL_QUANTITY, COL_DATE, COL_REGION];

/// Find every sales export under `data_dir`. Zero matches is fatal: the rest
/// of the pipeline has nothing to run on.
pub fn discover_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = data_dir.join(SALES_FILE_PATTERN);
    let pattern = pattern.to_string_lossy().into_owned();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        files.push(entry?);
    }

    if files.is_empty() {
        return Err(PipelineError::DataNotFound { pattern });
    }

    Ok(files)
}

/// Read, normalize, and clean every export, then concatenate them into one
/// DataFrame preserving discovery order.
///
/// Cells are read as raw strings so this module owns all numeric coercion:
/// `price` and `quantity` become nullable Float64 columns where any value
/// that does not parse is null rather than an error.
pub fn load_sales_data(paths: &[PathBuf]) -> Result<DataFrame> {
    let mut frames: Vec<LazyFrame> = Vec::with_capacity(paths.len());

    for path in paths {
        let df = read_raw_csv(path)?;
        let df = normalize_columns(df, path)?;
        let df = clean_numeric_columns(df)?;
        debug!(path = %path.display(), rows = df.height(), "loaded sales export");
        frames.push(df.lazy());
    }

    let combined = concat(&frames, UnionArgs::default())?.collect()?;
    Ok(combined)
}

fn read_raw_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Trim and lowercase header names, then check the five columns the pipeline
/// needs are all present. Extra columns are dropped here so files exported
/// with different column orders still concatenate cleanly.
fn normalize_columns(mut df: DataFrame, path: &Path) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();
    df.set_column_names(names)?;

    for required in REQUIRED_COLUMNS {
        if df.column(required).is_err() {
            return Err(PipelineError::Validation(format!(
                "{}: missing required column '{required}'",
                path.display()
            )));
        }
    }

    let projected = df.select(REQUIRED_COLUMNS)?;
    Ok(projected)
}

fn clean_numeric_columns(mut df: DataFrame) -> Result<DataFrame> {
    let price = coerce_column(df.column(COL_PRICE)?, COL_PRICE, parse_money)?;
    let quantity = coerce_column(df.column(COL_QUANTITY)?, COL_QUANTITY, parse_quantity)?;
    df.with_column(price)?;
    df.with_column(quantity)?;
    Ok(df)
}

fn coerce_column(column: &Column, name: &str, parse: fn(&str) -> Option<f64>) -> Result<Series> {
    let values: Vec<Option<f64>> = column
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse))
        .collect();
    Ok(Series::new(name.into(), values))
}

/// Currency text like "$2.50" or "1,000.00" -> 2.50 / 1000.0; anything that
/// still fails to parse after stripping becomes None.
fn parse_money(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',')
        .collect();
    parse_numeric(&cleaned)
}

fn parse_quantity(raw: &str) -> Option<f64> {
    parse_numeric(raw.trim())
}

fn parse_numeric(value: &str) -> Option<f64> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return None;
    }
    value.parse::<f64>().ok()
}
