use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::Result;

/// Write the tidy frame as UTF-8 CSV with a header row and no index column,
/// truncating any existing file. Returns the number of data rows written.
pub fn write_output(df: &DataFrame, path: &Path) -> Result<usize> {
    let mut file = File::create(path)?;
    let mut out = df.clone();
    CsvWriter::new(&mut file).include_header(true).finish(&mut out)?;
    Ok(out.height())
}
