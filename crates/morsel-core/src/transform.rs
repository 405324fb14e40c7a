use polars::prelude::*;

use crate::error::Result;
use crate::types::{COL_DATE, COL_PRICE, COL_PRODUCT, COL_QUANTITY, COL_REGION, COL_SALES, TARGET_PRODUCT};

/// Keep only Pink Morsel rows, derive per-row revenue, and project down to
/// the tidy output shape `[sales, date, region]`.
///
/// The product comparison lowercases a copy inside the filter expression so
/// the stored `product` values are never mutated. A null price or quantity
/// propagates into a null `sales` value.
pub fn pink_morsel_sales(df: &DataFrame) -> Result<DataFrame> {
    let tidy = df
        .clone()
        .lazy()
        .filter(
            col(COL_PRODUCT)
                .str()
                .to_lowercase()
                .eq(lit(TARGET_PRODUCT)),
        )
        .with_column((col(COL_QUANTITY) * col(COL_PRICE)).alias(COL_SALES))
        .select([col(COL_SALES), col(COL_DATE), col(COL_REGION)])
        .collect()?;
    Ok(tidy)
}
