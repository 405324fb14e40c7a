//! PNG rendering for the daily sales aggregate.
//!
//! We disable Plotters' default features because they pull in native/system
//! dependencies (fontconfig via font-kit) that aren't required for writing a
//! bitmap. Text is rendered through the pure-Rust `ab_glyph` backend with a
//! vendored DejaVu Sans, so the crate builds the same everywhere.

use std::ops::Range;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use morsel_core::{price_change_date, DailySales};
use once_cell::sync::Lazy;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1000, 600);
const CHART_TITLE: &str = "Pink Morsel Sales Over Time";
const PRICE_CHANGE_LABEL: &str = "Price change (15 Jan 2021)";

static FONT_BYTES: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

static FONT_REGISTERED: Lazy<bool> =
    Lazy::new(|| register_font("sans-serif", FontStyle::Normal, FONT_BYTES).is_ok());

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("embedded font failed to register")]
    Font,

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl ChartError {
    fn render(err: impl std::fmt::Display) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Render the daily sales line chart to `path`, overwriting any existing
/// file. An empty series produces an empty plot around the price-change
/// date rather than an error.
pub fn render_sales_chart(series: &[DailySales], path: &Path) -> Result<(), ChartError> {
    if !*FONT_REGISTERED {
        return Err(ChartError::Font);
    }

    let (x_range, y_max) = plot_bounds(series);
    let marker = price_change_date();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 24))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Sales")
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|point| (point.date, point.sales)),
            &BLUE,
        ))
        .map_err(ChartError::render)?
        .label("Daily Sales")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE));

    chart
        .draw_series(DashedLineSeries::new(
            [(marker, 0.0), (marker, y_max)],
            6,
            4,
            RED.stroke_width(1),
        ))
        .map_err(ChartError::render)?
        .label(PRICE_CHANGE_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(ChartError::render)?;

    root.present().map_err(ChartError::render)?;
    Ok(())
}

/// X spans the data and always includes the marker date so the reference
/// line stays visible; Y spans zero to slightly above the largest daily
/// total. Degenerate windows are padded so Plotters gets a non-empty range.
fn plot_bounds(series: &[DailySales]) -> (Range<NaiveDate>, f64) {
    let marker = price_change_date();

    let (start, end) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.date.min(marker), last.date.max(marker)),
        _ => (marker - Duration::days(30), marker + Duration::days(30)),
    };
    let (start, end) = if start == end {
        (start - Duration::days(1), end + Duration::days(1))
    } else {
        (start, end)
    };

    let top = series.iter().map(|point| point.sales).fold(0.0_f64, f64::max);
    let y_max = if top > 0.0 { top * 1.05 } else { 1.0 };

    (start..end, y_max)
}
