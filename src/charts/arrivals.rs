//! Patient arrival volume by hour of day, as a line chart.

use std::path::Path;

use plotters::prelude::*;

use crate::analyze::stats::ArrivalPatterns;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

pub fn create_hourly_arrival_chart(
    patterns: &ArrivalPatterns,
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    let config = ChartConfig::new("Patient Arrival Pattern by Hour")
        .dimensions(1200, 500)
        .x_label("Hour of Day")
        .y_label("Number of Patients");

    let y_max = patterns
        .hourly_counts
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as u32;

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..24u32, 0u32..y_max + y_max / 5 + 1)
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(24)
        .draw()
        .map_err(rendering_error)?;

    let series: Vec<(u32, u32)> = patterns
        .hourly_counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| (hour as u32, count as u32))
        .collect();

    chart
        .draw_series(LineSeries::new(series.iter().copied(), BLUE.stroke_width(2)))
        .map_err(rendering_error)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|&point| Circle::new(point, 4, BLUE.filled())),
        )
        .map_err(rendering_error)?;

    root.present().map_err(rendering_error)?;
    Ok(())
}
