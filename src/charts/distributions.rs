//! 2x2 histogram panel of the four derived metrics.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analyze::metrics::VisitMetrics;
use crate::analyze::METRIC_NAMES;
use crate::charts::util::histogram_bins;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

const BIN_COUNT: usize = 40;

pub fn create_distribution_panel(
    metrics: &[VisitMetrics],
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    let config = ChartConfig::new("Distribution of visit-flow metrics").dimensions(1400, 1000);

    let panels: [(&str, Vec<f64>); 4] = [
        (
            METRIC_NAMES[0],
            metrics.iter().filter_map(|m| m.registration_wait).collect(),
        ),
        (
            METRIC_NAMES[1],
            metrics.iter().filter_map(|m| m.doctor_wait).collect(),
        ),
        (
            METRIC_NAMES[2],
            metrics
                .iter()
                .filter_map(|m| m.consultation_duration)
                .collect(),
        ),
        (
            METRIC_NAMES[3],
            metrics.iter().map(|m| m.total_hospital_time).collect(),
        ),
    ];

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let areas = root.split_evenly((2, 2));
    for (area, (name, values)) in areas.iter().zip(panels.iter()) {
        draw_histogram(area, name, values)?;
    }

    root.present().map_err(rendering_error)?;
    Ok(())
}

fn draw_histogram(
    area: &DrawingArea<BitMapBackend, Shift>,
    name: &str,
    values: &[f64],
) -> Result<(), ChartError> {
    if values.is_empty() {
        // Nothing to draw for this panel; leave it blank.
        return Ok(());
    }

    let (bin_width, counts) = histogram_bins(values, BIN_COUNT);
    let x_max = bin_width * BIN_COUNT as f64;
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Distribution of {name} (min)"), ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, 0u32..y_max + y_max / 10 + 1)
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .x_desc("Minutes")
        .y_desc("Visits")
        .draw()
        .map_err(rendering_error)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            Rectangle::new(
                [
                    (i as f64 * bin_width, 0u32),
                    ((i + 1) as f64 * bin_width, count),
                ],
                BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(rendering_error)?;

    Ok(())
}
