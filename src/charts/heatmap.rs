//! Day-of-week by hour-of-day heatmap of mean registration wait.

use std::path::Path;

use plotters::prelude::*;

use crate::analyze::stats::{WaitHeatmap, DAY_NAMES};
use crate::charts::util::heat_color;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

const MISSING_CELL: RGBColor = RGBColor(235, 235, 235);

pub fn create_wait_time_heatmap(
    heatmap: &WaitHeatmap,
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    let config = ChartConfig::new("Avg Registration Wait by Day & Hour")
        .dimensions(1200, 600)
        .x_label("Hour of Day")
        .y_label("Day of Week");

    let max_mean = heatmap.max_mean().unwrap_or(1.0).max(f64::EPSILON);

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(
            0f64..WaitHeatmap::HOURS as f64,
            0f64..WaitHeatmap::DAYS as f64,
        )
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(WaitHeatmap::HOURS)
        .y_labels(WaitHeatmap::DAYS)
        .y_label_formatter(&|y| {
            DAY_NAMES
                .get(y.floor() as usize)
                .map(|name| name.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(rendering_error)?;

    chart
        .draw_series((0..WaitHeatmap::DAYS).flat_map(|day| {
            (0..WaitHeatmap::HOURS).map(move |hour| {
                let color = match heatmap.mean(day, hour) {
                    Some(mean) => heat_color(mean / max_mean),
                    None => MISSING_CELL,
                };
                Rectangle::new(
                    [
                        (hour as f64, day as f64),
                        (hour as f64 + 1.0, day as f64 + 1.0),
                    ],
                    color.filled(),
                )
            })
        }))
        .map_err(rendering_error)?;

    root.present().map_err(rendering_error)?;
    Ok(())
}
