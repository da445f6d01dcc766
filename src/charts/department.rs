//! Average doctor wait by department, as a bar chart.

use std::path::Path;

use plotters::prelude::*;

use crate::analyze::stats::DepartmentStats;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

pub fn create_department_wait_chart(
    stats: &[DepartmentStats],
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    if stats.is_empty() {
        return Err(ChartError::InvalidData(
            "no department groups to plot".to_string(),
        ));
    }

    let config = ChartConfig::new("Average Doctor Wait Time by Department")
        .dimensions(1200, 600)
        .x_label("Department")
        .y_label("Minutes");

    let bars: Vec<(String, f64)> = stats
        .iter()
        .map(|s| (s.department.clone(), s.mean_doctor_wait.unwrap_or(0.0)))
        .collect();
    let y_max = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max) * 1.15 + 1.0;

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..y_max)
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(bars.len())
        .x_label_formatter(&|x| {
            bars.get(x.floor() as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(rendering_error)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *value)],
                GREEN.mix(0.7).filled(),
            )
        }))
        .map_err(rendering_error)?;

    root.present().map_err(rendering_error)?;
    Ok(())
}
