//! Doctor load scatter: patient volume against mean consultation
//! duration, point size scaled by the doctor's mean patient wait.

use std::path::Path;

use plotters::prelude::*;

use crate::analyze::stats::DoctorStats;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

pub fn create_doctor_load_chart(
    stats: &[DoctorStats],
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    let points: Vec<(f64, f64, f64)> = stats
        .iter()
        .filter_map(|s| {
            s.mean_consultation_duration.map(|duration| {
                (
                    s.patient_count as f64,
                    duration,
                    s.mean_doctor_wait.unwrap_or(0.0),
                )
            })
        })
        .collect();
    if points.is_empty() {
        return Err(ChartError::InvalidData(
            "no doctor groups to plot".to_string(),
        ));
    }

    let config = ChartConfig::new("Doctor Load: Patient Volume vs Avg Duration")
        .dimensions(1400, 600)
        .x_label("Patients Processed")
        .y_label("Avg Consultation Duration (min)");

    let x_max = points.iter().map(|p| p.0).fold(0.0f64, f64::max) * 1.1 + 1.0;
    let y_max = points.iter().map(|p| p.1).fold(0.0f64, f64::max) * 1.1 + 1.0;
    let max_wait = points.iter().map(|p| p.2).fold(0.0f64, f64::max).max(1.0);

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .draw()
        .map_err(rendering_error)?;

    chart
        .draw_series(points.iter().map(|&(count, duration, wait)| {
            // Point size encodes the mean doctor wait, 4..14 px.
            let radius = 4 + (wait / max_wait * 10.0).round() as i32;
            Circle::new((count, duration), radius, BLUE.mix(0.5).filled())
        }))
        .map_err(rendering_error)?;

    root.present().map_err(rendering_error)?;
    Ok(())
}
