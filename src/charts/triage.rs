//! Doctor wait distribution by triage level, as box plots.

use std::path::Path;

use plotters::prelude::*;

use crate::analyze::stats::TriageStats;
use crate::charts::{rendering_error, ChartConfig};
use crate::error::ChartError;

/// Y-axis cap in minutes; the long exponential tail would otherwise
/// squash the interesting low range where the queue-jump shows.
const Y_MAX_MINUTES: f32 = 100.0;

pub fn create_triage_effectiveness_chart(
    stats: &[TriageStats],
    output_path: impl AsRef<Path>,
) -> Result<(), ChartError> {
    if stats.iter().all(|s| s.doctor_wait_samples.is_empty()) {
        return Err(ChartError::InvalidData(
            "no doctor wait samples to plot".to_string(),
        ));
    }

    let config = ChartConfig::new("Doctor Wait Time Distribution by Triage Level")
        .dimensions(1000, 600)
        .x_label("Triage Level")
        .y_label("Minutes");

    let levels: Vec<&str> = stats.iter().map(|s| s.triage_level.as_str()).collect();

    let root = BitMapBackend::new(output_path.as_ref(), (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(rendering_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(levels[..].into_segmented(), 0f32..Y_MAX_MINUTES)
        .map_err(rendering_error)?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .draw()
        .map_err(rendering_error)?;

    for (group, level) in stats.iter().zip(levels.iter()) {
        if group.doctor_wait_samples.is_empty() {
            continue;
        }
        let quartiles = Quartiles::new(&group.doctor_wait_samples);
        chart
            .draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(level), &quartiles)
                    .width(25)
                    .whisker_width(0.5)
                    .style(RED.mix(0.8)),
            ))
            .map_err(rendering_error)?;
    }

    root.present().map_err(rendering_error)?;
    Ok(())
}
