//! Chart image generation for the analysis report, using plotters.

pub mod arrivals;
pub mod department;
pub mod distributions;
pub mod doctors;
pub mod heatmap;
pub mod triage;
mod util;

use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::AnalysisReport;
use crate::error::ChartError;

pub const UNIVARIATE_DISTRIBUTIONS: &str = "univariate_distributions.png";
pub const DEPARTMENT_WAIT_TIMES: &str = "department_wait_times.png";
pub const DOCTOR_LOAD_ANALYSIS: &str = "doctor_load_analysis.png";
pub const HOURLY_ARRIVAL_PATTERN: &str = "hourly_arrival_pattern.png";
pub const WAIT_TIME_HEATMAP: &str = "wait_time_heatmap.png";
pub const TRIAGE_EFFECTIVENESS: &str = "triage_effectiveness.png";

/// Common chart configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 600,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        }
    }
}

impl ChartConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }
}

pub(crate) fn rendering_error(error: impl std::fmt::Display) -> ChartError {
    ChartError::Rendering(error.to_string())
}

/// Render every chart of the report into `output_dir`, creating the
/// directory if needed. Returns the paths written.
pub fn render_all(
    report: &AnalysisReport,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ChartError> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    let path = output_dir.join(UNIVARIATE_DISTRIBUTIONS);
    distributions::create_distribution_panel(&report.metrics, &path)?;
    written.push(path);

    let path = output_dir.join(DEPARTMENT_WAIT_TIMES);
    department::create_department_wait_chart(&report.department_stats, &path)?;
    written.push(path);

    let path = output_dir.join(DOCTOR_LOAD_ANALYSIS);
    doctors::create_doctor_load_chart(&report.doctor_stats, &path)?;
    written.push(path);

    let path = output_dir.join(HOURLY_ARRIVAL_PATTERN);
    arrivals::create_hourly_arrival_chart(&report.patterns, &path)?;
    written.push(path);

    let path = output_dir.join(WAIT_TIME_HEATMAP);
    heatmap::create_wait_time_heatmap(&report.heatmap, &path)?;
    written.push(path);

    let path = output_dir.join(TRIAGE_EFFECTIVENESS);
    triage::create_triage_effectiveness_chart(&report.triage_stats, &path)?;
    written.push(path);

    Ok(written)
}
