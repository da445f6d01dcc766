//! The read-and-report pass over the generated dataset.
//!
//! Loads the CSV handoff file, derives per-row duration metrics,
//! quarantines corrupted rows, prints descriptive tables and renders the
//! chart images. The input file is treated as immutable; all derived
//! columns live in a private copy.

pub mod metrics;
pub mod stats;

use std::path::Path;

use log::info;
use polars::prelude::DataFrame;

use crate::charts;
use crate::table;

use metrics::{derive_metrics, observations_from_dataframe, quarantine_corrupted, VisitMetrics};
use stats::{
    arrival_patterns, compute_stats, department_stats, doctor_stats, triage_stats, wait_heatmap,
    ArrivalPatterns, DepartmentStats, DoctorStats, SummaryStats, TriageStats, WaitHeatmap,
};

/// Names of the four derived metrics, in reporting order.
pub const METRIC_NAMES: [&str; 4] = [
    "RegistrationWait",
    "DoctorWait",
    "ConsultationDuration",
    "TotalHospitalTime",
];

/// Everything the analysis pass derives from one dataset.
#[derive(Debug)]
pub struct AnalysisReport {
    pub total_rows: usize,
    pub missing_registration_rows: usize,
    pub corrupted_rows: usize,
    pub metrics: Vec<VisitMetrics>,
    pub metric_summaries: Vec<(&'static str, SummaryStats)>,
    pub department_stats: Vec<DepartmentStats>,
    pub doctor_stats: Vec<DoctorStats>,
    pub triage_stats: Vec<TriageStats>,
    pub patterns: ArrivalPatterns,
    pub heatmap: WaitHeatmap,
}

/// Outcome of a full analyzer run.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// The handoff file does not exist; nothing was produced.
    MissingInput,
    Completed(AnalysisReport),
}

/// Derive metrics and all aggregates from a loaded dataset.
pub fn build_report(df: &DataFrame) -> anyhow::Result<AnalysisReport> {
    let observations = observations_from_dataframe(df)?;
    let mut metric_rows = derive_metrics(&observations);
    let corrupted_rows = quarantine_corrupted(&mut metric_rows);

    let collect = |extract: fn(&VisitMetrics) -> Option<f64>| -> Vec<f64> {
        metric_rows.iter().filter_map(extract).collect()
    };
    let metric_summaries = vec![
        (METRIC_NAMES[0], compute_stats(&collect(|m| m.registration_wait))),
        (METRIC_NAMES[1], compute_stats(&collect(|m| m.doctor_wait))),
        (
            METRIC_NAMES[2],
            compute_stats(&collect(|m| m.consultation_duration)),
        ),
        (
            METRIC_NAMES[3],
            compute_stats(&collect(|m| Some(m.total_hospital_time))),
        ),
    ];

    let missing_registration_rows = observations
        .iter()
        .filter(|o| o.registration_time.is_none())
        .count();

    Ok(AnalysisReport {
        total_rows: observations.len(),
        missing_registration_rows,
        corrupted_rows,
        metric_summaries,
        department_stats: department_stats(&observations, &metric_rows),
        doctor_stats: doctor_stats(&observations, &metric_rows),
        triage_stats: triage_stats(&observations, &metric_rows),
        patterns: arrival_patterns(&observations),
        heatmap: wait_heatmap(&observations, &metric_rows),
        metrics: metric_rows,
    })
}

fn format_mean(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Print the descriptive tables to stdout.
pub fn print_report(report: &AnalysisReport) {
    println!("\n--- Metric summary (minutes) ---");
    println!(
        "{:<22} {:>10} {:>10} {:>10} {:>10}",
        "Metric", "mean", "median", "max", "std"
    );
    for (name, stats) in &report.metric_summaries {
        println!(
            "{:<22} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            name, stats.mean, stats.median, stats.max, stats.std_dev
        );
    }

    println!("\n--- Department analysis ---");
    println!(
        "{:<14} {:>13} {:>16} {:>12}",
        "Department", "PatientCount", "RegistrationWait", "DoctorWait"
    );
    for dept in &report.department_stats {
        println!(
            "{:<14} {:>13} {:>16} {:>12}",
            dept.department,
            dept.patient_count,
            format_mean(dept.mean_registration_wait),
            format_mean(dept.mean_doctor_wait)
        );
    }

    println!("\n--- Top 5 busiest doctors ---");
    println!(
        "{:<10} {:>13} {:>22} {:>12}",
        "DoctorID", "PatientCount", "ConsultationDuration", "DoctorWait"
    );
    for doctor in report.doctor_stats.iter().take(5) {
        println!(
            "{:<10} {:>13} {:>22} {:>12}",
            doctor.doctor_id,
            doctor.patient_count,
            format_mean(doctor.mean_consultation_duration),
            format_mean(doctor.mean_doctor_wait)
        );
    }

    println!("\n--- Triage effectiveness ---");
    println!(
        "{:<10} {:>13} {:>16} {:>12}",
        "Triage", "PatientCount", "RegistrationWait", "DoctorWait"
    );
    for triage in &report.triage_stats {
        println!(
            "{:<10} {:>13} {:>16} {:>12}",
            triage.triage_level,
            triage.patient_count,
            format_mean(triage.mean_registration_wait),
            format_mean(triage.mean_doctor_wait)
        );
    }

    println!("\n--- Arrivals by hour ---");
    for (hour, count) in report.patterns.hourly_counts.iter().enumerate() {
        println!("{hour:>4}: {count}");
    }

    println!("\n--- Arrivals by weekday ---");
    for (day, count) in report.patterns.weekday_counts.iter().enumerate() {
        println!("{:<10} {count}", stats::DAY_NAMES[day]);
    }
}

/// Run the whole analysis: load, derive, report, render charts.
///
/// A missing input file is a user-visible recoverable condition, not an
/// error: the caller gets [`AnalysisOutcome::MissingInput`] and no output
/// directory is created.
pub fn run(data_path: &Path, output_dir: &Path) -> anyhow::Result<AnalysisOutcome> {
    if !data_path.exists() {
        return Ok(AnalysisOutcome::MissingInput);
    }

    let df = table::read_csv(data_path)?;
    info!("Loaded {} rows from {}", df.height(), data_path.display());
    println!(
        "Dataset shape: {} rows x {} columns",
        df.height(),
        df.width()
    );
    println!("Missing values per column:");
    for column in df.get_columns() {
        println!("{:>24}: {}", column.name(), column.null_count());
    }

    let report = build_report(&df)?;
    print_report(&report);

    let written = charts::render_all(&report, output_dir)?;
    for path in &written {
        info!("Saved {}", path.display());
    }

    Ok(AnalysisOutcome::Completed(report))
}
