//! Descriptive aggregates over the derived metrics.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike};

use super::metrics::{VisitMetrics, VisitObservation};

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Triage levels in reporting order, most urgent first.
pub const TRIAGE_ORDER: [&str; 4] = ["Critical", "High", "Medium", "Low"];

/// Summary of one metric across all rows where it is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean / median / sample std-dev / extremes of a value set. Sample
/// standard deviation (n-1 denominator) to match the printed tables the
/// dataset was originally described with.
pub fn compute_stats(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let std_dev = if count > 1 {
        let sum_sq: f64 = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum();
        (sum_sq / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    SummaryStats {
        count,
        mean,
        median,
        std_dev,
        min: sorted[0],
        max: sorted[count - 1],
    }
}

/// Running mean over optionally-present values.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccum {
    sum: f64,
    count: usize,
}

impl MeanAccum {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn push_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    pub department: String,
    pub patient_count: usize,
    pub mean_registration_wait: Option<f64>,
    pub mean_doctor_wait: Option<f64>,
}

/// Per-department volume and mean waits, alphabetical by department.
/// `patient_count` counts every row of the group, quarantined or not, so
/// the counts always sum to the table height.
pub fn department_stats(
    observations: &[VisitObservation],
    metrics: &[VisitMetrics],
) -> Vec<DepartmentStats> {
    #[derive(Default)]
    struct Accum {
        count: usize,
        registration: MeanAccum,
        doctor: MeanAccum,
    }

    let mut groups: BTreeMap<&str, Accum> = BTreeMap::new();
    for (obs, row) in observations.iter().zip(metrics) {
        let entry = groups.entry(obs.department.as_str()).or_default();
        entry.count += 1;
        entry.registration.push_opt(row.registration_wait);
        entry.doctor.push_opt(row.doctor_wait);
    }

    groups
        .into_iter()
        .map(|(department, accum)| DepartmentStats {
            department: department.to_string(),
            patient_count: accum.count,
            mean_registration_wait: accum.registration.mean(),
            mean_doctor_wait: accum.doctor.mean(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorStats {
    pub doctor_id: String,
    pub patient_count: usize,
    pub mean_consultation_duration: Option<f64>,
    pub mean_doctor_wait: Option<f64>,
}

/// Per-doctor load, busiest first (ties broken by id).
pub fn doctor_stats(
    observations: &[VisitObservation],
    metrics: &[VisitMetrics],
) -> Vec<DoctorStats> {
    #[derive(Default)]
    struct Accum {
        count: usize,
        consultation: MeanAccum,
        wait: MeanAccum,
    }

    let mut groups: BTreeMap<&str, Accum> = BTreeMap::new();
    for (obs, row) in observations.iter().zip(metrics) {
        let entry = groups.entry(obs.doctor_id.as_str()).or_default();
        entry.count += 1;
        entry.consultation.push_opt(row.consultation_duration);
        entry.wait.push_opt(row.doctor_wait);
    }

    let mut stats: Vec<DoctorStats> = groups
        .into_iter()
        .map(|(doctor_id, accum)| DoctorStats {
            doctor_id: doctor_id.to_string(),
            patient_count: accum.count,
            mean_consultation_duration: accum.consultation.mean(),
            mean_doctor_wait: accum.wait.mean(),
        })
        .collect();
    stats.sort_by(|a, b| {
        b.patient_count
            .cmp(&a.patient_count)
            .then_with(|| a.doctor_id.cmp(&b.doctor_id))
    });
    stats
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriageStats {
    pub triage_level: String,
    pub patient_count: usize,
    pub mean_registration_wait: Option<f64>,
    pub mean_doctor_wait: Option<f64>,
    /// Raw doctor waits of the group, for box plots.
    pub doctor_wait_samples: Vec<f64>,
}

/// Per-triage-level waits in [`TRIAGE_ORDER`]. Levels absent from the
/// data still appear, with zero counts.
pub fn triage_stats(
    observations: &[VisitObservation],
    metrics: &[VisitMetrics],
) -> Vec<TriageStats> {
    #[derive(Default)]
    struct Accum {
        count: usize,
        registration: MeanAccum,
        doctor: MeanAccum,
        samples: Vec<f64>,
    }

    let mut groups: BTreeMap<&str, Accum> = BTreeMap::new();
    for (obs, row) in observations.iter().zip(metrics) {
        let entry = groups.entry(obs.triage_level.as_str()).or_default();
        entry.count += 1;
        entry.registration.push_opt(row.registration_wait);
        entry.doctor.push_opt(row.doctor_wait);
        if let Some(wait) = row.doctor_wait {
            entry.samples.push(wait);
        }
    }

    TRIAGE_ORDER
        .iter()
        .map(|level| {
            let accum = groups.remove(*level).unwrap_or_default();
            TriageStats {
                triage_level: level.to_string(),
                patient_count: accum.count,
                mean_registration_wait: accum.registration.mean(),
                mean_doctor_wait: accum.doctor.mean(),
                doctor_wait_samples: accum.samples,
            }
        })
        .collect()
}

/// Arrival volume by hour of day and day of week.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalPatterns {
    pub hourly_counts: [usize; 24],
    pub weekday_counts: [usize; 7],
}

pub fn arrival_patterns(observations: &[VisitObservation]) -> ArrivalPatterns {
    let mut hourly_counts = [0usize; 24];
    let mut weekday_counts = [0usize; 7];
    for obs in observations {
        hourly_counts[obs.arrival_time.hour() as usize] += 1;
        weekday_counts[obs.arrival_time.weekday().num_days_from_monday() as usize] += 1;
    }
    ArrivalPatterns {
        hourly_counts,
        weekday_counts,
    }
}

/// Mean registration wait per (day-of-week, hour) cell. Day index 0 is
/// Monday. Cells with no complete rows report `None`.
#[derive(Debug, Clone)]
pub struct WaitHeatmap {
    cells: Vec<Vec<MeanAccum>>,
}

impl WaitHeatmap {
    pub const DAYS: usize = 7;
    pub const HOURS: usize = 24;

    fn new() -> Self {
        Self {
            cells: vec![vec![MeanAccum::default(); Self::HOURS]; Self::DAYS],
        }
    }

    pub fn mean(&self, day: usize, hour: usize) -> Option<f64> {
        self.cells[day][hour].mean()
    }

    /// Largest cell mean, for color scaling.
    pub fn max_mean(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .filter_map(MeanAccum::mean)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

pub fn wait_heatmap(
    observations: &[VisitObservation],
    metrics: &[VisitMetrics],
) -> WaitHeatmap {
    let mut heatmap = WaitHeatmap::new();
    for (obs, row) in observations.iter().zip(metrics) {
        let day = obs.arrival_time.weekday().num_days_from_monday() as usize;
        let hour = obs.arrival_time.hour() as usize;
        heatmap.cells[day][hour].push_opt(row.registration_wait);
    }
    heatmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn stats_of_odd_sample() {
        let stats = compute_stats(&[3.0, 1.0, 2.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stats_of_even_sample_uses_midpoint_median() {
        let stats = compute_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 4.5);
        // Sample variance 32/7.
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stats_of_empty_sample() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
    }

    fn observation(department: &str, doctor: &str, triage: &str, arrival: &str) -> VisitObservation {
        let arrival_time =
            NaiveDateTime::parse_from_str(arrival, "%Y-%m-%d %H:%M:%S").unwrap();
        VisitObservation {
            patient_id: "P00001".into(),
            department: department.into(),
            triage_level: triage.into(),
            visit_type: "Scheduled".into(),
            doctor_id: doctor.into(),
            outcome: "Discharged".into(),
            arrival_time,
            registration_time: Some(arrival_time),
            consultation_start_time: arrival_time,
            consultation_end_time: arrival_time,
        }
    }

    fn metrics_row(registration: Option<f64>, doctor: Option<f64>) -> VisitMetrics {
        VisitMetrics {
            registration_wait: registration,
            doctor_wait: doctor,
            consultation_duration: Some(10.0),
            total_hospital_time: 30.0,
        }
    }

    #[test]
    fn department_counts_include_quarantined_rows() {
        let observations = vec![
            observation("ER", "D001", "High", "2025-01-06 08:00:00"),
            observation("ER", "D002", "Low", "2025-01-06 09:00:00"),
            observation("OPD", "D001", "Low", "2025-01-07 10:00:00"),
        ];
        // Middle row quarantined: waits are None but it still counts.
        let metrics = vec![
            metrics_row(Some(4.0), Some(10.0)),
            metrics_row(None, None),
            metrics_row(Some(8.0), Some(30.0)),
        ];
        let stats = department_stats(&observations, &metrics);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].department, "ER");
        assert_eq!(stats[0].patient_count, 2);
        assert_eq!(stats[0].mean_registration_wait, Some(4.0));
        assert_eq!(stats[1].department, "OPD");
        assert_eq!(stats[1].patient_count, 1);
        let total: usize = stats.iter().map(|s| s.patient_count).sum();
        assert_eq!(total, observations.len());
    }

    #[test]
    fn doctors_sorted_by_volume() {
        let observations = vec![
            observation("ER", "D002", "Low", "2025-01-06 08:00:00"),
            observation("ER", "D002", "Low", "2025-01-06 09:00:00"),
            observation("ER", "D001", "Low", "2025-01-06 10:00:00"),
        ];
        let metrics = vec![
            metrics_row(Some(1.0), Some(5.0)),
            metrics_row(Some(1.0), Some(7.0)),
            metrics_row(Some(1.0), Some(9.0)),
        ];
        let stats = doctor_stats(&observations, &metrics);
        assert_eq!(stats[0].doctor_id, "D002");
        assert_eq!(stats[0].patient_count, 2);
        assert_eq!(stats[0].mean_doctor_wait, Some(6.0));
        assert_eq!(stats[1].doctor_id, "D001");
    }

    #[test]
    fn triage_stats_follow_reporting_order() {
        let observations = vec![
            observation("ER", "D001", "Low", "2025-01-06 08:00:00"),
            observation("ER", "D001", "Critical", "2025-01-06 09:00:00"),
        ];
        let metrics = vec![
            metrics_row(Some(20.0), Some(30.0)),
            metrics_row(Some(2.0), Some(3.0)),
        ];
        let stats = triage_stats(&observations, &metrics);
        let levels: Vec<&str> = stats.iter().map(|s| s.triage_level.as_str()).collect();
        assert_eq!(levels, TRIAGE_ORDER);
        assert_eq!(stats[0].patient_count, 1); // Critical
        assert_eq!(stats[0].doctor_wait_samples, vec![3.0]);
        assert_eq!(stats[1].patient_count, 0); // High, absent
        assert_eq!(stats[1].mean_doctor_wait, None);
    }

    #[test]
    fn arrival_patterns_bucket_by_hour_and_weekday() {
        // 2025-01-06 is a Monday.
        let observations = vec![
            observation("ER", "D001", "Low", "2025-01-06 08:15:00"),
            observation("ER", "D001", "Low", "2025-01-06 08:45:00"),
            observation("ER", "D001", "Low", "2025-01-12 23:00:00"), // Sunday
        ];
        let patterns = arrival_patterns(&observations);
        assert_eq!(patterns.hourly_counts[8], 2);
        assert_eq!(patterns.hourly_counts[23], 1);
        assert_eq!(patterns.weekday_counts[0], 2);
        assert_eq!(patterns.weekday_counts[6], 1);
    }

    #[test]
    fn heatmap_cell_means() {
        let observations = vec![
            observation("ER", "D001", "Low", "2025-01-06 08:15:00"),
            observation("ER", "D001", "Low", "2025-01-06 08:45:00"),
        ];
        let metrics = vec![
            metrics_row(Some(10.0), Some(5.0)),
            metrics_row(Some(20.0), Some(5.0)),
        ];
        let heatmap = wait_heatmap(&observations, &metrics);
        assert_eq!(heatmap.mean(0, 8), Some(15.0));
        assert_eq!(heatmap.mean(0, 9), None);
        assert_eq!(heatmap.max_mean(), Some(15.0));
    }
}
