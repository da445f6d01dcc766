//! Per-row duration metrics and the negative-duration quarantine.

use anyhow::Context;
use chrono::NaiveDateTime;
use log::warn;
use polars::prelude::DataFrame;

use crate::table::{columns, parse_timestamp};

/// One loaded row of the handoff file. Categorical fields stay as the
/// strings the generator wrote; the generator is the sole, trusted data
/// source, so no value validation happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitObservation {
    pub patient_id: String,
    pub department: String,
    pub triage_level: String,
    pub visit_type: String,
    pub doctor_id: String,
    pub outcome: String,
    pub arrival_time: NaiveDateTime,
    pub registration_time: Option<NaiveDateTime>,
    pub consultation_start_time: NaiveDateTime,
    pub consultation_end_time: NaiveDateTime,
}

/// Derived wait/duration metrics of one row, in minutes.
///
/// The three stage metrics are `None` when the underlying timestamp is
/// missing or the row was quarantined; `total_hospital_time` is always
/// computable because arrival and consultation end are never nulled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitMetrics {
    pub registration_wait: Option<f64>,
    pub doctor_wait: Option<f64>,
    pub consultation_duration: Option<f64>,
    pub total_hospital_time: f64,
}

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Convert the loaded DataFrame into typed observations, parsing the
/// timestamp columns.
pub fn observations_from_dataframe(df: &DataFrame) -> anyhow::Result<Vec<VisitObservation>> {
    let patient_ids = df.column(columns::PATIENT_ID)?.str()?;
    let departments = df.column(columns::DEPARTMENT)?.str()?;
    let triage_levels = df.column(columns::TRIAGE_LEVEL)?.str()?;
    let visit_types = df.column(columns::VISIT_TYPE)?.str()?;
    let doctor_ids = df.column(columns::DOCTOR_ID)?.str()?;
    let outcomes = df.column(columns::OUTCOME)?.str()?;
    let arrivals = df.column(columns::ARRIVAL_TIME)?.str()?;
    let registrations = df.column(columns::REGISTRATION_TIME)?.str()?;
    let consultation_starts = df.column(columns::CONSULTATION_START_TIME)?.str()?;
    let consultation_ends = df.column(columns::CONSULTATION_END_TIME)?.str()?;

    let required = |value: Option<&str>, column: &str, row: usize| {
        value
            .map(str::to_string)
            .with_context(|| format!("Missing {column} at row {row}"))
    };

    let mut observations = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let arrival_time = parse_timestamp(&required(arrivals.get(i), columns::ARRIVAL_TIME, i)?)?;
        let registration_time = registrations.get(i).map(parse_timestamp).transpose()?;
        let consultation_start_time = parse_timestamp(&required(
            consultation_starts.get(i),
            columns::CONSULTATION_START_TIME,
            i,
        )?)?;
        let consultation_end_time = parse_timestamp(&required(
            consultation_ends.get(i),
            columns::CONSULTATION_END_TIME,
            i,
        )?)?;

        observations.push(VisitObservation {
            patient_id: required(patient_ids.get(i), columns::PATIENT_ID, i)?,
            department: required(departments.get(i), columns::DEPARTMENT, i)?,
            triage_level: required(triage_levels.get(i), columns::TRIAGE_LEVEL, i)?,
            visit_type: required(visit_types.get(i), columns::VISIT_TYPE, i)?,
            doctor_id: required(doctor_ids.get(i), columns::DOCTOR_ID, i)?,
            outcome: required(outcomes.get(i), columns::OUTCOME, i)?,
            arrival_time,
            registration_time,
            consultation_start_time,
            consultation_end_time,
        });
    }
    Ok(observations)
}

/// Compute the four duration metrics per observation. Rows with a missing
/// registration time get `None` for the two waits that depend on it.
pub fn derive_metrics(observations: &[VisitObservation]) -> Vec<VisitMetrics> {
    observations
        .iter()
        .map(|obs| VisitMetrics {
            registration_wait: obs
                .registration_time
                .map(|reg| minutes_between(obs.arrival_time, reg)),
            doctor_wait: obs
                .registration_time
                .map(|reg| minutes_between(reg, obs.consultation_start_time)),
            consultation_duration: Some(minutes_between(
                obs.consultation_start_time,
                obs.consultation_end_time,
            )),
            total_hospital_time: minutes_between(obs.arrival_time, obs.consultation_end_time),
        })
        .collect()
}

/// Quarantine rows whose derived stage metrics are negative (clock skew or
/// injected corruption). The three stage metrics are nulled so the row
/// drops out of latency statistics while staying in volume counts;
/// `total_hospital_time` is left as computed. Returns how many rows were
/// quarantined.
pub fn quarantine_corrupted(metrics: &mut [VisitMetrics]) -> usize {
    let mut corrupted = 0;
    for row in metrics.iter_mut() {
        let negative = |value: Option<f64>| value.is_some_and(|v| v < 0.0);
        if negative(row.registration_wait)
            || negative(row.doctor_wait)
            || negative(row.consultation_duration)
        {
            row.registration_wait = None;
            row.doctor_wait = None;
            row.consultation_duration = None;
            corrupted += 1;
        }
    }
    if corrupted > 0 {
        warn!("Found {corrupted} records with negative durations; nulling their metrics");
    }
    corrupted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(text: &str) -> NaiveDateTime {
        parse_timestamp(text).unwrap()
    }

    fn observation(
        arrival: &str,
        registration: Option<&str>,
        start: &str,
        end: &str,
    ) -> VisitObservation {
        VisitObservation {
            patient_id: "P00001".into(),
            department: "ER".into(),
            triage_level: "High".into(),
            visit_type: "Emergency".into(),
            doctor_id: "D001".into(),
            outcome: "Discharged".into(),
            arrival_time: timestamp(arrival),
            registration_time: registration.map(timestamp),
            consultation_start_time: timestamp(start),
            consultation_end_time: timestamp(end),
        }
    }

    #[test]
    fn metrics_in_minutes() {
        let obs = observation(
            "2025-01-01 08:00:00",
            Some("2025-01-01 08:05:00"),
            "2025-01-01 08:35:00",
            "2025-01-01 08:50:30",
        );
        let metrics = derive_metrics(&[obs]);
        assert_eq!(metrics[0].registration_wait, Some(5.0));
        assert_eq!(metrics[0].doctor_wait, Some(30.0));
        assert_eq!(metrics[0].consultation_duration, Some(15.5));
        assert_eq!(metrics[0].total_hospital_time, 50.5);
    }

    #[test]
    fn missing_registration_nulls_dependent_waits() {
        let obs = observation(
            "2025-01-01 08:00:00",
            None,
            "2025-01-01 08:35:00",
            "2025-01-01 08:50:00",
        );
        let metrics = derive_metrics(&[obs]);
        assert_eq!(metrics[0].registration_wait, None);
        assert_eq!(metrics[0].doctor_wait, None);
        assert_eq!(metrics[0].consultation_duration, Some(15.0));
        assert_eq!(metrics[0].total_hospital_time, 50.0);
    }

    #[test]
    fn quarantine_nulls_stage_metrics_but_keeps_total() {
        let mut metrics = vec![
            VisitMetrics {
                registration_wait: Some(5.0),
                doctor_wait: Some(-3.0),
                consultation_duration: Some(15.0),
                total_hospital_time: 17.0,
            },
            VisitMetrics {
                registration_wait: Some(4.0),
                doctor_wait: Some(20.0),
                consultation_duration: Some(12.0),
                total_hospital_time: 36.0,
            },
        ];
        let corrupted = quarantine_corrupted(&mut metrics);
        assert_eq!(corrupted, 1);
        assert_eq!(metrics[0].registration_wait, None);
        assert_eq!(metrics[0].doctor_wait, None);
        assert_eq!(metrics[0].consultation_duration, None);
        assert_eq!(metrics[0].total_hospital_time, 17.0);
        assert_eq!(metrics[1].doctor_wait, Some(20.0));
    }

    #[test]
    fn rows_with_missing_registration_are_not_corrupted() {
        let mut metrics = vec![VisitMetrics {
            registration_wait: None,
            doctor_wait: None,
            consultation_duration: Some(10.0),
            total_hospital_time: 40.0,
        }];
        assert_eq!(quarantine_corrupted(&mut metrics), 0);
    }
}
