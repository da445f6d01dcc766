//! The CSV handoff table: column layout, serialization and loading.
//!
//! The generator owns the schema; the analyzer trusts it. Timestamps are
//! rendered as text so the file stays greppable and loads with any CSV
//! tool.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use polars::prelude::*;

use crate::visit::Visit;

/// Column names, in file order.
pub mod columns {
    pub const PATIENT_ID: &str = "PatientID";
    pub const DEPARTMENT: &str = "Department";
    pub const TRIAGE_LEVEL: &str = "TriageLevel";
    pub const VISIT_TYPE: &str = "VisitType";
    pub const DOCTOR_ID: &str = "DoctorID";
    pub const OUTCOME: &str = "Outcome";
    pub const ARRIVAL_TIME: &str = "ArrivalTime";
    pub const REGISTRATION_TIME: &str = "RegistrationTime";
    pub const CONSULTATION_START_TIME: &str = "ConsultationStartTime";
    pub const CONSULTATION_END_TIME: &str = "ConsultationEndTime";

    pub const ALL: [&str; 10] = [
        PATIENT_ID,
        DEPARTMENT,
        TRIAGE_LEVEL,
        VISIT_TYPE,
        DOCTOR_ID,
        OUTCOME,
        ARRIVAL_TIME,
        REGISTRATION_TIME,
        CONSULTATION_START_TIME,
        CONSULTATION_END_TIME,
    ];
}

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .with_context(|| format!("Failed to parse timestamp {text:?}"))
}

/// Lay the generated visits out as a DataFrame in handoff column order.
pub fn visits_to_dataframe(visits: &[Visit]) -> PolarsResult<DataFrame> {
    let n = visits.len();

    let mut patient_ids = Vec::with_capacity(n);
    let mut departments = Vec::with_capacity(n);
    let mut triage_levels = Vec::with_capacity(n);
    let mut visit_types = Vec::with_capacity(n);
    let mut doctor_ids = Vec::with_capacity(n);
    let mut outcomes = Vec::with_capacity(n);
    let mut arrival_times = Vec::with_capacity(n);
    let mut registration_times = Vec::with_capacity(n);
    let mut consultation_starts = Vec::with_capacity(n);
    let mut consultation_ends = Vec::with_capacity(n);

    for visit in visits {
        patient_ids.push(visit.patient_id.clone());
        departments.push(visit.department.as_str());
        triage_levels.push(visit.triage_level.as_str());
        visit_types.push(visit.visit_type.as_str());
        doctor_ids.push(visit.doctor_id.clone());
        outcomes.push(visit.outcome.as_str());
        arrival_times.push(format_timestamp(&visit.arrival_time));
        registration_times.push(visit.registration_time.as_ref().map(format_timestamp));
        consultation_starts.push(format_timestamp(&visit.consultation_start_time));
        consultation_ends.push(format_timestamp(&visit.consultation_end_time));
    }

    df!(
        columns::PATIENT_ID => patient_ids,
        columns::DEPARTMENT => departments,
        columns::TRIAGE_LEVEL => triage_levels,
        columns::VISIT_TYPE => visit_types,
        columns::DOCTOR_ID => doctor_ids,
        columns::OUTCOME => outcomes,
        columns::ARRIVAL_TIME => arrival_times,
        columns::REGISTRATION_TIME => registration_times,
        columns::CONSULTATION_START_TIME => consultation_starts,
        columns::CONSULTATION_END_TIME => consultation_ends,
    )
}

/// Write the table with a header row. Missing registration times become
/// empty fields.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .finish(df)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    Ok(())
}

/// Read the handoff file back. Empty fields load as nulls; timestamp
/// columns stay textual and are parsed downstream.
pub fn read_csv(path: &Path) -> anyhow::Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse CSV from {}", path.display()))
}
