//! Generator-to-analyzer scenarios exercised through the CSV handoff file.

use hospital_flow::analyze::{self, AnalysisOutcome};
use hospital_flow::config::Config;
use hospital_flow::table::{self, columns};
use hospital_flow::{generate, visit::TriageLevel};
use tempfile::tempdir;

fn small_config(num_records: usize) -> Config {
    Config {
        num_records,
        ..Config::default()
    }
}

#[test]
fn hundred_record_run_produces_complete_table() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("hospital_operations_data.csv");

    let config = Config {
        data_path: data_path.clone(),
        ..small_config(100)
    };
    let visits = generate::generate_visits(&config);
    assert_eq!(visits.len(), 100);

    let mut df = table::visits_to_dataframe(&visits).unwrap();
    table::write_csv(&mut df, &data_path).unwrap();

    let loaded = table::read_csv(&data_path).unwrap();
    assert_eq!(loaded.height(), 100);

    let names: Vec<String> = loaded
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, columns::ALL);

    // Bernoulli(0.01) over 100 rows: expect about one null, allow
    // binomial spread.
    let nulls = loaded
        .column(columns::REGISTRATION_TIME)
        .unwrap()
        .null_count();
    assert!(nulls <= 5, "unexpectedly many nulls: {nulls}");

    let report = analyze::build_report(&loaded).unwrap();
    assert_eq!(report.total_rows, 100);
    assert_eq!(report.missing_registration_rows, nulls);
    assert!(
        report.metrics.iter().all(|m| m.total_hospital_time >= 0.0),
        "negative total hospital time"
    );
}

#[test]
fn department_counts_sum_to_table_height() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("visits.csv");

    let config = Config {
        data_path: data_path.clone(),
        ..small_config(500)
    };
    let mut df = table::visits_to_dataframe(&generate::generate_visits(&config)).unwrap();
    table::write_csv(&mut df, &data_path).unwrap();

    let loaded = table::read_csv(&data_path).unwrap();
    let report = analyze::build_report(&loaded).unwrap();
    let total: usize = report
        .department_stats
        .iter()
        .map(|d| d.patient_count)
        .sum();
    assert_eq!(total, loaded.height());
}

#[test]
fn queue_jump_survives_the_round_trip() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("visits.csv");

    let config = Config {
        data_path: data_path.clone(),
        ..small_config(1500)
    };
    let visits = generate::generate_visits(&config);
    let critical = visits
        .iter()
        .filter(|v| v.triage_level == TriageLevel::Critical)
        .count();
    assert!(critical >= 100);

    let mut df = table::visits_to_dataframe(&visits).unwrap();
    table::write_csv(&mut df, &data_path).unwrap();

    let report = analyze::build_report(&table::read_csv(&data_path).unwrap()).unwrap();
    let by_level = |level: &str| {
        report
            .triage_stats
            .iter()
            .find(|t| t.triage_level == level)
            .and_then(|t| t.mean_doctor_wait)
            .unwrap()
    };
    assert!(by_level("Critical") < by_level("Low"));
    assert!(by_level("Critical") < by_level("Medium"));
}

#[test]
fn missing_input_is_reported_without_side_effects() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("absent.csv");
    let output_dir = dir.path().join("output");

    let outcome = analyze::run(&data_path, &output_dir).unwrap();
    assert!(matches!(outcome, AnalysisOutcome::MissingInput));
    assert!(!output_dir.exists(), "output dir should not be created");
}
