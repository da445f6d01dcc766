//! Run configuration for both binaries.
//!
//! Defaults reproduce the reference dataset (5000 records, seed 42,
//! arrivals over January 2025). An optional YAML file next to the
//! binaries overrides individual keys; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

/// File name probed for overrides in the working directory.
pub const CONFIG_FILE: &str = "hospital_flow.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of visit records to generate.
    pub num_records: usize,
    /// Global seed controlling all randomness in a generation run.
    pub global_seed: u64,
    /// First day of the arrival window.
    pub start_date: NaiveDate,
    /// Length of the arrival window in days.
    pub window_days: i64,
    /// Per-row probability of nulling `RegistrationTime`.
    pub missing_registration_rate: f64,
    /// CSV handoff file written by the generator and read by the analyzer.
    pub data_path: PathBuf,
    /// Directory the analyzer writes chart images into.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_records: 5000,
            global_seed: 42,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1)
                .expect("valid default start date"),
            window_days: 30,
            missing_registration_rate: 0.01,
            data_path: PathBuf::from("hospital_operations_data.csv"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// Load overrides from `path`, falling back to defaults when the file
    /// does not exist. A present but malformed file is a fatal error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("does_not_exist.yaml")).unwrap();
        assert_eq!(config.num_records, 5000);
        assert_eq!(config.global_seed, 42);
        assert_eq!(config.window_days, 30);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "num_records: 100\nglobal_seed: 7").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.num_records, 100);
        assert_eq!(config.global_seed, 7);
        assert_eq!(config.missing_registration_rate, 0.01);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "record_count: 100").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
