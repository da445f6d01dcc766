//! Analyze the generated hospital operations dataset.
//!
//! Expects the CSV handoff file to exist at the configured path; if it is
//! missing, prints an instruction and exits without running the pipeline.

use std::path::Path;

use anyhow::Result;

use hospital_flow::analyze::{self, AnalysisOutcome};
use hospital_flow::config::{Config, CONFIG_FILE};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(Path::new(CONFIG_FILE))?;
    match analyze::run(&config.data_path, &config.output_dir)? {
        AnalysisOutcome::MissingInput => {
            println!(
                "Error: {} not found. Please run generate_data first.",
                config.data_path.display()
            );
        }
        AnalysisOutcome::Completed(_) => {
            println!("\n--- Analysis complete ---");
            println!("All plots saved to {}", config.output_dir.display());
        }
    }
    Ok(())
}
