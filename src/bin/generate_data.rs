//! Generate the synthetic hospital operations dataset.
//!
//! Writes the CSV handoff file at the configured path (default
//! `hospital_operations_data.csv`) and prints a sample plus the schema.

use std::path::Path;

use anyhow::Result;
use log::info;

use hospital_flow::config::{Config, CONFIG_FILE};
use hospital_flow::{generate, table};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(Path::new(CONFIG_FILE))?;
    info!(
        "Generating {} synthetic visit records (seed {})",
        config.num_records, config.global_seed
    );

    let visits = generate::generate_visits(&config);
    let missing = visits
        .iter()
        .filter(|v| v.registration_time.is_none())
        .count();
    let mut df = table::visits_to_dataframe(&visits)?;
    table::write_csv(&mut df, &config.data_path)?;

    println!(
        "Successfully generated {} records to {}",
        df.height(),
        config.data_path.display()
    );
    info!("{missing} records with missing RegistrationTime");

    println!("\nSample data:");
    println!("{}", df.head(Some(5)));
    println!("\nSchema:");
    println!("{:?}", df.schema());

    Ok(())
}
