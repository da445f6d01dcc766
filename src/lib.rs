//! Synthetic hospital visit-flow data: generation and descriptive analysis.
//!
//! The crate fabricates patient visit records (arrival, registration and
//! consultation timestamps plus categorical attributes) with plausible
//! timing relationships, writes them to a flat CSV file, and analyzes that
//! file in a separate pass: per-row wait metrics, grouped aggregates and
//! chart images.
//!
//! The two halves are wired to the `generate_data` and `analyze_flow`
//! binaries and communicate only through the CSV handoff file.

pub mod analyze;
pub mod charts;
pub mod config;
pub mod error;
pub mod generate;
pub mod seeded_rng;
pub mod table;
pub mod visit;

pub use config::Config;
pub use error::ChartError;
pub use visit::Visit;
