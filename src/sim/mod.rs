pub mod export_csv;
pub mod monte_carlo;

pub use export_csv::{write_report_json, write_trials_csv, ExportError};
pub use monte_carlo::{
    run_monte_carlo, run_monte_carlo_parallel, MonteCarloReport, TrialOutcome, TrialWinner,
};
