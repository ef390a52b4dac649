//! Result export: per-trial outcome rows as CSV for spreadsheet analysis,
//! and the aggregate report as JSON in a timestamped envelope.
//!
//! Columns: trial, rounds, winner, attacker_units_remaining,
//! defender_units_remaining, attacker_ipc_remaining,
//! defender_ipc_remaining, ipc_swing.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::sim::monte_carlo::MonteCarloReport;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
            Self::Csv(err) => write!(f, "failed to write CSV rows: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize report: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Write one CSV row per trial. Returns the number of rows written.
pub fn write_trials_csv(
    path: impl AsRef<Path>,
    report: &MonteCarloReport,
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(ExportError::Csv)?;
    writer
        .write_record([
            "trial",
            "rounds",
            "winner",
            "attacker_units_remaining",
            "defender_units_remaining",
            "attacker_ipc_remaining",
            "defender_ipc_remaining",
            "ipc_swing",
        ])
        .map_err(ExportError::Csv)?;

    for outcome in &report.outcomes {
        writer
            .write_record([
                outcome.trial.to_string(),
                outcome.rounds.to_string(),
                outcome.winner.as_str().to_string(),
                outcome.attacker_units_remaining.to_string(),
                outcome.defender_units_remaining.to_string(),
                outcome.attacker_ipc_remaining.to_string(),
                outcome.defender_ipc_remaining.to_string(),
                outcome.ipc_swing().to_string(),
            ])
            .map_err(ExportError::Csv)?;
    }

    writer.flush().map_err(ExportError::Io)?;
    Ok(report.outcomes.len())
}

#[derive(Debug, Serialize)]
struct ReportEnvelope<'a> {
    generated_at: String,
    report: &'a MonteCarloReport,
}

/// Write the aggregate report (without per-trial rows trimmed — the caller
/// decides what the report carries) as pretty-printed JSON.
pub fn write_report_json(
    path: impl AsRef<Path>,
    report: &MonteCarloReport,
) -> Result<(), ExportError> {
    let envelope = ReportEnvelope {
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    let payload = serde_json::to_string_pretty(&envelope).map_err(ExportError::Serialize)?;
    fs::write(path, payload).map_err(ExportError::Io)
}
