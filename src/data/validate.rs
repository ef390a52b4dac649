//! Unit catalog validation: structural checks over a units JSON file,
//! reported as severity-tagged diagnostics rather than a hard failure so
//! the CLI can print everything it found in one pass.

use std::fmt;
use std::fs;

use serde_json::Value;

use crate::combat::dice::DIE_SIDES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

const REQUIRED_INT_FIELDS: &[&str] = &["ipc", "attack", "defense", "move", "max_hit_points"];
const UNIT_TYPE_ENUM: &[&str] = &["land", "naval", "air"];

pub fn validate_unit_catalog(path: &str) -> Result<ValidationReport, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("unable to read '{path}': {err}"))?;
    let payload: Value = serde_json::from_str(&raw)
        .map_err(|err| format!("unable to parse json '{path}': {err}"))?;

    let entries = payload
        .as_object()
        .ok_or_else(|| "expected top-level JSON object of name -> template".to_string())?;

    let mut report = ValidationReport::default();

    for (name, entry) in entries {
        let Some(template) = entry.as_object() else {
            report.push(
                ValidationSeverity::Error,
                name.clone(),
                "template is not an object",
            );
            continue;
        };

        for field in REQUIRED_INT_FIELDS {
            match template.get(*field) {
                None => report.push(
                    ValidationSeverity::Error,
                    name.clone(),
                    format!("missing required field '{field}'"),
                ),
                Some(value) if value.as_u64().is_none() => report.push(
                    ValidationSeverity::Error,
                    name.clone(),
                    format!("field '{field}' must be a non-negative integer"),
                ),
                Some(_) => {}
            }
        }

        match template.get("unit_type").and_then(Value::as_str) {
            Some(unit_type) if UNIT_TYPE_ENUM.contains(&unit_type) => {}
            Some(unit_type) => report.push(
                ValidationSeverity::Error,
                name.clone(),
                format!("unknown unit_type '{unit_type}'"),
            ),
            None => report.push(
                ValidationSeverity::Error,
                name.clone(),
                "missing or non-string field 'unit_type'",
            ),
        }

        if template.get("max_hit_points").and_then(Value::as_u64) == Some(0) {
            report.push(
                ValidationSeverity::Error,
                name.clone(),
                "max_hit_points must be at least 1",
            );
        }

        if template.get("ipc").and_then(Value::as_u64) == Some(0) {
            report.push(
                ValidationSeverity::Warning,
                name.clone(),
                "zero cost: unit sorts ahead of every priced unit and is removed first",
            );
        }

        for field in ["attack", "defense"] {
            if let Some(value) = template.get(field).and_then(Value::as_u64) {
                if value > u64::from(DIE_SIDES) + 1 {
                    report.push(
                        ValidationSeverity::Warning,
                        name.clone(),
                        format!("{field} {value} exceeds the die range and caps at certain-hit"),
                    );
                }
            }
        }
    }

    Ok(report)
}
