//! Unit catalog: named templates loaded from JSON, resolved by name to
//! build forces. The shipped catalog lives at data/units/units.json; an
//! embedded copy backs deployments that run without a data directory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::data::unit::{Unit, UnitType};

pub const DEFAULT_UNITS_PATH: &str = "data/units/units.json";

const BUILTIN_UNITS_JSON: &str = include_str!("../../data/units/units.json");

/// One catalog template as stored on disk: everything a unit needs except
/// its name (the JSON key) and its id (allocated per instantiation).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitSpec {
    pub ipc: u32,
    pub attack: u32,
    pub defense: u32,
    pub unit_type: UnitType,
    #[serde(rename = "move")]
    pub movement: u32,
    pub max_hit_points: u32,
}

#[derive(Debug)]
pub enum CatalogError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    UnknownUnit(String),
    InvalidTemplate { name: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read unit catalog: {err}"),
            Self::Parse(err) => write!(f, "failed to parse unit catalog JSON: {err}"),
            Self::UnknownUnit(name) => write!(f, "unknown unit name '{name}'"),
            Self::InvalidTemplate { name, reason } => {
                write!(f, "invalid unit template '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Name-keyed unit templates. BTreeMap keeps listing order deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: BTreeMap<String, UnitSpec>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(CatalogError::Read)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let templates: BTreeMap<String, UnitSpec> =
            serde_json::from_str(raw).map_err(CatalogError::Parse)?;
        for (name, spec) in &templates {
            if spec.max_hit_points == 0 {
                return Err(CatalogError::InvalidTemplate {
                    name: name.clone(),
                    reason: "max_hit_points must be at least 1".to_string(),
                });
            }
        }
        Ok(Self { templates })
    }

    /// The catalog compiled into the binary. The embedded JSON is validated
    /// by the catalog tests, so a parse failure here is a build defect.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_UNITS_JSON).expect("embedded unit catalog is valid")
    }

    /// Shipped catalog from disk, falling back to the embedded copy.
    pub fn load_default() -> Self {
        Self::load(DEFAULT_UNITS_PATH).unwrap_or_else(|_| Self::builtin())
    }

    pub fn get(&self, name: &str) -> Option<&UnitSpec> {
        self.templates.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &UnitSpec)> {
        self.templates.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Materialize one unit from a template. Every instantiation gets a
    /// fresh id; cloning the returned unit afterwards preserves it.
    pub fn instantiate(&self, name: &str) -> Result<Unit, CatalogError> {
        let spec = self
            .templates
            .get(name)
            .ok_or_else(|| CatalogError::UnknownUnit(name.to_string()))?;
        Ok(Unit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ipc: spec.ipc,
            attack: spec.attack,
            defense: spec.defense,
            unit_type: spec.unit_type,
            movement: spec.movement,
            max_hit_points: spec.max_hit_points,
            cur_hit_points: spec.max_hit_points,
        })
    }

    /// Build a force from named units, in the given order. Fails on the
    /// first unknown name without allocating the rest.
    pub fn build_force(&self, names: &[impl AsRef<str>]) -> Result<Vec<Unit>, CatalogError> {
        names
            .iter()
            .map(|name| self.instantiate(name.as_ref()))
            .collect()
    }
}
