//! Unit records: the typed military units the combat engine fights with.
//! Capability checks (bombardment, submarine rules, AAA) key off the unit
//! name, matching the catalog entries in data/units/units.json.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const INFANTRY: &str = "infantry";
pub const ARTILLERY: &str = "artillery";
pub const SUBMARINE: &str = "submarine";
pub const DESTROYER: &str = "destroyer";
pub const CRUISER: &str = "cruiser";
pub const BATTLESHIP: &str = "battleship";
pub const ANTI_AIRCRAFT_ARTILLERY: &str = "anti-aircraft artillery";

/// Unit names allowed to shore-bombard in amphibious assaults.
pub const CAN_BOMBARD_NAMES: &[&str] = &[CRUISER, BATTLESHIP];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Land,
    Naval,
    Air,
}

/// A single unit instance. The id is allocated once at instantiation and
/// preserved by `Clone`, so a unit can be tracked through snapshots and
/// removed by id without relying on reference identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub name: String,
    /// Purchase cost; governs force ordering and outcome scoring.
    pub ipc: u32,
    pub attack: u32,
    pub defense: u32,
    pub unit_type: UnitType,
    #[serde(rename = "move")]
    pub movement: u32,
    pub max_hit_points: u32,
    pub cur_hit_points: u32,
}

impl Unit {
    pub fn is_air(&self) -> bool {
        self.unit_type == UnitType::Air
    }

    pub fn is_naval(&self) -> bool {
        self.unit_type == UnitType::Naval
    }

    pub fn can_bombard(&self) -> bool {
        CAN_BOMBARD_NAMES.contains(&self.name.as_str())
    }

    pub fn is_submarine(&self) -> bool {
        self.name == SUBMARINE
    }

    pub fn is_anti_aircraft(&self) -> bool {
        self.name == ANTI_AIRCRAFT_ARTILLERY
    }
}
