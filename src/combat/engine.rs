//! Combat resolution: the phase-ordered state machine that takes two
//! forces and a battle category through anti-aircraft fire, shore
//! bombardment, and submarine ambush into iterated simultaneous dice
//! rounds, until one side is eliminated.
//!
//! The caller's forces are cloned on entry and never mutated. Randomness
//! comes only from the injected [DiceRoller], so a fixed seed (or a
//! scripted roller) reproduces a battle exactly.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::dice::DiceRoller;
use crate::combat::pairing::effective_attacks;
use crate::combat::phases::{anti_aircraft_hits, bombardment_hits, submarine_surprise};
use crate::data::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleType {
    Land,
    Naval,
    Amphibious,
}

impl BattleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Naval => "naval",
            Self::Amphibious => "amphibious",
        }
    }
}

impl fmt::Display for BattleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised at the configuration boundary (CLI args, API payloads) before
/// any combat phase runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBattleType(pub String);

impl fmt::Display for UnknownBattleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown battle type '{}' (expected land, naval, or amphibious)",
            self.0
        )
    }
}

impl std::error::Error for UnknownBattleType {}

impl FromStr for BattleType {
    type Err = UnknownBattleType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "land" => Ok(Self::Land),
            "naval" => Ok(Self::Naval),
            "amphibious" => Ok(Self::Amphibious),
            _ => Err(UnknownBattleType(raw.to_string())),
        }
    }
}

/// Deep copy of both forces after a phase transition. `round` 0 is the
/// state right after the pre-combat phases, before any main-round dice;
/// `round` k is the state after round k completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub attackers: Vec<Unit>,
    pub defenders: Vec<Unit>,
}

impl RoundSnapshot {
    fn capture(round: u32, attackers: &[Unit], defenders: &[Unit]) -> Self {
        Self {
            round,
            attackers: attackers.to_vec(),
            defenders: defenders.to_vec(),
        }
    }

    pub fn attacker_ipc(&self) -> u32 {
        self.attackers.iter().map(|unit| unit.ipc).sum()
    }

    pub fn defender_ipc(&self) -> u32 {
        self.defenders.iter().map(|unit| unit.ipc).sum()
    }
}

/// Stable ascending-cost sort. Equal-cost units keep their input order,
/// which later phases observe through "first N in force order" removal.
pub fn sort_by_cost(units: &mut [Unit]) {
    units.sort_by_key(|unit| unit.ipc);
}

/// Casualty removal is always from the front of the force order, never a
/// targeted pick.
fn remove_from_front(units: &mut Vec<Unit>, count: usize) {
    let count = count.min(units.len());
    units.drain(..count);
}

/// Remove the first `count` units matching `predicate`, in force order,
/// keyed by id so the rest of the force is untouched.
fn remove_leading_matching(units: &mut Vec<Unit>, count: usize, predicate: impl Fn(&Unit) -> bool) {
    if count == 0 {
        return;
    }
    let doomed: HashSet<Uuid> = units
        .iter()
        .filter(|unit| predicate(unit))
        .take(count)
        .map(|unit| unit.id)
        .collect();
    units.retain(|unit| !doomed.contains(&unit.id));
}

/// Main-round attacker roll. Submarines that already fired a surprise
/// attack this round sit the roll out. Returns (general hits, submarine
/// hits); submarine hits can only strip naval defenders.
fn attacker_round_hits(
    attackers: &[Unit],
    effective: &[u32],
    exclude_submarines: bool,
    dice: &mut dyn DiceRoller,
) -> (usize, usize) {
    let mut thresholds = Vec::with_capacity(attackers.len());
    let mut from_submarine = Vec::with_capacity(attackers.len());
    for (unit, value) in attackers.iter().zip(effective) {
        if exclude_submarines && unit.is_submarine() {
            continue;
        }
        thresholds.push(*value);
        from_submarine.push(unit.is_submarine());
    }
    if thresholds.is_empty() {
        return (0, 0);
    }

    let batch = dice.roll(&thresholds);
    let mut general_hits = 0;
    let mut sub_hits = 0;
    for (hit, is_sub) in batch.hits.iter().zip(&from_submarine) {
        if *hit {
            if *is_sub {
                sub_hits += 1;
            } else {
                general_hits += 1;
            }
        }
    }
    (general_hits, sub_hits)
}

fn defender_round_hits(defenders: &[Unit], dice: &mut dyn DiceRoller) -> usize {
    if defenders.is_empty() {
        return 0;
    }
    let thresholds: Vec<u32> = defenders.iter().map(|unit| unit.defense).collect();
    dice.roll(&thresholds).hit_count()
}

/// Resolve one combat to completion and return the full snapshot history.
///
/// Phase order: stable cost sort of both forces; shore bombardment
/// (amphibious only, tally held for round 0) and removal of naval
/// attackers; anti-aircraft fire and permanent removal of AAA guns from
/// the defense; then simultaneous rounds until a force empties. An empty
/// force at entry is valid: the history is the initial snapshot alone.
///
/// Termination is probabilistic: as long as at least one surviving unit on
/// each side has a nonzero hit threshold the expected round count is
/// finite, but there is no fixed bound.
pub fn run_combat(
    attackers_in: &[Unit],
    defenders_in: &[Unit],
    battle_type: BattleType,
    dice: &mut dyn DiceRoller,
) -> Vec<RoundSnapshot> {
    let mut attackers = attackers_in.to_vec();
    let mut defenders = defenders_in.to_vec();
    sort_by_cost(&mut attackers);
    sort_by_cost(&mut defenders);

    let mut bombardment_tally = 0;
    if battle_type == BattleType::Amphibious {
        bombardment_tally = bombardment_hits(&attackers, dice);
        attackers.retain(|unit| !unit.is_naval());
    }

    let aaa_hits = anti_aircraft_hits(&attackers, &defenders, dice);
    remove_leading_matching(&mut attackers, aaa_hits, Unit::is_air);
    defenders.retain(|unit| !unit.is_anti_aircraft());

    let mut history = vec![RoundSnapshot::capture(0, &attackers, &defenders)];
    let mut round: u32 = 0;

    while !attackers.is_empty() && !defenders.is_empty() {
        let effective = effective_attacks(&attackers);

        let mut surprise_fired = false;
        if battle_type == BattleType::Naval {
            if let Some(hits) = submarine_surprise(&attackers, &defenders, &effective, dice) {
                surprise_fired = true;
                remove_leading_matching(&mut defenders, hits, Unit::is_naval);
            }
        }

        let (mut general_hits, sub_hits) =
            attacker_round_hits(&attackers, &effective, surprise_fired, dice);
        let defense_hits = defender_round_hits(&defenders, dice);

        if round == 0 {
            general_hits += bombardment_tally;
        }

        remove_from_front(&mut attackers, defense_hits);
        if !surprise_fired {
            remove_leading_matching(&mut defenders, sub_hits, Unit::is_naval);
        }
        remove_from_front(&mut defenders, general_hits);

        round += 1;
        history.push(RoundSnapshot::capture(round, &attackers, &defenders));
    }

    history
}
