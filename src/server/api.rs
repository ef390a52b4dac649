//! JSON payload handlers behind the route table. Handlers stay pure
//! string-to-string so the route layer can be exercised without a socket.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::combat::dice::Dice;
use crate::combat::engine::{run_combat, BattleType, RoundSnapshot, UnknownBattleType};
use crate::data::catalog::Catalog;
use crate::data::unit::UnitType;
use crate::sim::monte_carlo::{run_monte_carlo_parallel, MonteCarloReport};

/// Upper bound on trials per montecarlo request; keeps one request from
/// pinning the server for minutes.
pub const MAX_TRIALS_PER_REQUEST: usize = 1_000_000;

#[derive(Debug)]
pub enum RequestError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RequestError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "overlord",
        "time": Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Serialize)]
struct UnitListing<'a> {
    name: &'a str,
    ipc: u32,
    attack: u32,
    defense: u32,
    unit_type: UnitType,
    #[serde(rename = "move")]
    movement: u32,
    max_hit_points: u32,
}

pub fn units_payload() -> Result<String, serde_json::Error> {
    let catalog = Catalog::load_default();
    let units: Vec<UnitListing<'_>> = catalog
        .entries()
        .map(|(name, spec)| UnitListing {
            name,
            ipc: spec.ipc,
            attack: spec.attack,
            defense: spec.defense,
            unit_type: spec.unit_type,
            movement: spec.movement,
            max_hit_points: spec.max_hit_points,
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "units": units }))
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    attackers: Vec<String>,
    defenders: Vec<String>,
    battle_type: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SimulateResponse {
    status: &'static str,
    battle_type: BattleType,
    seed: Option<u64>,
    rounds: u32,
    history: Vec<RoundSnapshot>,
}

/// Resolve one combat and return the full snapshot history. Omitting the
/// seed draws one from entropy, so repeated requests differ.
pub fn simulate_payload(body: &str) -> Result<String, RequestError> {
    let request: SimulateRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    let (battle_type, attackers, defenders) = resolve_scenario(
        &request.battle_type,
        &request.attackers,
        &request.defenders,
    )?;

    let mut dice = match request.seed {
        Some(seed) => Dice::seeded(seed),
        None => Dice::from_entropy(),
    };
    let history = run_combat(&attackers, &defenders, battle_type, &mut dice);
    let rounds = history.last().map(|snapshot| snapshot.round).unwrap_or(0);

    let response = SimulateResponse {
        status: "ok",
        battle_type,
        seed: request.seed,
        rounds,
        history,
    };
    serde_json::to_string_pretty(&response).map_err(RequestError::Parse)
}

fn default_trials() -> usize {
    1000
}

fn default_seed() -> u64 {
    7
}

#[derive(Debug, Deserialize)]
struct MonteCarloRequest {
    attackers: Vec<String>,
    defenders: Vec<String>,
    battle_type: String,
    #[serde(default = "default_trials")]
    trials: usize,
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default)]
    include_outcomes: bool,
}

#[derive(Debug, Serialize)]
struct MonteCarloResponse {
    status: &'static str,
    report: MonteCarloReport,
}

/// Run a Monte Carlo batch over one scenario and return the aggregate
/// report; per-trial rows only on request.
pub fn montecarlo_payload(body: &str) -> Result<String, RequestError> {
    let request: MonteCarloRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    if request.trials == 0 {
        return Err(RequestError::Validation(
            "trials must be at least 1".to_string(),
        ));
    }
    if request.trials > MAX_TRIALS_PER_REQUEST {
        return Err(RequestError::Validation(format!(
            "trials must be at most {MAX_TRIALS_PER_REQUEST}"
        )));
    }

    let (battle_type, attackers, defenders) = resolve_scenario(
        &request.battle_type,
        &request.attackers,
        &request.defenders,
    )?;

    let report = run_monte_carlo_parallel(
        &attackers,
        &defenders,
        battle_type,
        request.trials,
        request.seed,
    );
    let report = if request.include_outcomes {
        report
    } else {
        report.without_outcomes()
    };

    let response = MonteCarloResponse {
        status: "ok",
        report,
    };
    serde_json::to_string_pretty(&response).map_err(RequestError::Parse)
}

fn resolve_scenario(
    battle_type: &str,
    attacker_names: &[String],
    defender_names: &[String],
) -> Result<(BattleType, Vec<crate::data::unit::Unit>, Vec<crate::data::unit::Unit>), RequestError>
{
    let battle_type: BattleType = battle_type
        .parse()
        .map_err(|err: UnknownBattleType| RequestError::Validation(err.to_string()))?;

    let catalog = Catalog::load_default();
    let attackers = catalog
        .build_force(attacker_names)
        .map_err(|err| RequestError::Validation(err.to_string()))?;
    let defenders = catalog
        .build_force(defender_names)
        .map_err(|err| RequestError::Validation(err.to_string()))?;

    Ok((battle_type, attackers, defenders))
}
