use std::env;

use crate::combat::dice::Dice;
use crate::combat::engine::{run_combat, BattleType};
use crate::data::catalog::{Catalog, DEFAULT_UNITS_PATH};
use crate::data::validate::validate_unit_catalog;
use crate::parallel::pool::TrialPool;
use crate::server;
use crate::sim::export_csv::{write_report_json, write_trials_csv};
use crate::sim::monte_carlo::run_monte_carlo_parallel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Simulate,
    MonteCarlo,
    Export,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("simulate") => Some(Command::Simulate),
        Some("montecarlo") => Some(Command::MonteCarlo),
        Some("export") => Some(Command::Export),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::MonteCarlo) => handle_montecarlo(args),
        Some(Command::Export) => handle_export(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: overlord <serve|simulate|montecarlo|export|validate>");
            2
        }
    }
}

/// Stock scenarios per battle category, mirroring recorded games; used
/// when a command is run without explicit forces.
pub fn default_scenario(battle_type: BattleType) -> (Vec<&'static str>, Vec<&'static str>) {
    match battle_type {
        BattleType::Land => (
            vec![
                "infantry", "infantry", "infantry", "infantry", "infantry", "infantry",
                "infantry", "infantry", "infantry", "artillery", "artillery", "tank",
            ],
            vec!["infantry", "infantry", "infantry", "artillery", "tank"],
        ),
        BattleType::Amphibious => (
            vec![
                "fighter", "fighter", "fighter", "fighter", "bomber", "artillery",
                "infantry", "infantry", "tank", "cruiser", "cruiser",
            ],
            vec!["fighter", "fighter", "tank", "artillery", "infantry", "infantry"],
        ),
        BattleType::Naval => (
            vec![
                "destroyer", "fighter", "fighter", "cruiser", "cruiser", "bomber",
                "bomber", "aircraft carrier",
            ],
            vec!["fighter", "fighter", "battleship", "battleship", "aircraft carrier"],
        ),
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("OVERLORD_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let battle_type = match parse_battle_arg(args.get(2)) {
        Ok(battle_type) => battle_type,
        Err(code) => return code,
    };
    let seed = parse_u64_arg(args.get(3), "seed", 7);
    let as_table = args.iter().any(|arg| arg == "--table");

    let catalog = Catalog::load_default();
    let (attacker_names, defender_names) = default_scenario(battle_type);
    let (attackers, defenders) = match (
        catalog.build_force(&attacker_names),
        catalog.build_force(&defender_names),
    ) {
        (Ok(attackers), Ok(defenders)) => (attackers, defenders),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("failed to build forces: {err}");
            return 1;
        }
    };

    let mut dice = Dice::seeded(seed);
    let history = run_combat(&attackers, &defenders, battle_type, &mut dice);

    if as_table {
        println!("round\tattackers\tdefenders\tattacker_ipc\tdefender_ipc");
        for snapshot in &history {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                snapshot.round,
                snapshot.attackers.len(),
                snapshot.defenders.len(),
                snapshot.attacker_ipc(),
                snapshot.defender_ipc()
            );
        }
        0
    } else {
        match serde_json::to_string_pretty(&history) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize combat history: {err}");
                1
            }
        }
    }
}

fn handle_montecarlo(args: &[String]) -> i32 {
    let battle_type = match parse_battle_arg(args.get(2)) {
        Ok(battle_type) => battle_type,
        Err(code) => return code,
    };
    let trials = parse_usize_arg(args.get(3), "trials", 1000);
    let seed = parse_u64_arg(args.get(4), "seed", 7);
    let workers = parse_usize_arg(args.get(5), "workers", 0);

    let catalog = Catalog::load_default();
    let (attacker_names, defender_names) = default_scenario(battle_type);
    let (attackers, defenders) = match (
        catalog.build_force(&attacker_names),
        catalog.build_force(&defender_names),
    ) {
        (Ok(attackers), Ok(defenders)) => (attackers, defenders),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("failed to build forces: {err}");
            return 1;
        }
    };

    let report = TrialPool::with_workers(workers)
        .install(|| run_monte_carlo_parallel(&attackers, &defenders, battle_type, trials, seed))
        .without_outcomes();

    match serde_json::to_string_pretty(&report) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize report: {err}");
            1
        }
    }
}

fn handle_export(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: overlord export <out.csv> [battle] [trials] [seed]");
        return 2;
    };
    let battle_type = match parse_battle_arg(args.get(3)) {
        Ok(battle_type) => battle_type,
        Err(code) => return code,
    };
    let trials = parse_usize_arg(args.get(4), "trials", 1000);
    let seed = parse_u64_arg(args.get(5), "seed", 7);

    let catalog = Catalog::load_default();
    let (attacker_names, defender_names) = default_scenario(battle_type);
    let (attackers, defenders) = match (
        catalog.build_force(&attacker_names),
        catalog.build_force(&defender_names),
    ) {
        (Ok(attackers), Ok(defenders)) => (attackers, defenders),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("failed to build forces: {err}");
            return 1;
        }
    };

    let report = run_monte_carlo_parallel(&attackers, &defenders, battle_type, trials, seed);

    let rows = match write_trials_csv(path, &report) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("export failed: {err}");
            return 1;
        }
    };
    let summary_path = std::path::Path::new(path).with_extension("json");
    if let Err(err) = write_report_json(&summary_path, &report.clone().without_outcomes()) {
        eprintln!("export failed: {err}");
        return 1;
    }

    println!(
        "export complete: rows={rows}, csv='{path}', summary='{}'",
        summary_path.display()
    );
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_UNITS_PATH);

    match validate_unit_catalog(path) {
        Ok(report) if !report.has_errors() => {
            for diag in &report.diagnostics {
                println!("- [{}] {}: {}", diag.severity, diag.context, diag.message);
            }
            println!("validation passed: {path}");
            0
        }
        Ok(report) => {
            eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
            for diag in &report.diagnostics {
                eprintln!("- [{}] {}: {}", diag.severity, diag.context, diag.message);
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn parse_battle_arg(raw: Option<&String>) -> Result<BattleType, i32> {
    let raw = raw.map(String::as_str).unwrap_or("land");
    raw.parse::<BattleType>().map_err(|err| {
        eprintln!("{err}");
        2
    })
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
