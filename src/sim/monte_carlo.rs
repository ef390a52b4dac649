//! Monte Carlo driver: run many independent trials of one combat scenario
//! and aggregate the outcomes. Each trial gets its own cloned forces and
//! its own dice stream derived from the trial index, so the sequential and
//! parallel runners produce identical reports for the same seed.

use rayon::prelude::*;
use serde::Serialize;

use crate::combat::dice::Dice;
use crate::combat::engine::{run_combat, BattleType};
use crate::data::unit::Unit;
use crate::parallel::batch::trial_ranges;

/// Batches per worker thread when distributing trials over Rayon.
const BATCHES_PER_WORKER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialWinner {
    Attacker,
    Defender,
    /// Both forces emptied in the same round.
    Draw,
}

impl TrialWinner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attacker => "attacker",
            Self::Defender => "defender",
            Self::Draw => "draw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialOutcome {
    pub trial: usize,
    /// Completed combat rounds (the history length minus the initial snapshot).
    pub rounds: u32,
    pub winner: TrialWinner,
    pub attacker_units_remaining: usize,
    pub defender_units_remaining: usize,
    pub attacker_ipc_remaining: u32,
    pub defender_ipc_remaining: u32,
}

impl TrialOutcome {
    /// Remaining-IPC difference, attacker minus defender. The scoring axis
    /// used to compare scenarios.
    pub fn ipc_swing(&self) -> i64 {
        i64::from(self.attacker_ipc_remaining) - i64::from(self.defender_ipc_remaining)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloReport {
    pub battle_type: BattleType,
    pub trials: usize,
    pub seed: u64,
    pub attacker_start_ipc: u32,
    pub defender_start_ipc: u32,
    pub attacker_wins: usize,
    pub defender_wins: usize,
    pub draws: usize,
    pub attacker_win_rate: f64,
    pub mean_ipc_swing: f64,
    pub median_ipc_swing: i64,
    pub outcomes: Vec<TrialOutcome>,
}

impl MonteCarloReport {
    /// Drop the per-trial rows, keeping the aggregates. Used by the API so
    /// large trial counts do not balloon the payload.
    pub fn without_outcomes(mut self) -> Self {
        self.outcomes.clear();
        self
    }

    /// IPC swings sorted ascending — the empirical distribution the
    /// original tooling plotted as an ECDF.
    pub fn sorted_ipc_swings(&self) -> Vec<i64> {
        let mut swings: Vec<i64> = self.outcomes.iter().map(TrialOutcome::ipc_swing).collect();
        swings.sort_unstable();
        swings
    }
}

pub fn run_monte_carlo(
    attackers: &[Unit],
    defenders: &[Unit],
    battle_type: BattleType,
    trials: usize,
    seed: u64,
) -> MonteCarloReport {
    run_with_parallelism(attackers, defenders, battle_type, trials, seed, false)
}

/// Like [run_monte_carlo] but distributes trial batches across all CPU
/// cores via Rayon. Reports are identical to the sequential runner for the
/// same seed.
pub fn run_monte_carlo_parallel(
    attackers: &[Unit],
    defenders: &[Unit],
    battle_type: BattleType,
    trials: usize,
    seed: u64,
) -> MonteCarloReport {
    run_with_parallelism(attackers, defenders, battle_type, trials, seed, true)
}

fn run_with_parallelism(
    attackers: &[Unit],
    defenders: &[Unit],
    battle_type: BattleType,
    trials: usize,
    seed: u64,
    parallel: bool,
) -> MonteCarloReport {
    let outcomes: Vec<TrialOutcome> = if parallel {
        let batches = rayon::current_num_threads().max(1) * BATCHES_PER_WORKER;
        trial_ranges(trials, batches)
            .into_par_iter()
            .map(|(start, end)| {
                (start..end)
                    .map(|trial| run_one_trial(attackers, defenders, battle_type, trial, seed))
                    .collect::<Vec<_>>()
            })
            .flatten()
            .collect()
    } else {
        (0..trials)
            .map(|trial| run_one_trial(attackers, defenders, battle_type, trial, seed))
            .collect()
    };

    summarize(attackers, defenders, battle_type, trials, seed, outcomes)
}

fn run_one_trial(
    attackers: &[Unit],
    defenders: &[Unit],
    battle_type: BattleType,
    trial: usize,
    base_seed: u64,
) -> TrialOutcome {
    let mut dice = Dice::seeded(base_seed.wrapping_add(trial as u64));
    let history = run_combat(attackers, defenders, battle_type, &mut dice);
    let last = history.last().expect("combat history always holds the initial snapshot");

    let winner = if last.defenders.is_empty() && !last.attackers.is_empty() {
        TrialWinner::Attacker
    } else if last.attackers.is_empty() && !last.defenders.is_empty() {
        TrialWinner::Defender
    } else {
        TrialWinner::Draw
    };

    TrialOutcome {
        trial,
        rounds: last.round,
        winner,
        attacker_units_remaining: last.attackers.len(),
        defender_units_remaining: last.defenders.len(),
        attacker_ipc_remaining: last.attacker_ipc(),
        defender_ipc_remaining: last.defender_ipc(),
    }
}

fn summarize(
    attackers: &[Unit],
    defenders: &[Unit],
    battle_type: BattleType,
    trials: usize,
    seed: u64,
    outcomes: Vec<TrialOutcome>,
) -> MonteCarloReport {
    let attacker_wins = outcomes
        .iter()
        .filter(|outcome| outcome.winner == TrialWinner::Attacker)
        .count();
    let defender_wins = outcomes
        .iter()
        .filter(|outcome| outcome.winner == TrialWinner::Defender)
        .count();
    let draws = outcomes.len() - attacker_wins - defender_wins;

    let attacker_win_rate = if outcomes.is_empty() {
        0.0
    } else {
        attacker_wins as f64 / outcomes.len() as f64
    };

    let mut swings: Vec<i64> = outcomes.iter().map(TrialOutcome::ipc_swing).collect();
    swings.sort_unstable();
    let mean_ipc_swing = if swings.is_empty() {
        0.0
    } else {
        swings.iter().sum::<i64>() as f64 / swings.len() as f64
    };
    let median_ipc_swing = swings.get(swings.len() / 2).copied().unwrap_or(0);

    MonteCarloReport {
        battle_type,
        trials,
        seed,
        attacker_start_ipc: attackers.iter().map(|unit| unit.ipc).sum(),
        defender_start_ipc: defenders.iter().map(|unit| unit.ipc).sum(),
        attacker_wins,
        defender_wins,
        draws,
        attacker_win_rate,
        mean_ipc_swing,
        median_ipc_swing,
        outcomes,
    }
}
