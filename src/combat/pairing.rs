//! Round-scoped effective attack values for the attacking force.
//!
//! Infantry paired with artillery attack at 2 instead of their base value;
//! one infantry is boosted per artillery piece, scanning the force in
//! order. The result is a parallel array (`values[i]` belongs to
//! `attackers[i]`) recomputed every round, so unit records shared with
//! snapshots are never written to.

use crate::data::unit::{Unit, ARTILLERY, INFANTRY};

/// Attack value of an infantry unit paired with artillery.
pub const PAIRED_INFANTRY_ATTACK: u32 = 2;

pub fn effective_attacks(attackers: &[Unit]) -> Vec<u32> {
    let num_artillery = attackers
        .iter()
        .filter(|unit| unit.name == ARTILLERY)
        .count();

    let mut num_paired = 0;
    attackers
        .iter()
        .map(|unit| {
            if unit.name == INFANTRY && num_paired < num_artillery {
                num_paired += 1;
                PAIRED_INFANTRY_ATTACK
            } else {
                unit.attack
            }
        })
        .collect()
}
