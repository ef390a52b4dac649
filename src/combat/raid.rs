//! Strategic bombing raids. A bomber wing runs the target's built-in air
//! defense — one flak die per bomber at a fixed hit threshold, casualties
//! taken from the front of the cost-sorted wing — then each survivor rolls
//! one die of facility damage.

use crate::combat::dice::{DiceRoller, DIE_SIDES};
use crate::combat::engine::sort_by_cost;
use crate::data::unit::Unit;

/// Hit threshold of the target's built-in flak.
pub const RAID_FLAK_THRESHOLD: u32 = 1;

#[derive(Debug, Clone)]
pub struct RaidOutcome {
    pub survivors: Vec<Unit>,
    /// One raw die per surviving bomber.
    pub damage_rolls: Vec<u32>,
}

impl RaidOutcome {
    /// Facility damage dealt, in IPC.
    pub fn total_damage(&self) -> u32 {
        self.damage_rolls.iter().sum()
    }
}

pub fn run_bombing_raid(bombers: &[Unit], dice: &mut dyn DiceRoller) -> RaidOutcome {
    let mut wing = bombers.to_vec();
    sort_by_cost(&mut wing);

    let flak_hits = if wing.is_empty() {
        0
    } else {
        dice.roll(&vec![RAID_FLAK_THRESHOLD; wing.len()]).hit_count()
    };
    let survivors = wing.split_off(flak_hits.min(wing.len()));

    let damage_rolls = if survivors.is_empty() {
        Vec::new()
    } else {
        dice.roll(&vec![DIE_SIDES; survivors.len()]).rolls
    };

    RaidOutcome {
        survivors,
        damage_rolls,
    }
}
