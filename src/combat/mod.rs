pub mod dice;
pub mod engine;
pub mod pairing;
pub mod phases;
pub mod raid;

pub use dice::{Dice, DiceRoller, RollBatch, ScriptStep, ScriptedDice, SplitMix64, DIE_SIDES};
pub use engine::{
    run_combat, sort_by_cost, BattleType, RoundSnapshot, UnknownBattleType,
};
pub use pairing::{effective_attacks, PAIRED_INFANTRY_ATTACK};
pub use phases::{
    anti_aircraft_hits, bombardment_hits, submarine_surprise, AAA_SHOTS_PER_GUN,
};
pub use raid::{run_bombing_raid, RaidOutcome, RAID_FLAK_THRESHOLD};
