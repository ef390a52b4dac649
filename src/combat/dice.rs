//! Dice engine for combat resolution. A batch of per-unit hit thresholds
//! goes in; per-roll hit flags plus the raw d6 values come out. The roller
//! is a trait so the scheduler and the special-rule phases take it as a
//! capability, and deterministic stand-ins can replace true randomness.
//!
//! The production generator is SplitMix64: fast, deterministic for a given
//! seed, not cryptographically secure.

use std::collections::VecDeque;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

pub const DIE_SIDES: u32 = 6;

#[derive(Debug, Clone, Copy)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

/// One batch of rolls: `hits[i]` is true iff `rolls[i] <= thresholds[i]`.
/// The raw values are kept for diagnostics and damage rolls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollBatch {
    pub hits: Vec<bool>,
    pub rolls: Vec<u32>,
}

impl RollBatch {
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|hit| **hit).count()
    }
}

pub trait DiceRoller {
    /// Roll one die per threshold, independently. Empty input yields an
    /// empty batch, never an error.
    fn roll(&mut self, thresholds: &[u32]) -> RollBatch;
}

/// Production roller backed by SplitMix64.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: SplitMix64,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
        }
    }

    /// OS-entropy seed. Falls back to a fixed odd constant if the entropy
    /// source is unavailable (e.g. stripped-down containers).
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_err() {
            return Self::seeded(0x4d59_5df4_d0f3_3173);
        }
        Self::seeded(u64::from_le_bytes(buf))
    }

    #[inline]
    fn roll_die(&mut self) -> u32 {
        1 + (self.rng.next_u64() % u64::from(DIE_SIDES)) as u32
    }
}

impl DiceRoller for Dice {
    fn roll(&mut self, thresholds: &[u32]) -> RollBatch {
        let mut hits = Vec::with_capacity(thresholds.len());
        let mut rolls = Vec::with_capacity(thresholds.len());
        for threshold in thresholds {
            let die = self.roll_die();
            hits.push(die <= *threshold);
            rolls.push(die);
        }
        RollBatch { hits, rolls }
    }
}

/// One scripted response: what the next `roll` call should report.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    AllHit,
    AllMiss,
    /// Explicit per-roll flags; short patterns pad with misses.
    Pattern(Vec<bool>),
}

impl ScriptStep {
    fn hit_at(&self, index: usize) -> bool {
        match self {
            Self::AllHit => true,
            Self::AllMiss => false,
            Self::Pattern(flags) => flags.get(index).copied().unwrap_or(false),
        }
    }
}

/// Deterministic roller: consumes one scripted step per `roll` call, then
/// repeats the fallback. Raw die values are synthesized (1 for a hit,
/// `DIE_SIDES` for a miss) and carry no statistical meaning.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    steps: VecDeque<ScriptStep>,
    fallback: ScriptStep,
}

impl ScriptedDice {
    pub fn always_hit() -> Self {
        Self::with_steps(Vec::new(), ScriptStep::AllHit)
    }

    pub fn always_miss() -> Self {
        Self::with_steps(Vec::new(), ScriptStep::AllMiss)
    }

    pub fn with_steps(steps: Vec<ScriptStep>, fallback: ScriptStep) -> Self {
        Self {
            steps: steps.into(),
            fallback,
        }
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self, thresholds: &[u32]) -> RollBatch {
        let step = self.steps.pop_front().unwrap_or_else(|| self.fallback.clone());
        let hits: Vec<bool> = (0..thresholds.len()).map(|i| step.hit_at(i)).collect();
        let rolls = hits
            .iter()
            .map(|hit| if *hit { 1 } else { DIE_SIDES })
            .collect();
        RollBatch { hits, rolls }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_deterministic() {
        let mut a = SplitMix64::new(7);
        let mut b = SplitMix64::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn splitmix64_different_seeds_differ() {
        let mut a = SplitMix64::new(1);
        let mut b = SplitMix64::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn rolls_stay_in_die_range() {
        let mut dice = Dice::seeded(42);
        let batch = dice.roll(&[3; 500]);
        assert!(batch.rolls.iter().all(|die| (1..=DIE_SIDES).contains(die)));
    }

    #[test]
    fn hits_match_threshold_compare() {
        let mut dice = Dice::seeded(99);
        let thresholds = [0, 1, 2, 3, 4, 5, 6, 7];
        for _ in 0..100 {
            let batch = dice.roll(&thresholds);
            for (i, threshold) in thresholds.iter().enumerate() {
                assert_eq!(batch.hits[i], batch.rolls[i] <= *threshold);
            }
        }
    }

    #[test]
    fn threshold_extremes_are_certain() {
        let mut dice = Dice::seeded(7);
        let batch = dice.roll(&[0; 200]);
        assert_eq!(batch.hit_count(), 0);
        let batch = dice.roll(&[DIE_SIDES + 1; 200]);
        assert_eq!(batch.hit_count(), 200);
    }

    #[test]
    fn empty_input_yields_empty_batch() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.roll(&[]), RollBatch::default());
        let mut scripted = ScriptedDice::always_hit();
        assert_eq!(scripted.roll(&[]), RollBatch::default());
    }

    #[test]
    fn scripted_steps_run_in_order_then_fallback() {
        let mut dice = ScriptedDice::with_steps(
            vec![ScriptStep::AllMiss, ScriptStep::Pattern(vec![true])],
            ScriptStep::AllHit,
        );
        assert_eq!(dice.roll(&[3, 3]).hit_count(), 0);
        assert_eq!(dice.roll(&[3, 3]).hits, vec![true, false]);
        assert_eq!(dice.roll(&[3, 3]).hit_count(), 2);
        assert_eq!(dice.roll(&[3]).hit_count(), 1);
    }
}
