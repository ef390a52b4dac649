//! Special-rule phases: anti-aircraft fire, naval shore bombardment, and
//! submarine surprise attack. Each resolver is a pure function of the
//! current forces and the dice capability; the scheduler applies the
//! resulting casualties.

use crate::combat::dice::DiceRoller;
use crate::data::unit::{Unit, DESTROYER};

/// Shots per AAA gun, before capping at the number of attacking air units.
pub const AAA_SHOTS_PER_GUN: usize = 3;

/// Anti-aircraft fire, once before round 0 in every battle category.
/// Fires only if the defender has an AAA gun and the attacker has air
/// units; each gun takes min(3, #air) shots at its own defense value, and
/// total hits cap at the number of air units. Returns the capped hit count.
pub fn anti_aircraft_hits(
    attackers: &[Unit],
    defenders: &[Unit],
    dice: &mut dyn DiceRoller,
) -> usize {
    let aaa_guns: Vec<&Unit> = defenders
        .iter()
        .filter(|unit| unit.is_anti_aircraft())
        .collect();
    let num_air = attackers.iter().filter(|unit| unit.is_air()).count();
    if aaa_guns.is_empty() || num_air == 0 {
        return 0;
    }

    let shots_per_gun = num_air.min(AAA_SHOTS_PER_GUN);
    let mut thresholds = Vec::with_capacity(aaa_guns.len() * shots_per_gun);
    for gun in &aaa_guns {
        thresholds.extend(std::iter::repeat(gun.defense).take(shots_per_gun));
    }

    dice.roll(&thresholds).hit_count().min(num_air)
}

/// Shore bombardment, amphibious battles only. Bombard-capable attackers
/// roll their base attack; the hit count joins the general attacker tally
/// for round 0. No defender unit is picked directly.
pub fn bombardment_hits(attackers: &[Unit], dice: &mut dyn DiceRoller) -> usize {
    let thresholds: Vec<u32> = attackers
        .iter()
        .filter(|unit| unit.can_bombard())
        .map(|unit| unit.attack)
        .collect();
    if thresholds.is_empty() {
        return 0;
    }
    dice.roll(&thresholds).hit_count()
}

/// Submarine surprise attack, naval battles only, re-evaluated every round.
/// Fires iff the attacker has a submarine and the defender has no
/// destroyer. Returns `Some(hits)` when the attack fired (possibly with
/// zero hits) and `None` when the condition did not hold. `effective` is
/// the attacker's effective-attack array for this round, parallel to
/// `attackers`.
pub fn submarine_surprise(
    attackers: &[Unit],
    defenders: &[Unit],
    effective: &[u32],
    dice: &mut dyn DiceRoller,
) -> Option<usize> {
    let sub_thresholds: Vec<u32> = attackers
        .iter()
        .zip(effective)
        .filter(|(unit, _)| unit.is_submarine())
        .map(|(_, value)| *value)
        .collect();
    let has_destroyer = defenders.iter().any(|unit| unit.name == DESTROYER);

    if sub_thresholds.is_empty() || has_destroyer {
        return None;
    }
    Some(dice.roll(&sub_thresholds).hit_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::data::unit::{UnitType, ANTI_AIRCRAFT_ARTILLERY, CRUISER, SUBMARINE};
    use uuid::Uuid;

    fn unit(name: &str, unit_type: UnitType, attack: u32, defense: u32) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ipc: 5,
            attack,
            defense,
            unit_type,
            movement: 1,
            max_hit_points: 1,
            cur_hit_points: 1,
        }
    }

    #[test]
    fn aaa_hits_cap_at_air_unit_count() {
        let attackers = vec![
            unit("fighter", UnitType::Air, 3, 4),
            unit("fighter", UnitType::Air, 3, 4),
        ];
        let defenders = vec![
            unit(ANTI_AIRCRAFT_ARTILLERY, UnitType::Land, 0, 1),
            unit(ANTI_AIRCRAFT_ARTILLERY, UnitType::Land, 0, 1),
        ];
        // Two guns, two shots each: four hits rolled, capped at two air units.
        let mut dice = ScriptedDice::always_hit();
        assert_eq!(anti_aircraft_hits(&attackers, &defenders, &mut dice), 2);
    }

    #[test]
    fn aaa_shots_cap_at_three_per_gun() {
        let attackers: Vec<Unit> = (0..5)
            .map(|_| unit("fighter", UnitType::Air, 3, 4))
            .collect();
        let defenders = vec![unit(ANTI_AIRCRAFT_ARTILLERY, UnitType::Land, 0, 1)];
        let mut dice = ScriptedDice::always_hit();
        assert_eq!(anti_aircraft_hits(&attackers, &defenders, &mut dice), 3);
    }

    #[test]
    fn aaa_needs_both_guns_and_air() {
        let air = vec![unit("fighter", UnitType::Air, 3, 4)];
        let ground = vec![unit("infantry", UnitType::Land, 1, 2)];
        let guns = vec![unit(ANTI_AIRCRAFT_ARTILLERY, UnitType::Land, 0, 1)];
        let mut dice = ScriptedDice::always_hit();
        assert_eq!(anti_aircraft_hits(&ground, &guns, &mut dice), 0);
        assert_eq!(anti_aircraft_hits(&air, &ground, &mut dice), 0);
    }

    #[test]
    fn bombardment_counts_only_capable_units() {
        let attackers = vec![
            unit(CRUISER, UnitType::Naval, 3, 3),
            unit("destroyer", UnitType::Naval, 2, 2),
            unit("infantry", UnitType::Land, 1, 2),
        ];
        let mut dice = ScriptedDice::always_hit();
        assert_eq!(bombardment_hits(&attackers, &mut dice), 1);
    }

    #[test]
    fn surprise_blocked_by_destroyer() {
        let attackers = vec![unit(SUBMARINE, UnitType::Naval, 2, 1)];
        let effective = vec![2];
        let clear = vec![unit(CRUISER, UnitType::Naval, 3, 3)];
        let screened = vec![unit(DESTROYER, UnitType::Naval, 2, 2)];
        let mut dice = ScriptedDice::always_hit();
        assert_eq!(
            submarine_surprise(&attackers, &clear, &effective, &mut dice),
            Some(1)
        );
        assert_eq!(
            submarine_surprise(&attackers, &screened, &effective, &mut dice),
            None
        );
    }

    #[test]
    fn surprise_with_zero_hits_still_fires() {
        let attackers = vec![unit(SUBMARINE, UnitType::Naval, 2, 1)];
        let defenders = vec![unit(CRUISER, UnitType::Naval, 3, 3)];
        let mut dice = ScriptedDice::always_miss();
        assert_eq!(
            submarine_surprise(&attackers, &defenders, &[2], &mut dice),
            Some(0)
        );
    }
}
