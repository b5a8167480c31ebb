//! Heuristic decision policies for a CPU seat
//!
//! Every policy is a pure function of a `MatchView`: it reads the snapshot
//! and proposes the same choices a human seat would make. Nothing here can
//! mutate a match.

pub mod attack;
pub mod block;
pub mod init;
pub mod main_phase;
pub mod resource;

pub use attack::plan_attack;
pub use block::{min_covering_subset, plan_blocks};
pub use init::{choose_initial_resources, keep_preference};
pub use main_phase::plan_main_action;
pub use resource::{choose_resource_step, keep_score, swap_threshold};

use crate::core::{BattlefieldUnit, CardId, Spectrum};
use crate::game::Combatant;

/// What the policies need to know about a unit on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSnapshot {
    pub id: CardId,
    pub value: u8,
    pub is_ace: bool,
    pub spectrum: Spectrum,
    pub tapped: bool,
}

impl UnitSnapshot {
    /// True if `self` dies when it meets `other` one-on-one
    pub fn dies_to(&self, other: &UnitSnapshot) -> bool {
        other.is_ace || self.is_ace || other.value >= self.value
    }

    /// `self` kills `other` and lives
    pub fn beats(&self, other: &UnitSnapshot) -> bool {
        other.dies_to(self) && !self.dies_to(other)
    }

    /// Both die one-on-one
    pub fn trades_with(&self, other: &UnitSnapshot) -> bool {
        self.dies_to(other) && other.dies_to(self)
    }

    pub fn combatant(&self) -> Combatant {
        Combatant {
            id: self.id,
            value: self.value,
            is_ace: self.is_ace,
        }
    }
}

impl From<&BattlefieldUnit> for UnitSnapshot {
    fn from(unit: &BattlefieldUnit) -> Self {
        UnitSnapshot {
            id: unit.id(),
            value: unit.combat_value(),
            is_ace: unit.is_ace(),
            spectrum: unit.effective_spectrum(),
            tapped: unit.tapped,
        }
    }
}

/// Snapshot every unit in a row
pub(crate) fn snapshot_row<'a>(
    units: impl IntoIterator<Item = &'a BattlefieldUnit>,
) -> Vec<UnitSnapshot> {
    units.into_iter().map(UnitSnapshot::from).collect()
}

/// Damage that gets through when `defenders` block the biggest attackers of
/// their spectrum one-for-one
pub fn unblocked_damage(attackers: &[UnitSnapshot], defenders: &[UnitSnapshot]) -> u32 {
    Spectrum::ALL
        .iter()
        .map(|spectrum| {
            let mut values: Vec<u32> = attackers
                .iter()
                .filter(|a| a.spectrum == *spectrum)
                .map(|a| a.value as u32)
                .collect();
            values.sort_unstable_by(|a, b| b.cmp(a));
            let blockers = defenders.iter().filter(|d| d.spectrum == *spectrum).count();
            values.iter().skip(blockers).sum::<u32>()
        })
        .sum()
}


#[cfg(test)]
mod tests {
    use super::test_support::unit;
    use super::*;

    #[test]
    fn test_duel_outcomes() {
        let five = unit(1, 5, Spectrum::Physical);
        let seven = unit(2, 7, Spectrum::Physical);
        let other_five = unit(3, 5, Spectrum::Physical);
        let ace = unit(4, 1, Spectrum::Physical);

        assert!(seven.beats(&five));
        assert!(!five.beats(&seven));
        assert!(five.trades_with(&other_five));
        assert!(ace.trades_with(&seven));
        assert!(!seven.beats(&ace));
    }

    #[test]
    fn test_unblocked_damage_blocks_biggest_first() {
        let attackers = [
            unit(1, 9, Spectrum::Physical),
            unit(2, 4, Spectrum::Physical),
            unit(3, 6, Spectrum::Magical),
        ];
        let defenders = [unit(10, 2, Spectrum::Physical)];
        assert_eq!(unblocked_damage(&attackers, &defenders), 10);
        assert_eq!(unblocked_damage(&attackers, &[]), 19);
    }
}
