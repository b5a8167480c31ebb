//! Ordered unit rows for the resource and field zones
//!
//! Hand, deck and discard are plain card lists on `Player`.

use crate::core::{BattlefieldUnit, CardId, PlayerId};
use serde::{Deserialize, Serialize};

/// An ordered row of units (a resource row or a field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRow {
    /// Owner of this row
    pub owner: PlayerId,

    /// Units in play order
    pub units: Vec<BattlefieldUnit>,
}

impl UnitRow {
    pub fn new(owner: PlayerId) -> Self {
        UnitRow {
            owner,
            units: Vec::new(),
        }
    }

    pub fn add(&mut self, unit: BattlefieldUnit) {
        self.units.push(unit);
    }

    pub fn get(&self, id: CardId) -> Option<&BattlefieldUnit> {
        self.units.iter().find(|u| u.id() == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut BattlefieldUnit> {
        self.units.iter_mut().find(|u| u.id() == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: CardId) -> Option<BattlefieldUnit> {
        // Keep order: iteration order feeds deterministic AI choices
        let pos = self.units.iter().position(|u| u.id() == id)?;
        Some(self.units.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BattlefieldUnit> {
        self.units.iter()
    }

    pub fn untapped_count(&self) -> usize {
        self.units.iter().filter(|u| !u.tapped).count()
    }

    /// Tap the first `amount` untapped units. Returns the tapped ids.
    ///
    /// Callers must check `untapped_count() >= amount` first; a short row
    /// taps nothing.
    pub fn tap_first(&mut self, amount: usize) -> Vec<CardId> {
        if self.untapped_count() < amount {
            return Vec::new();
        }
        let mut tapped = Vec::with_capacity(amount);
        for unit in self.units.iter_mut().filter(|u| !u.tapped).take(amount) {
            unit.tap();
            tapped.push(unit.id());
        }
        tapped
    }

    /// Untap everything and clear summoning sickness
    pub fn refresh(&mut self) {
        for unit in &mut self.units {
            unit.untap();
            unit.summoning_sick = false;
        }
    }

    /// Sum of combat values (Ace counts as 1)
    pub fn total_value(&self) -> u32 {
        self.units.iter().map(|u| u.combat_value() as u32).sum()
    }
}
