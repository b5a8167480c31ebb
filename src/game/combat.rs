//! Combat: attack declaration, block assignment and damage resolution
//!
//! Death is decided from pre-combat values only. All pairings are evaluated
//! first, then casualties are removed, then unblocked damage lands. Output is
//! ordered blocked-first, each group in attacker declaration order.

use crate::core::{BattlefieldUnit, CardId, PlayerId};
use crate::game::{GameEvent, Match, Phase};
use crate::{DuelError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Combat state for the current turn
///
/// Reset at the turn player's upkeep. Uses BTreeMap for deterministic
/// iteration order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CombatState {
    /// Attackers in declaration order
    pub attackers: Vec<CardId>,

    /// Blocker -> attacker (many-to-one when multi-blocking)
    pub blockers: BTreeMap<CardId, CardId>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attacking(&self, unit: CardId) -> bool {
        self.attackers.contains(&unit)
    }

    pub fn is_blocking(&self, unit: CardId) -> bool {
        self.blockers.contains_key(&unit)
    }

    /// Blockers assigned to an attacker, in id order
    pub fn blockers_of(&self, attacker: CardId) -> Vec<CardId> {
        self.blockers
            .iter()
            .filter(|(_, a)| **a == attacker)
            .map(|(b, _)| *b)
            .collect()
    }

    /// Assign a blocker. Returns the blocker evicted in single-block mode.
    pub fn assign_block(
        &mut self,
        blocker: CardId,
        attacker: CardId,
        multi_blocking: bool,
    ) -> Option<CardId> {
        self.blockers.remove(&blocker);
        let evicted = if multi_blocking {
            None
        } else {
            let previous = self.blockers_of(attacker).into_iter().next();
            if let Some(previous) = previous {
                self.blockers.remove(&previous);
            }
            previous
        };
        self.blockers.insert(blocker, attacker);
        evicted
    }

    pub fn clear(&mut self) {
        self.attackers.clear();
        self.blockers.clear();
    }
}

/// The numbers a unit brings to a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant {
    pub id: CardId,
    pub value: u8,
    pub is_ace: bool,
}

impl From<&BattlefieldUnit> for Combatant {
    fn from(unit: &BattlefieldUnit) -> Self {
        Combatant {
            id: unit.id(),
            value: unit.combat_value(),
            is_ace: unit.is_ace(),
        }
    }
}

/// Same-spectrum units may fight; nothing else matters for legality
pub fn can_block(attacker: &BattlefieldUnit, blocker: &BattlefieldUnit) -> bool {
    attacker.effective_spectrum() == blocker.effective_spectrum()
}

/// Outcome of one attacker meeting its blockers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashResult {
    pub attacker_dies: bool,
    /// Parallel to the blockers passed in
    pub blocker_dies: Vec<bool>,
}

/// Resolve one blocked attacker against all of its blockers
///
/// The attacker dies if any blocker is an Ace or the blockers' summed value
/// reaches its value. Each blocker dies if the attacker is an Ace or the
/// attacker's value reaches that blocker's value.
pub fn clash(attacker: Combatant, blockers: &[Combatant]) -> ClashResult {
    let total: u32 = blockers.iter().map(|b| b.value as u32).sum();
    let attacker_dies = blockers.iter().any(|b| b.is_ace) || total >= attacker.value as u32;
    let blocker_dies = blockers
        .iter()
        .map(|b| attacker.is_ace || attacker.value >= b.value)
        .collect();
    ClashResult {
        attacker_dies,
        blocker_dies,
    }
}

/// A blocked attacker and its blockers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub attacker: CardId,
    pub blockers: Vec<CardId>,
    pub result: ClashResult,
}

/// Everything a damage step will do, computed before anything changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Blocked attackers, declaration order
    pub blocked: Vec<Pairing>,
    /// Unblocked attackers and their damage, declaration order
    pub unblocked: Vec<(CardId, u8)>,
}

impl CombatReport {
    /// Every unit that dies, attackers before their blockers
    pub fn casualties(&self) -> Vec<CardId> {
        let mut dead = Vec::new();
        for pairing in &self.blocked {
            if pairing.result.attacker_dies {
                dead.push(pairing.attacker);
            }
            for (blocker, dies) in pairing.blockers.iter().zip(&pairing.result.blocker_dies) {
                if *dies {
                    dead.push(*blocker);
                }
            }
        }
        dead
    }

    pub fn unblocked_damage(&self) -> u32 {
        self.unblocked.iter().map(|(_, d)| *d as u32).sum()
    }
}

/// Compute a full damage step from declared attackers and blocks
pub fn resolve_combat(
    attackers: &[Combatant],
    blocks: &BTreeMap<CardId, CardId>,
    blockers: &[Combatant],
) -> CombatReport {
    let mut report = CombatReport::default();
    for attacker in attackers {
        let assigned: Vec<Combatant> = blockers
            .iter()
            .filter(|b| blocks.get(&b.id) == Some(&attacker.id))
            .copied()
            .collect();
        if assigned.is_empty() {
            report.unblocked.push((attacker.id, attacker.value));
        } else {
            let result = clash(*attacker, &assigned);
            report.blocked.push(Pairing {
                attacker: attacker.id,
                blockers: assigned.iter().map(|b| b.id).collect(),
                result,
            });
        }
    }
    report
}

impl Match {
    /// Field units that may attack this turn
    pub fn legal_attackers(&self, player: PlayerId) -> Vec<CardId> {
        let seat = self.player(player);
        if seat.has_attacked_this_turn {
            return Vec::new();
        }
        seat.field.iter().filter(|u| u.is_ready()).map(|u| u.id()).collect()
    }

    /// Defending units that may legally block a declared attacker
    pub fn legal_blockers(&self, defender: PlayerId, attacker: CardId) -> Vec<CardId> {
        let Some(attacking_unit) = self.field_unit(attacker) else {
            return Vec::new();
        };
        self.player(defender)
            .field
            .iter()
            .filter(|b| !b.tapped && can_block(attacking_unit, b))
            .map(|b| b.id())
            .collect()
    }

    fn check_attacker(&self, player: PlayerId, unit: CardId) -> Result<()> {
        let seat = self.player(player);
        let reject = |reason: &str| DuelError::IllegalAttacker {
            unit,
            reason: reason.to_string(),
        };
        if seat.has_attacked_this_turn {
            return Err(reject("already attacked this turn"));
        }
        let attacker = seat.field.get(unit).ok_or_else(|| reject("not on your field"))?;
        if attacker.tapped {
            return Err(reject("tapped"));
        }
        if attacker.summoning_sick {
            return Err(reject("summoning sick"));
        }
        Ok(())
    }

    /// Record a proposed attacker set and enter `AttackDeclare`
    pub(crate) fn declare_attackers(
        &mut self,
        units: &[CardId],
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let player = self.active_player();
        if units.is_empty() {
            return Err(DuelError::InvalidSelection("no attackers declared".to_string()));
        }
        let mut seen = FxHashSet::default();
        for unit in units {
            if !seen.insert(*unit) {
                return Err(DuelError::IllegalAttacker {
                    unit: *unit,
                    reason: "declared twice".to_string(),
                });
            }
            self.check_attacker(player, *unit)?;
        }
        self.combat.attackers = units.to_vec();
        if self.phase() != Phase::AttackDeclare {
            self.set_phase(Phase::AttackDeclare, None, events);
        }
        Ok(())
    }

    /// Tap the attackers, then go to blocks or straight to damage
    pub(crate) fn confirm_attack(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        let player = self.active_player();
        let attackers = self.combat.attackers.clone();
        if attackers.is_empty() {
            return Err(DuelError::InvalidSelection("no attackers declared".to_string()));
        }
        for unit in &attackers {
            self.check_attacker(player, *unit)?;
        }

        let seat = self.player_mut(player);
        for unit in &attackers {
            if let Some(attacker) = seat.field.get_mut(*unit) {
                attacker.tap();
            }
        }
        seat.has_attacked_this_turn = true;
        self.logger
            .normal(&format!("{} attacks with {} unit(s)", player, attackers.len()));
        events.push(GameEvent::AttackDeclared {
            player,
            attackers: attackers.clone(),
        });

        let defender = player.opponent();
        let any_blocker = attackers
            .iter()
            .any(|a| !self.legal_blockers(defender, *a).is_empty());
        if any_blocker {
            self.set_phase(Phase::BlockDeclare, None, events);
        } else {
            self.set_phase(
                Phase::Damage,
                Some("no defending unit can block".to_string()),
                events,
            );
            self.resolve_damage(events);
        }
        Ok(())
    }

    pub(crate) fn declare_block(
        &mut self,
        blocker: CardId,
        attacker: CardId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let defender = self.active_player().opponent();
        let reject = |reason: &str| DuelError::IllegalBlock {
            blocker,
            attacker,
            reason: reason.to_string(),
        };
        if !self.combat.is_attacking(attacker) {
            return Err(reject("not a declared attacker"));
        }
        let blocking_unit = self
            .player(defender)
            .field
            .get(blocker)
            .ok_or_else(|| reject("blocker is not on the defending field"))?;
        if blocking_unit.tapped {
            return Err(reject("blocker is tapped"));
        }
        let attacking_unit = self
            .field_unit(attacker)
            .ok_or(DuelError::UnitNotFound(attacker))?;
        if !can_block(attacking_unit, blocking_unit) {
            return Err(DuelError::SpectrumMismatch {
                source_spectrum: blocking_unit.effective_spectrum(),
                target_spectrum: attacking_unit.effective_spectrum(),
            });
        }

        let evicted = self
            .combat
            .assign_block(blocker, attacker, self.config.multi_blocking);
        log_verbose!(self, "{} blocks {}", blocker, attacker);
        events.push(GameEvent::BlockDeclared {
            blocker,
            attacker,
            evicted,
        });
        Ok(())
    }

    pub(crate) fn clear_block(&mut self, blocker: CardId) -> Result<()> {
        self.combat
            .blockers
            .remove(&blocker)
            .map(|_| ())
            .ok_or(DuelError::UnitNotFound(blocker))
    }

    pub(crate) fn confirm_blocks(&mut self, events: &mut Vec<GameEvent>) {
        self.set_phase(Phase::Damage, None, events);
        self.resolve_damage(events);
    }

    /// Run the damage step and return to `Main` unless the match ended
    pub(crate) fn resolve_damage(&mut self, events: &mut Vec<GameEvent>) {
        let attacker_seat = self.active_player();
        let defender_seat = attacker_seat.opponent();

        let attackers: Vec<Combatant> = self
            .combat
            .attackers
            .iter()
            .filter_map(|id| self.player(attacker_seat).field.get(*id))
            .map(Combatant::from)
            .collect();
        let blockers: Vec<Combatant> = self
            .player(defender_seat)
            .field
            .iter()
            .filter(|u| self.combat.is_blocking(u.id()))
            .map(Combatant::from)
            .collect();
        let report = resolve_combat(&attackers, &self.combat.blockers, &blockers);

        for pairing in &report.blocked {
            events.push(GameEvent::Clash {
                attacker: pairing.attacker,
                blockers: pairing.blockers.clone(),
            });
        }
        for unit in report.casualties() {
            self.destroy_unit(unit, events);
        }
        for (source, amount) in &report.unblocked {
            let defender = self.player_mut(defender_seat);
            defender.lose_life(*amount as i32);
            let life_after = defender.life;
            self.logger.normal(&format!(
                "{} hits {} for {} (life {})",
                source, defender_seat, amount, life_after
            ));
            events.push(GameEvent::DamageDealt {
                source: *source,
                target: defender_seat,
                amount: *amount,
                life_after,
            });
            if self.check_life(events) {
                return;
            }
        }

        self.set_phase(Phase::Main, None, events);
    }
}
