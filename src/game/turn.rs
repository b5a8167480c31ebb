//! Turn controller: validates intents and drives the phase machine
//!
//! Automatic phases (upkeep, draw, a skipped resource step, damage) run to
//! completion inside the intent that reaches them, so the returned state is
//! always waiting on a seat or finished.

use crate::core::{BattlefieldUnit, CardId, PlayerId};
use crate::game::config::INITIAL_RESOURCE_PICKS;
use crate::game::economy::{add_resource, resource_step_skip_reason, swap_resource};
use crate::game::{GameEvent, Intent, Match, MatchOutcome, Phase, Transition, WinReason};
use crate::{DuelError, Result};
use rustc_hash::FxHashSet;

impl Match {
    /// Apply one intent, returning the new match and its events
    ///
    /// `self` is never modified; a rejected intent leaves nothing behind.
    pub fn apply(&self, actor: PlayerId, intent: Intent) -> Result<Transition> {
        let mut next = self.clone();
        let mut events = Vec::new();
        next.dispatch(actor, intent, &mut events)?;
        Ok(Transition {
            state: next,
            events,
        })
    }

    /// Apply an intent and replace `self` with the result when accepted
    pub fn apply_in_place(&mut self, actor: PlayerId, intent: Intent) -> Result<Vec<GameEvent>> {
        let Transition { state, events } = self.apply(actor, intent)?;
        *self = state;
        Ok(events)
    }

    fn expect_phase(&self, allowed: &[Phase], expected: &'static str) -> Result<()> {
        if allowed.contains(&self.phase()) {
            Ok(())
        } else {
            Err(DuelError::WrongPhase {
                expected,
                actual: self.phase(),
            })
        }
    }

    fn check_actor(&self, actor: PlayerId, intent: &Intent) -> Result<()> {
        if actor.index() > 1 {
            return Err(DuelError::PlayerNotFound(actor));
        }
        let expected = match (self.phase(), intent) {
            (_, Intent::Resign) => return Ok(()),
            (Phase::InitSelect, _) => return Ok(()),
            (Phase::BlockDeclare, _) => self.active_player().opponent(),
            _ => self.active_player(),
        };
        if actor == expected {
            Ok(())
        } else {
            Err(DuelError::WrongActor { actor, expected })
        }
    }

    fn dispatch(
        &mut self,
        actor: PlayerId,
        intent: Intent,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        if self.is_over() {
            return Err(DuelError::MatchOver);
        }
        self.check_actor(actor, &intent)?;

        match intent {
            Intent::SelectInitialResources(cards) => {
                self.expect_phase(&[Phase::InitSelect], "InitSelect")?;
                self.select_initial_resources(actor, &cards, events)
            }
            Intent::BeginResourceAdd => {
                self.expect_phase(&[Phase::ResourceStart], "ResourceStart")?;
                self.set_phase(Phase::ResourceAddSelect, None, events);
                Ok(())
            }
            Intent::BeginResourceSwap => {
                self.expect_phase(&[Phase::ResourceStart], "ResourceStart")?;
                self.set_phase(Phase::ResourceSwapSelectHand, None, events);
                Ok(())
            }
            Intent::AddResource(card) => {
                self.expect_phase(
                    &[Phase::ResourceStart, Phase::ResourceAddSelect],
                    "ResourceStart or ResourceAddSelect",
                )?;
                add_resource(self.player_mut(actor), card)?;
                self.logger.normal(&format!("{} adds {} to resources", actor, card));
                events.push(GameEvent::ResourceAdded {
                    player: actor,
                    card,
                });
                self.finish_resource_step(events);
                Ok(())
            }
            Intent::SelectSwapHandCard(card) => {
                self.expect_phase(&[Phase::ResourceSwapSelectHand], "ResourceSwapSelectHand")?;
                if self.player(actor).hand_card(card).is_none() {
                    return Err(DuelError::CardNotInHand(card));
                }
                self.pending_swap = Some(card);
                self.set_phase(Phase::ResourceSwapSelectPile, None, events);
                Ok(())
            }
            Intent::SwapResource {
                hand_card,
                resource_unit,
            } => {
                self.expect_phase(
                    &[
                        Phase::ResourceStart,
                        Phase::ResourceSwapSelectHand,
                        Phase::ResourceSwapSelectPile,
                    ],
                    "a resource swap step",
                )?;
                if let Some(pending) = self.pending_swap {
                    if pending != hand_card {
                        return Err(DuelError::InvalidSelection(format!(
                            "swap was started with {}, not {}",
                            pending, hand_card
                        )));
                    }
                }
                swap_resource(self.player_mut(actor), hand_card, resource_unit)?;
                self.logger.normal(&format!(
                    "{} swaps {} into resources for {}",
                    actor, hand_card, resource_unit
                ));
                events.push(GameEvent::ResourceSwapped {
                    player: actor,
                    into_resources: hand_card,
                    into_hand: resource_unit,
                });
                self.finish_resource_step(events);
                Ok(())
            }
            Intent::CancelResourceChoice => {
                self.expect_phase(
                    &[
                        Phase::ResourceAddSelect,
                        Phase::ResourceSwapSelectHand,
                        Phase::ResourceSwapSelectPile,
                    ],
                    "a resource selection step",
                )?;
                self.pending_swap = None;
                self.set_phase(Phase::ResourceStart, None, events);
                Ok(())
            }
            Intent::SkipResource => {
                if !self.phase().is_resource_step() {
                    return Err(DuelError::WrongPhase {
                        expected: "a resource step",
                        actual: self.phase(),
                    });
                }
                log_verbose!(self, "{} skips the resource step", actor);
                self.finish_resource_step(events);
                Ok(())
            }
            Intent::PlayCard {
                card,
                target,
                target_owner,
            } => {
                self.expect_phase(&[Phase::Main], "Main")?;
                self.play_card(card, target, target_owner, events)
            }
            Intent::DeclareAttackers(units) => {
                self.expect_phase(&[Phase::Main, Phase::AttackDeclare], "Main or AttackDeclare")?;
                self.declare_attackers(&units, events)
            }
            Intent::CancelAttack => {
                self.expect_phase(&[Phase::AttackDeclare], "AttackDeclare")?;
                self.combat.attackers.clear();
                self.set_phase(Phase::Main, None, events);
                Ok(())
            }
            Intent::ConfirmAttack => {
                self.expect_phase(&[Phase::AttackDeclare], "AttackDeclare")?;
                self.confirm_attack(events)
            }
            Intent::DeclareBlock { blocker, attacker } => {
                self.expect_phase(&[Phase::BlockDeclare], "BlockDeclare")?;
                self.declare_block(blocker, attacker, events)
            }
            Intent::ClearBlock(blocker) => {
                self.expect_phase(&[Phase::BlockDeclare], "BlockDeclare")?;
                self.clear_block(blocker)
            }
            Intent::ConfirmBlocks => {
                self.expect_phase(&[Phase::BlockDeclare], "BlockDeclare")?;
                self.confirm_blocks(events);
                Ok(())
            }
            Intent::EndTurn => {
                self.expect_phase(&[Phase::Main], "Main")?;
                self.logger.normal(&format!("{} ends the turn", actor));
                self.turn.next_turn();
                self.start_turn(events);
                Ok(())
            }
            Intent::Resign => {
                self.logger.minimal(&format!("{} resigns", actor));
                self.end_match(
                    MatchOutcome::Winner {
                        player: actor.opponent(),
                        reason: WinReason::Resignation,
                    },
                    events,
                );
                Ok(())
            }
        }
    }

    fn select_initial_resources(
        &mut self,
        actor: PlayerId,
        cards: &[CardId],
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        if self.init_selected[actor.index()] {
            return Err(DuelError::InvalidSelection(format!(
                "{} has already selected initial resources",
                actor
            )));
        }
        if cards.len() != INITIAL_RESOURCE_PICKS {
            return Err(DuelError::InvalidSelection(format!(
                "expected {} cards, got {}",
                INITIAL_RESOURCE_PICKS,
                cards.len()
            )));
        }
        let mut seen = FxHashSet::default();
        for card in cards {
            if !seen.insert(*card) {
                return Err(DuelError::InvalidSelection(format!("{} selected twice", card)));
            }
            if self.player(actor).hand_card(*card).is_none() {
                return Err(DuelError::CardNotInHand(*card));
            }
        }

        let seat = self.player_mut(actor);
        for card in cards {
            if let Some(card) = seat.take_from_hand(*card) {
                seat.resources.add(BattlefieldUnit::resource(card, actor));
            }
        }
        self.init_selected[actor.index()] = true;
        self.logger
            .normal(&format!("{} seeds resources with {} cards", actor, cards.len()));
        events.push(GameEvent::InitialResourcesSelected {
            player: actor,
            cards: cards.iter().copied().collect(),
        });

        if self.init_selected.iter().all(|done| *done) {
            self.start_turn(events);
        }
        Ok(())
    }

    fn finish_resource_step(&mut self, events: &mut Vec<GameEvent>) {
        self.pending_swap = None;
        self.set_phase(Phase::Main, None, events);
    }

    /// Run upkeep and draw for the turn player, then stop at the resource
    /// step or at `Main` when the step is skipped
    pub(crate) fn start_turn(&mut self, events: &mut Vec<GameEvent>) {
        let player = self.active_player();
        let turn_number = self.turn.turn_number;
        let banner = format!("Turn {}: {}", turn_number, self.player(player).name);
        self.logger.normal(&banner);
        events.push(GameEvent::TurnStarted {
            player,
            turn_number,
        });

        self.set_phase(Phase::Upkeep, None, events);
        self.player_mut(player).begin_turn();
        self.combat.clear();
        self.pending_swap = None;

        self.set_phase(Phase::Draw, None, events);
        self.draw_cards(player, 1, events);
        if self.is_over() {
            return;
        }

        self.set_phase(Phase::ResourceStart, None, events);
        if let Some(reason) = resource_step_skip_reason(&self.turn, self.player(player)) {
            self.set_phase(Phase::Main, Some(reason), events);
        }
    }
}
