//! Main-phase card plays: conscripting soldiers and resolving Tactics

use crate::core::{BattlefieldUnit, Card, CardId, CardKind, PlayerId};
use crate::game::economy::{can_afford, pay_cost};
use crate::game::{EffectKind, GameEvent, Match};
use crate::{DuelError, Result};

impl Match {
    /// Hand cards the player could legally play right now
    ///
    /// Tactics that need a target are only listed when one exists.
    pub fn playable_cards(&self, player: PlayerId) -> Vec<CardId> {
        let seat = self.player(player);
        seat.hand
            .iter()
            .filter(|card| can_afford(seat, card.cost()))
            .filter(|card| match card.kind() {
                CardKind::Soldier | CardKind::Jack => true,
                CardKind::Queen | CardKind::King => !self.legal_targets(card).is_empty(),
            })
            .map(|card| card.id)
            .collect()
    }

    /// Field units a Queen or King may target. Other cards take no target.
    pub fn legal_targets(&self, card: &Card) -> Vec<CardId> {
        let units = self.players.iter().flat_map(|p| p.field.iter());
        match card.kind() {
            CardKind::Queen => units.map(|u| u.id()).collect(),
            CardKind::King => units
                .filter(|u| u.effective_spectrum() == card.spectrum())
                .map(|u| u.id())
                .collect(),
            CardKind::Soldier | CardKind::Jack => Vec::new(),
        }
    }

    /// Resolve the target unit of a Queen or King, checking the owner hint
    fn resolve_target(
        &self,
        card: &Card,
        target: Option<CardId>,
        target_owner: Option<PlayerId>,
    ) -> Result<(CardId, PlayerId)> {
        let target = target.ok_or_else(|| {
            DuelError::InvalidTarget(format!("{} needs a target unit", card))
        })?;
        let owner = self
            .field_unit_owner(target)
            .ok_or_else(|| DuelError::InvalidTarget(format!("{} is not on a field", target)))?;
        if let Some(expected) = target_owner {
            if expected != owner {
                return Err(DuelError::InvalidTarget(format!(
                    "{} belongs to {}, not {}",
                    target, owner, expected
                )));
            }
        }
        Ok((target, owner))
    }

    fn pay_for(
        &mut self,
        player: PlayerId,
        card: &Card,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let amount = card.cost();
        let tapped = pay_cost(self.player_mut(player), amount)?;
        log_verbose!(self, "{} pays {} for {}", player, amount, card);
        events.push(GameEvent::ResourcesPaid {
            player,
            amount,
            tapped,
        });
        Ok(())
    }

    /// Play a hand card for the turn player
    ///
    /// Every check runs before the first resource is tapped.
    pub(crate) fn play_card(
        &mut self,
        card_id: CardId,
        target: Option<CardId>,
        target_owner: Option<PlayerId>,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let player = self.active_player();
        let card = *self
            .player(player)
            .hand_card(card_id)
            .ok_or(DuelError::CardNotInHand(card_id))?;
        let available = self.player(player).untapped_resources();
        if available < card.cost() {
            return Err(DuelError::InsufficientResources {
                required: card.cost(),
                available,
            });
        }

        match card.kind() {
            CardKind::Soldier => self.conscript(player, card, events),
            CardKind::Jack => self.resolve_jack(player, card, events),
            CardKind::Queen => {
                let (target, owner) = self.resolve_target(&card, target, target_owner)?;
                self.resolve_queen(player, card, target, owner, events)
            }
            CardKind::King => {
                let (target, _) = self.resolve_target(&card, target, target_owner)?;
                self.resolve_king(player, card, target, events)
            }
        }
    }

    fn conscript(
        &mut self,
        player: PlayerId,
        card: Card,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        self.pay_for(player, &card, events)?;
        let seat = self.player_mut(player);
        seat.take_from_hand(card.id);
        seat.field.add(BattlefieldUnit::conscripted(card, player));
        self.logger.normal(&format!("{} conscripts {}", player, card));
        events.push(GameEvent::CardConscripted { player, card });
        Ok(())
    }

    fn resolve_jack(
        &mut self,
        player: PlayerId,
        card: Card,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        self.pay_for(player, &card, events)?;
        let seat = self.player_mut(player);
        seat.take_from_hand(card.id);
        seat.discard.push(card);
        let drawn = self.draw_cards(player, 2, events);
        self.logger
            .normal(&format!("{} plays {} and draws {}", player, card, drawn));
        events.push(GameEvent::EffectResolved {
            player,
            card,
            effect: EffectKind::DrewCards { drawn },
        });
        Ok(())
    }

    fn resolve_queen(
        &mut self,
        player: PlayerId,
        card: Card,
        target: CardId,
        owner: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        self.pay_for(player, &card, events)?;
        self.player_mut(player).take_from_hand(card.id);

        let target_seat = self.player_mut(owner);
        let replaced = target_seat
            .field
            .get_mut(target)
            .ok_or(DuelError::UnitNotFound(target))?
            .attach_queen(card);
        if let Some(old) = replaced {
            target_seat.discard.push(old);
        }

        self.logger.normal(&format!(
            "{} attaches {} to {} ({}'s unit)",
            player, card, target, owner
        ));
        events.push(GameEvent::EffectResolved {
            player,
            card,
            effect: EffectKind::QueenAttached {
                target,
                replaced: replaced.map(|c| c.id),
            },
        });
        Ok(())
    }

    fn resolve_king(
        &mut self,
        player: PlayerId,
        card: Card,
        target: CardId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let target_spectrum = self
            .field_unit(target)
            .map(|u| u.effective_spectrum())
            .ok_or(DuelError::UnitNotFound(target))?;
        if target_spectrum != card.spectrum() {
            return Err(DuelError::SpectrumMismatch {
                source_spectrum: card.spectrum(),
                target_spectrum,
            });
        }

        self.pay_for(player, &card, events)?;
        let seat = self.player_mut(player);
        seat.take_from_hand(card.id);
        seat.discard.push(card);
        self.logger
            .normal(&format!("{} plays {} on {}", player, card, target));
        events.push(GameEvent::EffectResolved {
            player,
            card,
            effect: EffectKind::UnitDestroyed { target },
        });
        self.destroy_unit(target, events);
        Ok(())
    }
}
