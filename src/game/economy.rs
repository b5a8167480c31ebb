//! Resource economy: paying costs and the add/swap/skip resource step

use crate::core::{BattlefieldUnit, CardId, Player, RESOURCE_CAP};
use crate::game::{Intent, TurnStructure};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// True if the player has at least `cost` untapped resources
pub fn can_afford(player: &Player, cost: u8) -> bool {
    player.untapped_resources() >= cost
}

/// Tap exactly `amount` untapped resources, first ones first
///
/// Affordability is the caller's precondition. A short row is reported as an
/// error and nothing is tapped.
pub fn pay_cost(player: &mut Player, amount: u8) -> Result<Vec<CardId>> {
    let available = player.untapped_resources();
    if available < amount {
        return Err(DuelError::InsufficientResources {
            required: amount,
            available,
        });
    }
    let tapped = player.resources.tap_first(amount as usize);
    debug_assert_eq!(tapped.len(), amount as usize);
    Ok(tapped)
}

/// Move a hand card into the resource row
pub fn add_resource(player: &mut Player, card: CardId) -> Result<()> {
    if player.resources_full() {
        return Err(DuelError::ResourceRowFull(player.resources.len()));
    }
    let card = player
        .take_from_hand(card)
        .ok_or(DuelError::CardNotInHand(card))?;
    player.resources.add(BattlefieldUnit::resource(card, player.id));
    Ok(())
}

/// Exchange a hand card with a resource card; row length is unchanged
pub fn swap_resource(player: &mut Player, hand_card: CardId, resource_unit: CardId) -> Result<()> {
    if player.hand_card(hand_card).is_none() {
        return Err(DuelError::CardNotInHand(hand_card));
    }
    let pos = player
        .resources
        .units
        .iter()
        .position(|u| u.id() == resource_unit)
        .ok_or(DuelError::UnitNotFound(resource_unit))?;

    let incoming = player
        .take_from_hand(hand_card)
        .ok_or(DuelError::CardNotInHand(hand_card))?;
    let outgoing = std::mem::replace(
        &mut player.resources.units[pos],
        BattlefieldUnit::resource(incoming, player.id),
    );
    player.add_to_hand(outgoing.card);
    Ok(())
}

/// Why the resource step is skipped this turn, if it is
pub fn resource_step_skip_reason(turn: &TurnStructure, player: &Player) -> Option<String> {
    if turn.is_opening_turn() {
        Some("first turn of the match for the starting player".to_string())
    } else if player.resources_full() {
        Some(format!("resource row already at cap ({})", RESOURCE_CAP))
    } else {
        None
    }
}

/// The decision surface of the resource step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceDecision {
    Add(CardId),
    Swap { hand_card: CardId, resource_unit: CardId },
    Skip,
}

impl ResourceDecision {
    pub fn into_intent(self) -> Intent {
        match self {
            ResourceDecision::Add(card) => Intent::AddResource(card),
            ResourceDecision::Swap {
                hand_card,
                resource_unit,
            } => Intent::SwapResource {
                hand_card,
                resource_unit,
            },
            ResourceDecision::Skip => Intent::SkipResource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, PlayerId, Rank, Suit};
    use crate::game::Phase;

    fn player_with(resources: u32, hand: u32) -> Player {
        let mut player = Player::new(PlayerId::ONE, "Alice", 20);
        for i in 0..resources {
            let card = Card::new(CardId::new(i), Suit::Spades, Rank::Two);
            player.resources.add(BattlefieldUnit::resource(card, PlayerId::ONE));
        }
        for i in 0..hand {
            player.add_to_hand(Card::new(CardId::new(100 + i), Suit::Hearts, Rank::Five));
        }
        player
    }

    #[test]
    fn test_pay_cost_taps_exactly() {
        let mut player = player_with(5, 0);
        assert!(can_afford(&player, 5));
        let tapped = pay_cost(&mut player, 3).unwrap();
        assert_eq!(tapped.len(), 3);
        assert_eq!(player.untapped_resources(), 2);
        assert!(!can_afford(&player, 3));
    }

    #[test]
    fn test_pay_cost_refuses_short_row() {
        let mut player = player_with(2, 0);
        let err = pay_cost(&mut player, 3).unwrap_err();
        assert_eq!(
            err,
            DuelError::InsufficientResources {
                required: 3,
                available: 2
            }
        );
        assert_eq!(player.untapped_resources(), 2);
    }

    #[test]
    fn test_add_resource_respects_cap() {
        let mut player = player_with(9, 2);
        add_resource(&mut player, CardId::new(100)).unwrap();
        assert_eq!(player.resources.len(), 10);
        let err = add_resource(&mut player, CardId::new(101)).unwrap_err();
        assert_eq!(err, DuelError::ResourceRowFull(10));
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn test_swap_keeps_counts() {
        let mut player = player_with(3, 2);
        swap_resource(&mut player, CardId::new(100), CardId::new(1)).unwrap();
        assert_eq!(player.resources.len(), 3);
        assert_eq!(player.hand.len(), 2);
        assert!(player.resources.contains(CardId::new(100)));
        assert!(player.hand_card(CardId::new(1)).is_some());
        // Position in the row is preserved
        assert_eq!(player.resources.units[1].id(), CardId::new(100));
    }

    #[test]
    fn test_swap_unknown_resource() {
        let mut player = player_with(3, 1);
        let err = swap_resource(&mut player, CardId::new(100), CardId::new(77)).unwrap_err();
        assert_eq!(err, DuelError::UnitNotFound(CardId::new(77)));
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn test_skip_reasons() {
        let turn = TurnStructure::new(PlayerId::ONE, Phase::ResourceStart);
        let player = player_with(3, 0);
        assert!(resource_step_skip_reason(&turn, &player).is_some());

        let mut later = turn.clone();
        later.next_turn();
        later.next_turn();
        assert!(resource_step_skip_reason(&later, &player).is_none());
        assert!(resource_step_skip_reason(&later, &player_with(10, 0)).is_some());
    }
}
