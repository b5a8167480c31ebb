//! Resource step policy: add, swap or skip

use crate::core::{Card, RESOURCE_CAP};
use crate::game::{MatchView, ResourceDecision};

/// How much a card is worth holding given the current resource count
///
/// Aces and Tactics always score high. Soldiers score by how soon they can
/// be paid for: affordable now beats affordable next turn beats expensive.
pub fn keep_score(card: &Card, resources: usize) -> u32 {
    if card.is_ace() {
        return 100;
    }
    if card.is_tactic() {
        return 90;
    }
    let cost = card.cost() as usize;
    let value = card.value() as u32;
    if cost <= resources {
        70 + value
    } else if cost <= resources + 1 {
        50 + value
    } else {
        20 + 2 * value
    }
}

/// Score gap a swap must clear. Shrinks as the row fills: ramp early,
/// filter late.
pub fn swap_threshold(resources: usize) -> u32 {
    45u32.saturating_sub(4 * resources as u32).max(5)
}

pub fn choose_resource_step(view: &MatchView) -> ResourceDecision {
    let resources = view.resource_count();
    let worst_hand = view
        .hand()
        .iter()
        .min_by_key(|card| (keep_score(card, resources), card.id));
    let Some(worst_hand) = worst_hand else {
        return ResourceDecision::Skip;
    };
    let worst_score = keep_score(worst_hand, resources);

    let best_resource = view
        .my_resources()
        .iter()
        .map(|unit| (keep_score(&unit.card, resources), unit.id()))
        .max_by_key(|(score, id)| (*score, std::cmp::Reverse(*id)));

    if let Some((best_score, resource_unit)) = best_resource {
        if best_score > worst_score + swap_threshold(resources) {
            return ResourceDecision::Swap {
                hand_card: worst_hand.id,
                resource_unit,
            };
        }
    }

    if resources < RESOURCE_CAP {
        ResourceDecision::Add(worst_hand.id)
    } else {
        ResourceDecision::Skip
    }
}

/// One-line summary for the controller log
pub fn describe(decision: &ResourceDecision) -> String {
    match decision {
        ResourceDecision::Add(card) => format!("add {} to resources", card),
        ResourceDecision::Swap {
            hand_card,
            resource_unit,
        } => format!("swap {} for resource {}", hand_card, resource_unit),
        ResourceDecision::Skip => "skip resource step".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(CardId::new(0), Suit::Hearts, rank)
    }

    #[test]
    fn test_keep_score_tiers() {
        assert_eq!(keep_score(&card(Rank::Ace), 0), 100);
        assert_eq!(keep_score(&card(Rank::Queen), 0), 90);
        assert_eq!(keep_score(&card(Rank::Four), 4), 74);
        assert_eq!(keep_score(&card(Rank::Five), 4), 55);
        assert_eq!(keep_score(&card(Rank::Nine), 4), 38);
    }

    #[test]
    fn test_threshold_tightens() {
        assert_eq!(swap_threshold(0), 45);
        assert_eq!(swap_threshold(5), 25);
        assert_eq!(swap_threshold(10), 5);
        assert!(swap_threshold(3) > swap_threshold(8));
    }
}
