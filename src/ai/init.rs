//! Opening resource selection

use crate::core::{Card, CardId, CardKind};
use crate::game::{MatchView, INITIAL_RESOURCE_PICKS};
use smallvec::SmallVec;

/// How much the seat wants to keep a card in hand; low scores are resourced
///
/// Aces rank highest, then Tactics, then cheap soldiers. Mid and high
/// soldiers are the first to go.
pub fn keep_preference(card: &Card) -> u32 {
    match card.kind() {
        CardKind::King => 90,
        CardKind::Queen => 85,
        CardKind::Jack => 80,
        CardKind::Soldier if card.is_ace() => 100,
        CardKind::Soldier if card.value() <= 4 => 50 + card.value() as u32,
        CardKind::Soldier => card.value() as u32,
    }
}

/// The three lowest-preference hand cards
pub fn choose_initial_resources(view: &MatchView) -> SmallVec<[CardId; 3]> {
    let mut hand: Vec<&Card> = view.hand().iter().collect();
    hand.sort_by_key(|card| (keep_preference(card), card.id));
    hand.iter()
        .take(INITIAL_RESOURCE_PICKS)
        .map(|card| card.id)
        .collect()
}
