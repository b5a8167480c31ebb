//! Player representation

use crate::core::{Card, CardId, PlayerId, PlayerName};
use crate::zones::UnitRow;
use serde::{Deserialize, Serialize};

/// Maximum number of cards in a resource row
pub const RESOURCE_CAP: usize = 10;

/// Represents a player in the match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat of this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Life total
    pub life: i32,

    /// Hand, kept sorted by spectrum then rank
    pub hand: Vec<Card>,

    /// Personal library (per-player deck variants only); top is the last card
    pub library: Vec<Card>,

    /// Resource row, capped at `RESOURCE_CAP`
    pub resources: UnitRow,

    /// Conscripted soldiers
    pub field: UnitRow,

    /// Discard pile
    pub discard: Vec<Card>,

    /// Consecutive draws that found no card
    pub draw_failures: u32,

    /// Reset at upkeep
    pub has_attacked_this_turn: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            hand: Vec::new(),
            library: Vec::new(),
            resources: UnitRow::new(id),
            field: UnitRow::new(id),
            discard: Vec::new(),
            draw_failures: 0,
            has_attacked_this_turn: false,
        }
    }

    pub fn lose_life(&mut self, amount: i32) {
        self.life -= amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }

    pub fn untapped_resources(&self) -> u8 {
        self.resources.untapped_count() as u8
    }

    pub fn resources_full(&self) -> bool {
        self.resources.len() >= RESOURCE_CAP
    }

    pub fn hand_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Remove a card from hand
    pub fn take_from_hand(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    /// Put a card in hand, keeping the hand sorted
    pub fn add_to_hand(&mut self, card: Card) {
        self.hand.push(card);
        self.sort_hand();
    }

    pub fn sort_hand(&mut self) {
        self.hand.sort_by_key(|c| c.hand_sort_key());
    }

    /// Sum of field combat values, used by the tiebreaker
    pub fn field_value(&self) -> u32 {
        self.field.total_value()
    }

    /// Upkeep: untap, clear sickness and the per-turn attack flag
    pub fn begin_turn(&mut self) {
        self.field.refresh();
        self.resources.refresh();
        self.has_attacked_this_turn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BattlefieldUnit, Rank, Suit};

    #[test]
    fn test_player_creation() {
        let player = Player::new(PlayerId::ONE, "Alice", 20);

        assert_eq!(player.id, PlayerId::ONE);
        assert_eq!(player.name.as_str(), "Alice");
        assert_eq!(player.life, 20);
        assert!(!player.is_defeated());
        assert_eq!(player.resources.owner, PlayerId::ONE);
        assert!(player.field.is_empty());
    }

    #[test]
    fn test_hand_sorted_by_spectrum_then_rank() {
        let mut player = Player::new(PlayerId::ONE, "Bob", 20);
        player.add_to_hand(Card::new(CardId::new(1), Suit::Hearts, Rank::Two));
        player.add_to_hand(Card::new(CardId::new(2), Suit::Spades, Rank::Nine));
        player.add_to_hand(Card::new(CardId::new(3), Suit::Clubs, Rank::Three));

        let order: Vec<u32> = player.hand.iter().map(|c| c.id.as_u32()).collect();
        assert_eq!(order, vec![3, 2, 1]);

        assert!(player.take_from_hand(CardId::new(2)).is_some());
        assert!(player.take_from_hand(CardId::new(2)).is_none());
        assert_eq!(player.hand.len(), 2);
    }

    #[test]
    fn test_begin_turn_refreshes_units() {
        let mut player = Player::new(PlayerId::TWO, "Charlie", 20);
        let card = Card::new(CardId::new(7), Suit::Clubs, Rank::Seven);
        let mut unit = BattlefieldUnit::conscripted(card, PlayerId::TWO);
        unit.tap();
        player.field.add(unit);
        player.has_attacked_this_turn = true;

        player.begin_turn();

        let unit = player.field.get(CardId::new(7)).unwrap();
        assert!(unit.is_ready());
        assert!(!player.has_attacked_this_turn);
        assert_eq!(player.field_value(), 7);
    }

    #[test]
    fn test_life_loss() {
        let mut player = Player::new(PlayerId::ONE, "Dana", 10);
        player.lose_life(7);
        assert_eq!(player.life, 3);
        player.lose_life(3);
        assert!(player.is_defeated());
    }
}
