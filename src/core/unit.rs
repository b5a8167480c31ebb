//! Cards placed on a field or in a resource row

use crate::core::{Card, CardId, PlayerId, Spectrum};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A card on a player's field or resource row
///
/// The unit is addressed by its card's id. Attached Queens recolor the unit;
/// only the most recent one is active because attaching a new Queen discards
/// the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlefieldUnit {
    pub card: Card,
    pub owner: PlayerId,
    pub tapped: bool,
    /// Set the turn the unit enters, cleared at its owner's next upkeep
    pub summoning_sick: bool,
    pub attachments: SmallVec<[Card; 1]>,
}

impl BattlefieldUnit {
    /// A freshly conscripted soldier
    pub fn conscripted(card: Card, owner: PlayerId) -> Self {
        BattlefieldUnit {
            card,
            owner,
            tapped: false,
            summoning_sick: true,
            attachments: SmallVec::new(),
        }
    }

    /// A card placed into a resource row
    pub fn resource(card: Card, owner: PlayerId) -> Self {
        BattlefieldUnit {
            card,
            owner,
            tapped: false,
            summoning_sick: false,
            attachments: SmallVec::new(),
        }
    }

    pub fn id(&self) -> CardId {
        self.card.id
    }

    pub fn combat_value(&self) -> u8 {
        self.card.combat_value()
    }

    pub fn is_ace(&self) -> bool {
        self.card.is_ace()
    }

    /// The attached Queen's color if present, else the card's own
    pub fn effective_spectrum(&self) -> Spectrum {
        self.attachments
            .last()
            .map(|queen| queen.spectrum())
            .unwrap_or_else(|| self.card.spectrum())
    }

    /// Attach a Queen, returning the one it replaces
    pub fn attach_queen(&mut self, queen: Card) -> Option<Card> {
        let replaced = self.attachments.pop();
        self.attachments.push(queen);
        replaced
    }

    /// Untapped and not summoning sick
    pub fn is_ready(&self) -> bool {
        !self.tapped && !self.summoning_sick
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Break the unit back into cards: itself first, then attachments
    pub fn into_cards(self) -> SmallVec<[Card; 2]> {
        let mut cards = SmallVec::new();
        cards.push(self.card);
        cards.extend(self.attachments);
        cards
    }
}
