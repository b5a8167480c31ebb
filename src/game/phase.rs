//! Match phases and the turn counter

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// Every state of the turn machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Match start: both seats pick three hand cards to seed resources
    InitSelect,
    Upkeep,
    Draw,
    /// Waiting on the turn player's add/swap/skip choice
    ResourceStart,
    ResourceAddSelect,
    ResourceSwapSelectHand,
    ResourceSwapSelectPile,
    Main,
    AttackDeclare,
    BlockDeclare,
    Damage,
    GameOver,
}

impl Phase {
    /// Any of the resource-step selection states
    pub fn is_resource_step(&self) -> bool {
        matches!(
            self,
            Phase::ResourceStart
                | Phase::ResourceAddSelect
                | Phase::ResourceSwapSelectHand
                | Phase::ResourceSwapSelectPile
        )
    }
}

/// Whose turn it is, and how many full rounds have been played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1)
    pub turn_number: u32,

    /// Current phase
    pub phase: Phase,

    /// Turn player
    pub active_player: PlayerId,

    /// Seat that took the first turn (for turn-counting parity)
    pub starting_player: PlayerId,
}

impl TurnStructure {
    pub fn new(starting_player: PlayerId, phase: Phase) -> Self {
        TurnStructure {
            turn_number: 1,
            phase,
            active_player: starting_player,
            starting_player,
        }
    }

    /// True during the starting player's very first turn
    pub fn is_opening_turn(&self) -> bool {
        self.turn_number == 1 && self.active_player == self.starting_player
    }

    /// Hand the turn to the other seat. The counter only moves when play
    /// returns to the starting seat.
    pub fn next_turn(&mut self) {
        self.active_player = self.active_player.opponent();
        if self.active_player == self.starting_player {
            self.turn_number += 1;
        }
        self.phase = Phase::Upkeep;
    }
}
