//! Ordered outcome events emitted by every accepted intent
//!
//! Presentation layers replay these in order to animate the match; the
//! engine itself attaches no timing to them.

use crate::core::{Card, CardId, PlayerId};
use crate::game::Phase;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Why a seat won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// Opponent's life reached 0 or less
    LifeDepleted,
    /// Both seats ran out of cards and this seat won the tiebreaker
    Tiebreaker,
    /// Opponent resigned
    Resignation,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner { player: PlayerId, reason: WinReason },
    Draw,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Winner { player, .. } => Some(*player),
            MatchOutcome::Draw => None,
        }
    }
}

/// What a Tactic did when it resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Jack: cards actually drawn
    DrewCards { drawn: u8 },
    /// Queen attached to a unit, possibly replacing an older Queen
    QueenAttached {
        target: CardId,
        replaced: Option<CardId>,
    },
    /// King destroyed a unit
    UnitDestroyed { target: CardId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
        /// Set when the phase was skipped over
        reason: Option<String>,
    },
    TurnStarted {
        player: PlayerId,
        turn_number: u32,
    },
    InitialResourcesSelected {
        player: PlayerId,
        cards: SmallVec<[CardId; 3]>,
    },
    CardDrawn {
        player: PlayerId,
        card: CardId,
    },
    /// Deck empty; counts toward the exhaustion tiebreaker
    DrawFailed {
        player: PlayerId,
        consecutive_failures: u32,
    },
    ResourceAdded {
        player: PlayerId,
        card: CardId,
    },
    ResourceSwapped {
        player: PlayerId,
        into_resources: CardId,
        into_hand: CardId,
    },
    ResourcesPaid {
        player: PlayerId,
        amount: u8,
        tapped: Vec<CardId>,
    },
    CardConscripted {
        player: PlayerId,
        card: Card,
    },
    EffectResolved {
        player: PlayerId,
        card: Card,
        effect: EffectKind,
    },
    AttackDeclared {
        player: PlayerId,
        attackers: Vec<CardId>,
    },
    BlockDeclared {
        blocker: CardId,
        attacker: CardId,
        /// Blocker whose assignment was evicted (single-block mode)
        evicted: Option<CardId>,
    },
    /// A blocked attacker meets its blockers
    Clash {
        attacker: CardId,
        blockers: Vec<CardId>,
    },
    UnitDied {
        owner: PlayerId,
        unit: CardId,
    },
    DamageDealt {
        source: CardId,
        target: PlayerId,
        amount: u8,
        life_after: i32,
    },
    GameEnded {
        outcome: MatchOutcome,
    },
}
