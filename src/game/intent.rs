//! Discrete intents issued by human or AI seats

use crate::core::{CardId, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Everything a seat can ask the turn controller to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Opening pick: exactly three distinct hand cards into resources
    SelectInitialResources(SmallVec<[CardId; 3]>),

    /// ResourceStart -> ResourceAddSelect
    BeginResourceAdd,
    /// ResourceStart -> ResourceSwapSelectHand
    BeginResourceSwap,
    AddResource(CardId),
    /// Remember the hand card for a swap and ask for the resource card
    SelectSwapHandCard(CardId),
    SwapResource {
        hand_card: CardId,
        resource_unit: CardId,
    },
    /// Back out of a resource sub-selection
    CancelResourceChoice,
    SkipResource,

    PlayCard {
        card: CardId,
        target: Option<CardId>,
        target_owner: Option<PlayerId>,
    },

    DeclareAttackers(Vec<CardId>),
    CancelAttack,
    ConfirmAttack,

    DeclareBlock {
        blocker: CardId,
        attacker: CardId,
    },
    ClearBlock(CardId),
    ConfirmBlocks,

    EndTurn,
    Resign,
}

impl Intent {
    pub fn play(card: CardId) -> Self {
        Intent::PlayCard {
            card,
            target: None,
            target_owner: None,
        }
    }

    pub fn play_targeting(card: CardId, target: CardId) -> Self {
        Intent::PlayCard {
            card,
            target: Some(target),
            target_owner: None,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Intent::SelectInitialResources(_) => "select initial resources",
            Intent::BeginResourceAdd => "begin resource add",
            Intent::BeginResourceSwap => "begin resource swap",
            Intent::AddResource(_) => "add resource",
            Intent::SelectSwapHandCard(_) => "select swap hand card",
            Intent::SwapResource { .. } => "swap resource",
            Intent::CancelResourceChoice => "cancel resource choice",
            Intent::SkipResource => "skip resource",
            Intent::PlayCard { .. } => "play card",
            Intent::DeclareAttackers(_) => "declare attackers",
            Intent::CancelAttack => "cancel attack",
            Intent::ConfirmAttack => "confirm attack",
            Intent::DeclareBlock { .. } => "declare block",
            Intent::ClearBlock(_) => "clear block",
            Intent::ConfirmBlocks => "confirm blocks",
            Intent::EndTurn => "end turn",
            Intent::Resign => "resign",
        }
    }
}
