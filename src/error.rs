//! Error types for the duel engine
//!
//! Every rejected intent surfaces as one of these variants. A rejection never
//! mutates the match: intents are applied to a copy and the copy is dropped.

use crate::core::{CardId, PlayerId, Spectrum};
use crate::game::Phase;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuelError {
    #[error("The match is already over")]
    MatchOver,

    #[error("Intent not allowed during {actual:?} (expected {expected})")]
    WrongPhase { expected: &'static str, actual: Phase },

    #[error("Player {actor} cannot act now; waiting on player {expected}")]
    WrongActor { actor: PlayerId, expected: PlayerId },

    #[error("Unknown player {0}")]
    PlayerNotFound(PlayerId),

    #[error("Card {0} is not in the acting player's hand")]
    CardNotInHand(CardId),

    #[error("Unit {0} not found")]
    UnitNotFound(CardId),

    #[error("Insufficient resources: need {required}, have {available} untapped")]
    InsufficientResources { required: u8, available: u8 },

    #[error("Resource row is full ({0} cards)")]
    ResourceRowFull(usize),

    #[error("Spectrum mismatch: {source_spectrum:?} cannot affect {target_spectrum:?}")]
    SpectrumMismatch {
        source_spectrum: Spectrum,
        target_spectrum: Spectrum,
    },

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Illegal attacker {unit}: {reason}")]
    IllegalAttacker { unit: CardId, reason: String },

    #[error("Illegal block by {blocker} on {attacker}: {reason}")]
    IllegalBlock {
        blocker: CardId,
        attacker: CardId,
        reason: String,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DuelError {
    fn from(err: std::io::Error) -> Self {
        DuelError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DuelError {
    fn from(err: serde_json::Error) -> Self {
        DuelError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;
