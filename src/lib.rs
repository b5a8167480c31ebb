//! Spectrum Duel - two-player card battle engine
//!
//! A rules engine for a duel played with a standard 52-card deck: suits map
//! to physical and magical spectrums, the resource row pays for cards, and
//! combat clashes units by rank. Matches are immutable-update values driven
//! by intents, so AI search and replays can branch freely.

pub mod ai;
pub mod core;
pub mod error;
pub mod game;
pub mod zones;

pub use error::{DuelError, Result};
