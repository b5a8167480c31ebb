//! Core match types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;
pub mod unit;

pub use card::{standard_deck, Card, CardKind, Rank, Spectrum, Suit};
pub use entity::{CardId, CardIdAllocator, PlayerId};
pub use player::{Player, RESOURCE_CAP};
pub use types::{CardSpec, PlayerName};
pub use unit::BattlefieldUnit;
