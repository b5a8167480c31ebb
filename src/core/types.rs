//! Strongly-typed wrappers for game concepts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// A suit/rank pair without identity, used to describe scripted setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSpec {
    pub suit: crate::core::Suit,
    pub rank: crate::core::Rank,
}

impl CardSpec {
    pub fn new(suit: crate::core::Suit, rank: crate::core::Rank) -> Self {
        CardSpec { suit, rank }
    }
}
