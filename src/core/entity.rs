//! Simple integer identities for cards and seats

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a physical card
///
/// Cards are unique for the whole match, so a unit on the battlefield or in a
/// resource row is addressed by the id of the card it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(0);
    pub const TWO: PlayerId = PlayerId(1);

    /// Build a seat from its index. Only 0 and 1 are meaningful.
    pub fn new(idx: u8) -> Self {
        PlayerId(idx)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn opponent(&self) -> PlayerId {
        PlayerId(1 - self.0.min(1))
    }

    pub fn both() -> [PlayerId; 2] {
        [PlayerId::ONE, PlayerId::TWO]
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Mints contiguous card ids
///
/// Keeps IDs simple and contiguous for human readability. IDs are never
/// reused within a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next_id: u32,
}

impl CardIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
