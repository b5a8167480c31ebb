//! Match setup parameters
//!
//! The deck variant is a tagged `MatchMode` so the rules engine branches on a
//! type instead of mode strings. Scripted scenarios carry fully pre-seeded
//! seats and skip the opening resource selection.

use crate::core::{CardSpec, PlayerId};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_LIFE: i32 = 20;
pub const DEFAULT_HAND_SIZE: usize = 7;
/// Cards each seat moves into resources during `InitSelect`
pub const INITIAL_RESOURCE_PICKS: usize = 3;
/// Both opening hands must fit in one shared 52-card deck
pub const MAX_HAND_SIZE: usize = 26;

/// Deck variant and special play modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchMode {
    /// One shuffled deck shared by both seats
    #[default]
    SharedDeck,
    /// Each seat draws from its own shuffled deck
    PerPlayerDecks,
    /// Shared deck; running out of cards never ends the match
    Sandbox,
    /// Pre-seeded hands, rows and life totals
    Scenario(ScenarioSetup),
}

impl MatchMode {
    pub fn tiebreaker_enabled(&self) -> bool {
        !matches!(self, MatchMode::Sandbox)
    }
}

/// Everything needed to start a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub player_names: [String; 2],
    pub starting_life: i32,
    pub hand_size: usize,
    /// Allow several blockers on one attacker
    pub multi_blocking: bool,
    /// Seed for deck shuffling
    pub seed: u64,
    pub starting_player: PlayerId,
    pub mode: MatchMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            starting_life: DEFAULT_STARTING_LIFE,
            hand_size: DEFAULT_HAND_SIZE,
            multi_blocking: false,
            seed: 0,
            starting_player: PlayerId::ONE,
            mode: MatchMode::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_multi_blocking(mut self, enabled: bool) -> Self {
        self.multi_blocking = enabled;
        self
    }

    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = player;
        self
    }

    pub fn with_player_names(mut self, p1: impl Into<String>, p2: impl Into<String>) -> Self {
        self.player_names = [p1.into(), p2.into()];
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Reject settings no match can be started from
    pub fn validate(&self) -> Result<()> {
        if self.starting_player.index() > 1 {
            return Err(DuelError::InvalidConfig(format!(
                "starting player {} is not a seat",
                self.starting_player
            )));
        }
        if self.starting_life <= 0 {
            return Err(DuelError::InvalidConfig(format!(
                "starting life must be positive, got {}",
                self.starting_life
            )));
        }
        if !(INITIAL_RESOURCE_PICKS..=MAX_HAND_SIZE).contains(&self.hand_size) {
            return Err(DuelError::InvalidConfig(format!(
                "hand size {} outside {}..={}",
                self.hand_size, INITIAL_RESOURCE_PICKS, MAX_HAND_SIZE
            )));
        }
        Ok(())
    }
}

/// Pre-seeded state of one seat in a scripted scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeatSetup {
    /// Overrides the configured starting life
    #[serde(default)]
    pub life: Option<i32>,
    #[serde(default)]
    pub hand: Vec<CardSpec>,
    #[serde(default)]
    pub resources: Vec<CardSpec>,
    /// Field units start ready (not summoning sick)
    #[serde(default)]
    pub field: Vec<CardSpec>,
    /// Personal library, top card last
    #[serde(default)]
    pub library: Vec<CardSpec>,
}

/// A scripted starting position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScenarioSetup {
    pub seats: [SeatSetup; 2],
    /// Shared draw pile, top card last. When absent each seat draws from
    /// its own library.
    #[serde(default)]
    pub shared_deck: Option<Vec<CardSpec>>,
    /// Run the starting player's upkeep and draw instead of opening
    /// directly in its main phase
    #[serde(default)]
    pub open_at_upkeep: bool,
}
