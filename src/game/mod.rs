//! Match state, the turn controller and the seats that drive it

/// Record a verbose log line on a match, compiled out without the
/// `verbose-logging` feature
macro_rules! log_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

pub mod combat;
pub mod config;
pub mod controller;
pub mod economy;
mod effects;
pub mod events;
pub mod game_loop;
pub mod heuristic_controller;
pub mod intent;
pub mod logger;
pub mod phase;
pub mod random_controller;
pub mod state;
mod turn;

pub use combat::{
    can_block, clash, resolve_combat, ClashResult, CombatReport, CombatState, Combatant,
};
pub use config::{
    MatchConfig, MatchMode, ScenarioSetup, SeatSetup, DEFAULT_HAND_SIZE, DEFAULT_STARTING_LIFE,
    INITIAL_RESOURCE_PICKS, MAX_HAND_SIZE,
};
pub use controller::{MatchView, PlayerController};
pub use economy::ResourceDecision;
pub use events::{EffectKind, GameEvent, MatchOutcome, WinReason};
pub use game_loop::{MatchEndReason, MatchResult, MatchRunner};
pub use heuristic_controller::HeuristicController;
pub use intent::Intent;
pub use logger::{LogEntry, MatchLogger, OutputFormat, OutputMode, VerbosityLevel};
pub use phase::{Phase, TurnStructure};
pub use random_controller::RandomController;
pub use state::{tiebreak, DrawSource, Match, Transition};
