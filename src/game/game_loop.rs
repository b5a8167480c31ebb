//! Match loop implementation
//!
//! Drives a match by asking the deciding seat's controller for a choice,
//! turning it into intents and applying them, until the match ends or the
//! turn limit is hit.

use crate::ai::resource::describe;
use crate::core::PlayerId;
use crate::game::controller::{MatchView, PlayerController};
use crate::game::{
    GameEvent, Intent, Match, MatchOutcome, Phase, Transition, VerbosityLevel, WinReason,
    INITIAL_RESOURCE_PICKS,
};
use crate::{DuelError, Result};

/// Result of running a match to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Final outcome (None if the match was cut short)
    pub outcome: Option<MatchOutcome>,
    /// Total number of turns started
    pub turns_played: u32,
    /// Reason the run stopped
    pub end_reason: MatchEndReason,
}

impl MatchResult {
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.and_then(|o| o.winner())
    }
}

/// Reason the run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEndReason {
    /// A player's life reached 0 or less
    PlayerDeath(PlayerId),
    /// Both draw sources ran dry and the tiebreaker decided
    Exhaustion,
    /// A player resigned
    Resignation(PlayerId),
    /// Match reached the maximum turn limit
    TurnLimit,
    /// A bounded run finished without the match ending
    Manual,
}

/// Match loop manager
pub struct MatchRunner<'a> {
    /// The match being played
    pub game: &'a mut Match,
    /// Maximum turns before stopping
    max_turns: u32,
    /// Turns started since the runner was created
    turns_elapsed: u32,
    /// Controller intents the rules refused
    rejected: u32,
    /// Whether the turn player has been asked to attack this turn
    attack_considered: bool,
    /// Every event produced, in order
    events: Vec<GameEvent>,
}

impl<'a> MatchRunner<'a> {
    pub fn new(game: &'a mut Match) -> Self {
        MatchRunner {
            game,
            max_turns: 500,
            turns_elapsed: 0,
            rejected: 0,
            attack_considered: false,
            events: Vec::new(),
        }
    }

    /// Set maximum turns before stopping
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Events produced so far, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of controller intents that were rejected
    pub fn rejected_intents(&self) -> u32 {
        self.rejected
    }

    /// Run the match with one controller per seat
    pub fn run_match(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<MatchResult> {
        self.run_bounded(controller1, controller2, None)
    }

    /// Run until `turns_to_run` more turns have started or the match ends
    ///
    /// Returns `MatchEndReason::Manual` if the match is still going.
    pub fn run_turns(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
        turns_to_run: u32,
    ) -> Result<MatchResult> {
        let stop_at = self.turns_elapsed + turns_to_run;
        self.run_bounded(controller1, controller2, Some(stop_at))
    }

    fn run_bounded(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
        stop_at: Option<u32>,
    ) -> Result<MatchResult> {
        if controller1.player_id() != PlayerId::ONE || controller2.player_id() != PlayerId::TWO {
            return Err(DuelError::InvalidSelection(
                "controllers must play seats P1 and P2 in order".to_string(),
            ));
        }

        loop {
            if let Some(result) = self.check_finished() {
                return Ok(result);
            }
            if self.turns_elapsed >= self.max_turns {
                self.game
                    .logger
                    .minimal(&format!("Turn limit reached ({})", self.max_turns));
                return Ok(self.unfinished(MatchEndReason::TurnLimit));
            }
            if stop_at.is_some_and(|stop| self.turns_elapsed >= stop) {
                return Ok(self.unfinished(MatchEndReason::Manual));
            }
            self.step(controller1, controller2)?;
        }
    }

    fn unfinished(&self, end_reason: MatchEndReason) -> MatchResult {
        MatchResult {
            outcome: None,
            turns_played: self.turns_elapsed,
            end_reason,
        }
    }

    fn check_finished(&self) -> Option<MatchResult> {
        let outcome = self.game.outcome?;
        let end_reason = match outcome {
            MatchOutcome::Winner {
                player,
                reason: WinReason::LifeDepleted,
            } => MatchEndReason::PlayerDeath(player.opponent()),
            MatchOutcome::Winner {
                player,
                reason: WinReason::Resignation,
            } => MatchEndReason::Resignation(player.opponent()),
            MatchOutcome::Winner {
                reason: WinReason::Tiebreaker,
                ..
            }
            | MatchOutcome::Draw => MatchEndReason::Exhaustion,
        };
        Some(MatchResult {
            outcome: Some(outcome),
            turns_played: self.turns_elapsed,
            end_reason,
        })
    }

    /// Apply one intent for a seat. A rejection is logged and reported as
    /// `false`; the match is left as it was.
    fn submit(&mut self, seat: PlayerId, controller_name: &str, intent: Intent) -> bool {
        let label = intent.label();
        match self.game.apply(seat, intent) {
            Ok(Transition { state, events }) => {
                *self.game = state;
                for event in &events {
                    if let GameEvent::TurnStarted { .. } = event {
                        self.turns_elapsed += 1;
                        self.attack_considered = false;
                    }
                }
                self.events.extend(events);
                true
            }
            Err(err) => {
                self.rejected += 1;
                self.game.logger.warning(&format!(
                    "[{}] {} rejected for {}: {}",
                    controller_name, label, seat, err
                ));
                false
            }
        }
    }

    fn choice(&mut self, controller_name: &str, message: String) {
        self.game.logger.controller_choice(controller_name, &message);
    }

    /// Ask the deciding seat for one decision and apply it
    fn step(
        &mut self,
        controller1: &mut dyn PlayerController,
        controller2: &mut dyn PlayerController,
    ) -> Result<()> {
        let seat = self
            .game
            .deciding_player()
            .ok_or(DuelError::MatchOver)?;
        let controller: &mut dyn PlayerController = if seat == PlayerId::ONE {
            controller1
        } else {
            controller2
        };
        let name = controller.name().to_string();
        let phase = self.game.phase();

        match phase {
            Phase::InitSelect => {
                let picks = controller.choose_initial_resources(&MatchView::new(self.game, seat));
                self.choice(&name, format!("{} seeds resources with {:?}", seat, picks));
                if !self.submit(seat, &name, Intent::SelectInitialResources(picks)) {
                    let fallback = self
                        .game
                        .player(seat)
                        .hand
                        .iter()
                        .take(INITIAL_RESOURCE_PICKS)
                        .map(|c| c.id)
                        .collect();
                    if !self.submit(seat, &name, Intent::SelectInitialResources(fallback)) {
                        return Err(DuelError::InvalidSelection(format!(
                            "{} cannot seed its resource row",
                            seat
                        )));
                    }
                }
            }
            Phase::ResourceStart
            | Phase::ResourceAddSelect
            | Phase::ResourceSwapSelectHand
            | Phase::ResourceSwapSelectPile => {
                let decision = controller.choose_resource_action(&MatchView::new(self.game, seat));
                self.choice(&name, format!("{} will {}", seat, describe(&decision)));
                if !self.submit(seat, &name, decision.into_intent()) {
                    self.submit(seat, &name, Intent::SkipResource);
                }
            }
            Phase::Main => {
                let play = controller.choose_main_action(&MatchView::new(self.game, seat));
                if let Some(intent) = play {
                    self.choice(&name, format!("{} plays {:?}", seat, intent));
                    if self.submit(seat, &name, intent) {
                        return Ok(());
                    }
                }
                if !self.attack_considered {
                    self.attack_considered = true;
                    let attackers = controller.choose_attackers(&MatchView::new(self.game, seat));
                    if !attackers.is_empty() {
                        self.choice(&name, format!("{} attacks with {:?}", seat, attackers));
                        if self.submit(seat, &name, Intent::DeclareAttackers(attackers)) {
                            self.submit(seat, &name, Intent::ConfirmAttack);
                        }
                    }
                    return Ok(());
                }
                self.submit(seat, &name, Intent::EndTurn);
            }
            Phase::AttackDeclare => {
                // Only reached when a confirmation was refused
                if !self.submit(seat, &name, Intent::ConfirmAttack) {
                    self.submit(seat, &name, Intent::CancelAttack);
                }
            }
            Phase::BlockDeclare => {
                let blocks = controller.choose_blockers(&MatchView::new(self.game, seat));
                if !blocks.is_empty() {
                    self.choice(&name, format!("{} blocks {:?}", seat, blocks));
                }
                for (blocker, attacker) in blocks {
                    self.submit(seat, &name, Intent::DeclareBlock { blocker, attacker });
                }
                self.submit(seat, &name, Intent::ConfirmBlocks);
            }
            Phase::Upkeep | Phase::Draw | Phase::Damage | Phase::GameOver => {
                return Err(DuelError::WrongPhase {
                    expected: "a phase waiting on a seat",
                    actual: phase,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardSpec, Rank, Suit};
    use crate::game::{
        HeuristicController, Intent, MatchConfig, MatchMode, RandomController, ScenarioSetup,
        SeatSetup,
    };

    #[test]
    fn test_heuristic_self_play_finishes() {
        let mut game = Match::new(MatchConfig::default().with_seed(1)).unwrap();
        let mut p1 = HeuristicController::new(PlayerId::ONE);
        let mut p2 = HeuristicController::new(PlayerId::TWO);
        let result = MatchRunner::new(&mut game)
            .with_max_turns(400)
            .run_match(&mut p1, &mut p2)
            .unwrap();

        assert!(result.turns_played > 0);
        assert_ne!(result.end_reason, MatchEndReason::Manual);
        if result.outcome.is_some() {
            assert!(game.is_over());
        }
    }

    #[test]
    fn test_run_turns_stops_early() {
        let mut game = Match::new(MatchConfig::default().with_seed(2)).unwrap();
        let mut p1 = RandomController::with_seed(PlayerId::ONE, 7);
        let mut p2 = RandomController::with_seed(PlayerId::TWO, 8);
        let mut runner = MatchRunner::new(&mut game);
        let result = runner.run_turns(&mut p1, &mut p2, 2).unwrap();

        if result.outcome.is_none() {
            assert_eq!(result.end_reason, MatchEndReason::Manual);
            assert_eq!(result.turns_played, 2);
        }
        assert!(!runner.events().is_empty());
    }

    #[test]
    fn test_rejected_intent_logged_once_by_runner() {
        let setup = ScenarioSetup {
            seats: [
                SeatSetup {
                    hand: vec![CardSpec::new(Suit::Hearts, Rank::King)],
                    resources: vec![CardSpec::new(Suit::Spades, Rank::Two); 4],
                    ..SeatSetup::default()
                },
                SeatSetup {
                    field: vec![CardSpec::new(Suit::Spades, Rank::Eight)],
                    ..SeatSetup::default()
                },
            ],
            shared_deck: Some(Vec::new()),
            open_at_upkeep: false,
        };
        let mut game =
            Match::new(MatchConfig::default().with_mode(MatchMode::Scenario(setup))).unwrap();
        let king = game.player(PlayerId::ONE).hand[0].id;
        let target = game.player(PlayerId::TWO).field.units[0].id();
        let logged_before = game.logger.logs().len();

        let mut runner = MatchRunner::new(&mut game);
        assert!(!runner.submit(PlayerId::ONE, "test", Intent::play_targeting(king, target)));
        assert_eq!(runner.rejected_intents(), 1);

        assert_eq!(game.logger.logs().len(), logged_before + 1);
        let warning = game.logger.logs_in("warning").next().unwrap();
        assert!(warning.message.contains("Spectrum mismatch"));
        assert_eq!(game.player(PlayerId::ONE).untapped_resources(), 4);
    }

    #[test]
    fn test_controller_seats_checked() {
        let mut game = Match::new(MatchConfig::default()).unwrap();
        let mut p1 = HeuristicController::new(PlayerId::TWO);
        let mut p2 = HeuristicController::new(PlayerId::TWO);
        let err = MatchRunner::new(&mut game).run_match(&mut p1, &mut p2).unwrap_err();
        assert!(matches!(err, DuelError::InvalidSelection(_)));
    }
}
