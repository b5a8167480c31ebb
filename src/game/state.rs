//! Main match state structure
//!
//! The `Match` is a plain value. Intents are applied to a clone and the
//! clone is returned only when the intent is accepted, so a rejected intent
//! can never leave a half-applied state behind.

use crate::core::{
    standard_deck, BattlefieldUnit, Card, CardId, CardIdAllocator, CardSpec, Player, PlayerId,
    RESOURCE_CAP,
};
use crate::game::{
    CombatState, GameEvent, MatchConfig, MatchLogger, MatchMode, MatchOutcome, Phase,
    ScenarioSetup, TurnStructure, WinReason,
};
use crate::{DuelError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Where draws come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawSource {
    Shared,
    PerPlayer,
}

/// A new match value plus the ordered events that produced it
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: Match,
    pub events: Vec<GameEvent>,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub config: MatchConfig,

    /// Both seats, indexed by `PlayerId::index()`
    pub players: [Player; 2],

    /// Shared draw pile; the top card is the last element
    pub deck: Vec<Card>,

    pub draw_source: DrawSource,

    pub turn: TurnStructure,

    /// Declared attackers and blocker assignments for the current turn
    pub combat: CombatState,

    /// Which seats have finished `InitSelect`
    pub init_selected: [bool; 2],

    /// Hand card remembered between the two swap selection steps
    pub pending_swap: Option<CardId>,

    pub outcome: Option<MatchOutcome>,

    /// Append-only match log
    pub logger: MatchLogger,
}

impl Match {
    /// Build a match and run any automatic opening phases
    pub fn start(config: MatchConfig) -> Result<Transition> {
        config.validate()?;
        let mut ids = CardIdAllocator::new();
        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let starting = config.starting_player;

        let players = [
            Player::new(PlayerId::ONE, config.player_names[0].as_str(), config.starting_life),
            Player::new(PlayerId::TWO, config.player_names[1].as_str(), config.starting_life),
        ];

        let mut game = Match {
            players,
            deck: Vec::new(),
            draw_source: DrawSource::Shared,
            turn: TurnStructure::new(starting, Phase::InitSelect),
            combat: CombatState::new(),
            init_selected: [false; 2],
            pending_swap: None,
            outcome: None,
            logger: MatchLogger::new(),
            config: config.clone(),
        };
        let mut events = Vec::new();

        match &config.mode {
            MatchMode::SharedDeck | MatchMode::Sandbox => {
                let mut deck = standard_deck(&mut ids);
                deck.shuffle(&mut rng);
                game.deck = deck;
                game.deal_opening_hands();
            }
            MatchMode::PerPlayerDecks => {
                game.draw_source = DrawSource::PerPlayer;
                for player in PlayerId::both() {
                    let mut library = standard_deck(&mut ids);
                    library.shuffle(&mut rng);
                    game.player_mut(player).library = library;
                }
                game.deal_opening_hands();
            }
            MatchMode::Scenario(setup) => {
                game.seed_scenario(setup, &mut ids)?;
                game.init_selected = [true; 2];
                game.logger.normal("Scenario loaded");
                if setup.open_at_upkeep {
                    game.start_turn(&mut events);
                } else {
                    game.turn.phase = Phase::Main;
                }
                return Ok(Transition { state: game, events });
            }
        }

        game.logger.normal(&format!(
            "Match started: {} vs {} ({:?}), {} opens",
            game.players[0].name,
            game.players[1].name,
            config.mode,
            game.player(starting).name
        ));
        Ok(Transition { state: game, events })
    }

    /// Build a match, discarding the opening events
    pub fn new(config: MatchConfig) -> Result<Match> {
        Ok(Match::start(config)?.state)
    }

    fn deal_opening_hands(&mut self) {
        let first = self.config.starting_player;
        for _ in 0..self.config.hand_size {
            for player in [first, first.opponent()] {
                if let Some(card) = self.pop_draw(player) {
                    self.player_mut(player).hand.push(card);
                }
            }
        }
        for player in &mut self.players {
            player.sort_hand();
        }
    }

    fn seed_scenario(&mut self, setup: &ScenarioSetup, ids: &mut CardIdAllocator) -> Result<()> {
        let mut mint = |specs: &[CardSpec]| -> Vec<Card> {
            specs
                .iter()
                .map(|spec| Card::new(ids.next_id(), spec.suit, spec.rank))
                .collect()
        };

        for player_id in PlayerId::both() {
            let seat = &setup.seats[player_id.index()];
            if seat.resources.len() > RESOURCE_CAP {
                return Err(DuelError::InvalidScenario(format!(
                    "{} starts with {} resources (cap {})",
                    player_id,
                    seat.resources.len(),
                    RESOURCE_CAP
                )));
            }
            if let Some(field_card) = seat.field.iter().find(|spec| spec.rank.is_face()) {
                return Err(DuelError::InvalidScenario(format!(
                    "{} has a face card ({:?}) on the field",
                    player_id, field_card.rank
                )));
            }

            let hand = mint(&seat.hand);
            let resources = mint(&seat.resources);
            let field = mint(&seat.field);
            let library = mint(&seat.library);

            let player = self.player_mut(player_id);
            if let Some(life) = seat.life {
                if life <= 0 {
                    return Err(DuelError::InvalidScenario(format!(
                        "{} starts with non-positive life {}",
                        player_id, life
                    )));
                }
                player.life = life;
            }
            player.hand = hand;
            player.sort_hand();
            for card in resources {
                player.resources.add(BattlefieldUnit::resource(card, player_id));
            }
            for card in field {
                let mut unit = BattlefieldUnit::conscripted(card, player_id);
                unit.summoning_sick = false;
                player.field.add(unit);
            }
            player.library = library;
        }

        match &setup.shared_deck {
            Some(deck) => {
                self.deck = mint(deck);
                self.draw_source = DrawSource::Shared;
            }
            None => self.draw_source = DrawSource::PerPlayer,
        }
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The seat whose intent the match is waiting on, if exactly one
    pub fn deciding_player(&self) -> Option<PlayerId> {
        match self.turn.phase {
            Phase::GameOver => None,
            Phase::InitSelect => PlayerId::both()
                .into_iter()
                .find(|p| !self.init_selected[p.index()]),
            Phase::BlockDeclare => Some(self.turn.active_player.opponent()),
            _ => Some(self.turn.active_player),
        }
    }

    /// Find a unit on either field
    pub fn field_unit(&self, id: CardId) -> Option<&BattlefieldUnit> {
        self.players.iter().find_map(|p| p.field.get(id))
    }

    /// Owner of a unit on either field
    pub fn field_unit_owner(&self, id: CardId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.field.contains(id))
            .map(|p| p.id)
    }

    /// Remove the top card of a player's draw source
    fn pop_draw(&mut self, player: PlayerId) -> Option<Card> {
        match self.draw_source {
            DrawSource::Shared => self.deck.pop(),
            DrawSource::PerPlayer => self.player_mut(player).library.pop(),
        }
    }

    /// Cards left to draw for a player
    pub fn cards_left(&self, player: PlayerId) -> usize {
        match self.draw_source {
            DrawSource::Shared => self.deck.len(),
            DrawSource::PerPlayer => self.player(player).library.len(),
        }
    }

    /// Draw up to `count` cards. Returns how many were actually drawn.
    ///
    /// An empty source is a tracked condition, not an error: the seat's
    /// failure counter goes up and the exhaustion tiebreaker is checked once
    /// both seats have failed.
    pub(crate) fn draw_cards(
        &mut self,
        player: PlayerId,
        count: u8,
        events: &mut Vec<GameEvent>,
    ) -> u8 {
        let mut drawn = 0;
        for _ in 0..count {
            if self.is_over() {
                break;
            }
            match self.pop_draw(player) {
                Some(card) => {
                    let seat = self.player_mut(player);
                    seat.add_to_hand(card);
                    seat.draw_failures = 0;
                    drawn += 1;
                    events.push(GameEvent::CardDrawn { player, card: card.id });
                    log_verbose!(self, "{} draws {}", player, card);
                }
                None => {
                    let seat = self.player_mut(player);
                    seat.draw_failures += 1;
                    let failures = seat.draw_failures;
                    self.logger.warning(&format!(
                        "{} cannot draw: deck is empty ({} consecutive failures)",
                        player, failures
                    ));
                    events.push(GameEvent::DrawFailed {
                        player,
                        consecutive_failures: failures,
                    });
                    self.check_exhaustion(events);
                }
            }
        }
        drawn
    }

    /// Fire the tiebreaker when both seats have failed to draw
    fn check_exhaustion(&mut self, events: &mut Vec<GameEvent>) {
        if !self.config.mode.tiebreaker_enabled() {
            return;
        }
        if self.players.iter().all(|p| p.draw_failures > 0) {
            let outcome = tiebreak(&self.players[0], &self.players[1]);
            self.logger.minimal(&format!(
                "Both decks exhausted: life {}-{}, field value {}-{}",
                self.players[0].life,
                self.players[1].life,
                self.players[0].field_value(),
                self.players[1].field_value()
            ));
            self.end_match(outcome, events);
        }
    }

    /// Life at or below zero ends the match in the other seat's favor
    pub(crate) fn check_life(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.is_over() {
            return true;
        }
        if let Some(loser) = self.players.iter().find(|p| p.is_defeated()).map(|p| p.id) {
            self.end_match(
                MatchOutcome::Winner {
                    player: loser.opponent(),
                    reason: WinReason::LifeDepleted,
                },
                events,
            );
            return true;
        }
        false
    }

    pub(crate) fn end_match(&mut self, outcome: MatchOutcome, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.outcome = Some(outcome);
        self.set_phase(Phase::GameOver, None, events);
        let summary = match outcome {
            MatchOutcome::Winner { player, reason } => {
                format!("{} wins ({:?})", self.player(player).name, reason)
            }
            MatchOutcome::Draw => "Match drawn".to_string(),
        };
        self.logger.minimal(&summary);
        events.push(GameEvent::GameEnded { outcome });
    }

    /// Move to a phase, recording the transition
    pub(crate) fn set_phase(
        &mut self,
        to: Phase,
        reason: Option<String>,
        events: &mut Vec<GameEvent>,
    ) {
        let from = self.turn.phase;
        self.turn.phase = to;
        if let Some(reason) = &reason {
            self.logger.phase(&format!("{:?} -> {:?}: {}", from, to, reason));
        } else {
            log_verbose!(self, "{:?} -> {:?}", from, to);
        }
        events.push(GameEvent::PhaseChanged { from, to, reason });
    }

    /// Send a unit and its attachments to its owner's discard
    pub(crate) fn destroy_unit(
        &mut self,
        id: CardId,
        events: &mut Vec<GameEvent>,
    ) -> Option<PlayerId> {
        let owner = self.field_unit_owner(id)?;
        let unit = self.player_mut(owner).field.remove(id)?;
        let name = unit.card;
        self.player_mut(owner).discard.extend(unit.into_cards());
        self.logger.normal(&format!("{}'s {} dies", owner, name));
        events.push(GameEvent::UnitDied { owner, unit: id });
        Some(owner)
    }
}

/// Decide a double exhaustion: life, then field value, else a draw
pub fn tiebreak(p1: &Player, p2: &Player) -> MatchOutcome {
    let key = |p: &Player| (p.life, p.field_value());
    let (a, b) = (key(p1), key(p2));
    if a == b {
        MatchOutcome::Draw
    } else {
        let player = if a > b { p1.id } else { p2.id };
        MatchOutcome::Winner {
            player,
            reason: WinReason::Tiebreaker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};
    use crate::game::{SeatSetup, DEFAULT_HAND_SIZE};

    #[test]
    fn test_match_creation() {
        let game = Match::new(MatchConfig::default().with_seed(7)).unwrap();

        assert_eq!(game.phase(), Phase::InitSelect);
        assert_eq!(game.turn.turn_number, 1);
        assert_eq!(game.players[0].hand.len(), DEFAULT_HAND_SIZE);
        assert_eq!(game.players[1].hand.len(), DEFAULT_HAND_SIZE);
        assert_eq!(game.deck.len(), 52 - 2 * DEFAULT_HAND_SIZE);
        assert_eq!(game.deciding_player(), Some(PlayerId::ONE));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = Match::new(MatchConfig::default().with_seed(99)).unwrap();
        let b = Match::new(MatchConfig::default().with_seed(99)).unwrap();
        assert_eq!(a.players[0].hand, b.players[0].hand);
        assert_eq!(a.deck, b.deck);
    }

    #[test]
    fn test_per_player_decks() {
        let config = MatchConfig::default().with_mode(MatchMode::PerPlayerDecks);
        let game = Match::new(config).unwrap();
        assert_eq!(game.draw_source, DrawSource::PerPlayer);
        assert!(game.deck.is_empty());
        assert_eq!(game.players[0].library.len(), 52 - DEFAULT_HAND_SIZE);
        assert_eq!(game.cards_left(PlayerId::TWO), 52 - DEFAULT_HAND_SIZE);
    }

    #[test]
    fn test_scenario_rejects_face_card_on_field() {
        let mut setup = ScenarioSetup::default();
        setup.seats[0] = SeatSetup {
            field: vec![CardSpec::new(Suit::Hearts, Rank::King)],
            ..SeatSetup::default()
        };
        let config = MatchConfig::default().with_mode(MatchMode::Scenario(setup));
        assert!(matches!(Match::new(config), Err(DuelError::InvalidScenario(_))));
    }

    #[test]
    fn test_tiebreak_order() {
        let mut p1 = Player::new(PlayerId::ONE, "A", 12);
        let p2 = Player::new(PlayerId::TWO, "B", 12);
        assert_eq!(tiebreak(&p1, &p2), MatchOutcome::Draw);

        p1.life = 13;
        assert_eq!(tiebreak(&p1, &p2).winner(), Some(PlayerId::ONE));

        p1.life = 11;
        assert_eq!(tiebreak(&p1, &p2).winner(), Some(PlayerId::TWO));
    }

    #[test]
    fn test_single_exhaustion_does_not_end_match() {
        let config = MatchConfig::default().with_mode(MatchMode::PerPlayerDecks);
        let mut game = Match::new(config).unwrap();
        game.players[0].library.clear();
        let mut events = Vec::new();

        assert_eq!(game.draw_cards(PlayerId::ONE, 1, &mut events), 0);
        assert_eq!(game.players[0].draw_failures, 1);
        assert!(!game.is_over());

        assert_eq!(game.draw_cards(PlayerId::TWO, 1, &mut events), 1);
        assert_eq!(game.players[1].draw_failures, 0);
        assert!(!game.is_over());
        assert_eq!(game.logger.logs_in("warning").count(), 1);
    }
}
