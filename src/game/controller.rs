//! Player controller trait and match view
//!
//! This module defines the interface between the rules engine and the seats
//! that play it (AI or human). The runner asks the deciding seat's
//! controller for a choice, and the controller inspects a read-only view of
//! the match to make it. Controllers never touch the match directly; their
//! choices become intents.

use crate::core::{BattlefieldUnit, Card, CardId, Player, PlayerId};
use crate::game::{Intent, Match, Phase, ResourceDecision};
use crate::zones::UnitRow;
use smallvec::SmallVec;

/// Read-only view of the match from one seat's perspective
#[derive(Clone, Copy)]
pub struct MatchView<'a> {
    game: &'a Match,
    player_id: PlayerId,
}

impl<'a> MatchView<'a> {
    /// Create a new view of the match from a player's perspective
    pub fn new(game: &'a Match, player_id: PlayerId) -> Self {
        MatchView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn opponent_id(&self) -> PlayerId {
        self.player_id.opponent()
    }

    fn me(&self) -> &'a Player {
        self.game.player(self.player_id)
    }

    // Hand and library stay private; only public state leaves the view
    fn opponent(&self) -> &'a Player {
        self.game.player(self.player_id.opponent())
    }

    /// Own hand, sorted by spectrum then rank
    pub fn hand(&self) -> &'a [Card] {
        &self.me().hand
    }

    pub fn my_field(&self) -> &'a UnitRow {
        &self.me().field
    }

    pub fn opponent_field(&self) -> &'a UnitRow {
        &self.opponent().field
    }

    pub fn my_resources(&self) -> &'a UnitRow {
        &self.me().resources
    }

    pub fn life(&self) -> i32 {
        self.me().life
    }

    pub fn opponent_life(&self) -> i32 {
        self.opponent().life
    }

    /// Resource row length, tapped or not
    pub fn resource_count(&self) -> usize {
        self.me().resources.len()
    }

    pub fn untapped_resources(&self) -> u8 {
        self.me().untapped_resources()
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    pub fn multi_blocking(&self) -> bool {
        self.game.config.multi_blocking
    }

    /// Attackers declared this turn, in declaration order
    pub fn declared_attackers(&self) -> &'a [CardId] {
        &self.game.combat.attackers
    }

    /// A unit on either field
    pub fn unit(&self, id: CardId) -> Option<&'a BattlefieldUnit> {
        self.game.field_unit(id)
    }

    pub fn legal_attackers(&self) -> Vec<CardId> {
        self.game.legal_attackers(self.player_id)
    }

    /// Own units able to block a declared attacker
    pub fn legal_blockers(&self, attacker: CardId) -> Vec<CardId> {
        self.game.legal_blockers(self.player_id, attacker)
    }

    pub fn playable_cards(&self) -> Vec<CardId> {
        self.game.playable_cards(self.player_id)
    }

    pub fn legal_targets(&self, card: &Card) -> Vec<CardId> {
        self.game.legal_targets(card)
    }
}

/// Trait for seats that make decisions during a match
///
/// Each method corresponds to one decision point of the turn. The runner
/// converts the answer into intents; an answer the rules reject is logged
/// and treated as a pass.
pub trait PlayerController {
    /// The seat this controller plays
    fn player_id(&self) -> PlayerId;

    /// Short tag used when logging this controller's choices
    fn name(&self) -> &str;

    /// Pick exactly three hand cards to seed the resource row
    fn choose_initial_resources(&mut self, view: &MatchView) -> SmallVec<[CardId; 3]>;

    /// Add, swap or skip during the resource step
    fn choose_resource_action(&mut self, view: &MatchView) -> ResourceDecision;

    /// Next card to play in the main phase, or `None` to move on
    ///
    /// Returned intents are `Intent::PlayCard`.
    fn choose_main_action(&mut self, view: &MatchView) -> Option<Intent>;

    /// Units to attack with; empty means no attack this turn
    fn choose_attackers(&mut self, view: &MatchView) -> Vec<CardId>;

    /// Blocker/attacker pairs for the declared attack
    fn choose_blockers(&mut self, view: &MatchView) -> Vec<(CardId, CardId)>;
}
