//! Random AI controller for testing and baseline gameplay
//!
//! Makes random choices among legal options. Seeded so self-play runs are
//! reproducible.

use crate::core::{CardId, PlayerId, RESOURCE_CAP};
use crate::game::controller::{MatchView, PlayerController};
use crate::game::{Intent, ResourceDecision, INITIAL_RESOURCE_PICKS};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;

/// A controller that makes random legal choices
pub struct RandomController {
    player_id: PlayerId,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a random controller with a seeded RNG
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "RANDOM"
    }

    fn choose_initial_resources(&mut self, view: &MatchView) -> SmallVec<[CardId; 3]> {
        let mut ids: Vec<CardId> = view.hand().iter().map(|c| c.id).collect();
        ids.shuffle(&mut self.rng);
        ids.into_iter().take(INITIAL_RESOURCE_PICKS).collect()
    }

    fn choose_resource_action(&mut self, view: &MatchView) -> ResourceDecision {
        let Some(card) = view.hand().choose(&mut self.rng) else {
            return ResourceDecision::Skip;
        };
        let roll: f64 = self.rng.gen();
        if roll < 0.5 && view.resource_count() < RESOURCE_CAP {
            ResourceDecision::Add(card.id)
        } else if roll < 0.8 {
            match view.my_resources().units.choose(&mut self.rng) {
                Some(unit) => ResourceDecision::Swap {
                    hand_card: card.id,
                    resource_unit: unit.id(),
                },
                None => ResourceDecision::Skip,
            }
        } else {
            ResourceDecision::Skip
        }
    }

    fn choose_main_action(&mut self, view: &MatchView) -> Option<Intent> {
        if !self.rng.gen_bool(0.7) {
            return None;
        }
        let playable = view.playable_cards();
        let card_id = *playable.choose(&mut self.rng)?;
        let card = view.hand().iter().find(|c| c.id == card_id)?;
        let targets = view.legal_targets(card);
        let target = targets.choose(&mut self.rng).copied();
        Some(Intent::PlayCard {
            card: card_id,
            target,
            target_owner: None,
        })
    }

    fn choose_attackers(&mut self, view: &MatchView) -> Vec<CardId> {
        view.legal_attackers()
            .into_iter()
            .filter(|_| self.rng.gen_bool(0.5))
            .collect()
    }

    fn choose_blockers(&mut self, view: &MatchView) -> Vec<(CardId, CardId)> {
        let mut used: Vec<CardId> = Vec::new();
        let mut blocks = Vec::new();
        for attacker in view.declared_attackers() {
            if !self.rng.gen_bool(0.5) {
                continue;
            }
            let options: Vec<CardId> = view
                .legal_blockers(*attacker)
                .into_iter()
                .filter(|b| !used.contains(b))
                .collect();
            if let Some(blocker) = options.choose(&mut self.rng) {
                used.push(*blocker);
                blocks.push((*blocker, *attacker));
            }
        }
        blocks
    }
}
