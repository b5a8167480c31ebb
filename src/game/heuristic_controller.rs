//! Heuristic AI controller
//!
//! A thin seat wrapper around the `ai` policies. All judgement lives there;
//! this type only remembers which seat it plays.

use crate::ai;
use crate::core::{CardId, PlayerId};
use crate::game::controller::{MatchView, PlayerController};
use crate::game::{Intent, ResourceDecision};
use smallvec::SmallVec;

pub struct HeuristicController {
    player_id: PlayerId,
}

impl HeuristicController {
    pub fn new(player_id: PlayerId) -> Self {
        HeuristicController { player_id }
    }
}

impl PlayerController for HeuristicController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "HEURISTIC"
    }

    fn choose_initial_resources(&mut self, view: &MatchView) -> SmallVec<[CardId; 3]> {
        ai::choose_initial_resources(view)
    }

    fn choose_resource_action(&mut self, view: &MatchView) -> ResourceDecision {
        ai::choose_resource_step(view)
    }

    fn choose_main_action(&mut self, view: &MatchView) -> Option<Intent> {
        ai::plan_main_action(view)
    }

    fn choose_attackers(&mut self, view: &MatchView) -> Vec<CardId> {
        ai::plan_attack(view)
    }

    fn choose_blockers(&mut self, view: &MatchView) -> Vec<(CardId, CardId)> {
        ai::plan_blocks(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Match, MatchConfig, Phase};

    #[test]
    fn test_opening_picks_are_legal() {
        let game = Match::new(MatchConfig::default().with_seed(11)).unwrap();
        let mut controller = HeuristicController::new(PlayerId::ONE);
        let view = MatchView::new(&game, PlayerId::ONE);
        let picks = controller.choose_initial_resources(&view);

        assert_eq!(picks.len(), 3);
        let result = game
            .apply(PlayerId::ONE, Intent::SelectInitialResources(picks))
            .unwrap();
        assert_eq!(result.state.phase(), Phase::InitSelect);
        assert_eq!(result.state.player(PlayerId::ONE).resources.len(), 3);
    }
}
