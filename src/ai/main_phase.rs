//! Main-phase planner
//!
//! Plays are chosen one at a time against the current snapshot, in priority
//! order: a worthwhile King, a high-scoring Queen, any Jack, then soldiers.

use crate::ai::{snapshot_row, UnitSnapshot};
use crate::core::{Card, CardId, CardKind, PlayerId, Spectrum};
use crate::game::{Intent, MatchView};

/// Minimum Queen swing worth spending a card on
pub const QUEEN_SCORE_BAR: i32 = 30;

/// Life at or below which a King settles for smaller targets
pub const KING_DESPERATION_LIFE: i32 = 10;

pub fn plan_main_action(view: &MatchView) -> Option<Intent> {
    let available = view.untapped_resources();
    let affordable: Vec<&Card> = view
        .hand()
        .iter()
        .filter(|card| card.cost() <= available)
        .collect();
    if affordable.is_empty() {
        return None;
    }

    plan_king(view, &affordable)
        .or_else(|| plan_queen(view, &affordable))
        .or_else(|| plan_jack(&affordable))
        .or_else(|| plan_soldier(view, &affordable, available))
}

/// A King on the biggest same-spectrum enemy unit, if it clears the bar
fn plan_king(view: &MatchView, affordable: &[&Card]) -> Option<Intent> {
    let bar = if view.life() <= KING_DESPERATION_LIFE { 5 } else { 7 };
    affordable
        .iter()
        .filter(|card| card.kind() == CardKind::King)
        .filter_map(|king| {
            view.opponent_field()
                .iter()
                .filter(|unit| unit.effective_spectrum() == king.spectrum())
                .filter(|unit| unit.combat_value() >= bar)
                .max_by_key(|unit| (unit.combat_value(), std::cmp::Reverse(unit.id())))
                .map(|unit| (king, unit.id(), unit.combat_value()))
        })
        .max_by_key(|(_, _, value)| *value)
        .map(|(king, target, _)| Intent::PlayCard {
            card: king.id,
            target: Some(target),
            target_owner: Some(view.opponent_id()),
        })
}

/// Units on `side` that the other side has no same-spectrum answer for
fn open_lane_value(side: &[UnitSnapshot], other: &[UnitSnapshot]) -> i32 {
    side.iter()
        .filter(|unit| !other.iter().any(|o| o.spectrum == unit.spectrum))
        .map(|unit| unit.value as i32)
        .sum()
}

/// Board score from my side: my unanswerable attackers are good, enemy
/// units I cannot answer are bad
fn lane_score(mine: &[UnitSnapshot], theirs: &[UnitSnapshot]) -> i32 {
    (open_lane_value(mine, theirs) - open_lane_value(theirs, mine)) * 5
}

/// Swing in lane score from recoloring one unit
pub fn queen_swing(
    mine: &[UnitSnapshot],
    theirs: &[UnitSnapshot],
    target: CardId,
    spectrum: Spectrum,
) -> i32 {
    let recolor = |units: &[UnitSnapshot]| -> Vec<UnitSnapshot> {
        units
            .iter()
            .map(|u| {
                let mut u = *u;
                if u.id == target {
                    u.spectrum = spectrum;
                }
                u
            })
            .collect()
    };
    let before = lane_score(mine, theirs);
    let after = lane_score(&recolor(mine), &recolor(theirs));
    after - before
}

fn plan_queen(view: &MatchView, affordable: &[&Card]) -> Option<Intent> {
    let mine = snapshot_row(view.my_field().iter());
    let theirs = snapshot_row(view.opponent_field().iter());

    let mut best: Option<(i32, Intent)> = None;
    for queen in affordable.iter().filter(|card| card.kind() == CardKind::Queen) {
        let candidates = mine
            .iter()
            .map(|u| (u, view.player_id()))
            .chain(theirs.iter().map(|u| (u, view.opponent_id())));
        for (unit, owner) in candidates {
            if unit.spectrum == queen.spectrum() {
                continue;
            }
            let swing = queen_swing(&mine, &theirs, unit.id, queen.spectrum());
            if swing > QUEEN_SCORE_BAR && best.as_ref().map_or(true, |(score, _)| swing > *score) {
                best = Some((swing, queen_intent(queen, unit.id, owner)));
            }
        }
    }
    best.map(|(_, intent)| intent)
}

fn queen_intent(queen: &Card, target: CardId, owner: PlayerId) -> Intent {
    Intent::PlayCard {
        card: queen.id,
        target: Some(target),
        target_owner: Some(owner),
    }
}

fn plan_jack(affordable: &[&Card]) -> Option<Intent> {
    affordable
        .iter()
        .find(|card| card.kind() == CardKind::Jack)
        .map(|jack| Intent::play(jack.id))
}

/// Soldiers the seat could pay for all together, cheapest first
pub fn go_wide_set<'a>(soldiers: &[&'a Card], available: u8) -> Vec<&'a Card> {
    let mut by_cost: Vec<&Card> = soldiers.to_vec();
    by_cost.sort_by_key(|card| (card.cost(), card.id));
    let mut budget = available;
    let mut picked = Vec::new();
    for card in by_cost {
        if card.cost() <= budget {
            budget -= card.cost();
            picked.push(card);
        }
    }
    picked
}

/// Single biggest soldier, or the cheapest of a wide spread when the spread
/// is worth at least as much
fn plan_soldier(view: &MatchView, affordable: &[&Card], available: u8) -> Option<Intent> {
    let soldiers: Vec<&Card> = affordable
        .iter()
        .copied()
        .filter(|card| card.kind() == CardKind::Soldier)
        .collect();
    let single = soldiers
        .iter()
        .max_by_key(|card| (card.combat_value(), std::cmp::Reverse(card.id)))?;

    let wide = go_wide_set(&soldiers, available);
    let behind = view.opponent_field().len().saturating_sub(view.my_field().len()) as u32;
    let wide_score: u32 = wide.iter().map(|c| c.combat_value() as u32).sum::<u32>() + 2 * behind;

    if wide.len() >= 2 && wide_score >= single.combat_value() as u32 {
        wide.first().map(|card| Intent::play(card.id))
    } else {
        Some(Intent::play(single.id))
    }
}
