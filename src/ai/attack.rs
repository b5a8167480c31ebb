//! Attack planner
//!
//! Starts from every eligible attacker. A lethal alpha strike goes out
//! whole; otherwise hopeless attacks are dropped and a safety pass pulls
//! back attackers until the opponent's crackback is survivable.

use crate::ai::{snapshot_row, unblocked_damage, UnitSnapshot};
use crate::core::{CardId, Spectrum};
use crate::game::MatchView;

/// Trades are always tolerable for units at or below this value
pub const TRADE_TOLERANCE_VALUE: u8 = 8;

/// Life at or below which any trade is acceptable
pub const CRITICAL_LIFE: i32 = 5;

/// Everything the attack planner reads, detached from the match
#[derive(Debug, Clone)]
pub struct AttackBoard {
    pub my_life: i32,
    pub opponent_life: i32,
    /// Ready units that may attack
    pub attackers: Vec<UnitSnapshot>,
    /// My units that cannot attack this turn but will block next turn
    pub home_guard: Vec<UnitSnapshot>,
    /// Opponent units that can block now
    pub blockers: Vec<UnitSnapshot>,
    /// Every opponent unit; all of them may swing back next turn
    pub opponent_units: Vec<UnitSnapshot>,
}

impl AttackBoard {
    pub fn from_view(view: &MatchView) -> Self {
        let legal = view.legal_attackers();
        let mine = snapshot_row(view.my_field().iter());
        let (attackers, home_guard): (Vec<_>, Vec<_>) =
            mine.into_iter().partition(|u| legal.contains(&u.id));
        let opponent_units = snapshot_row(view.opponent_field().iter());
        AttackBoard {
            my_life: view.life(),
            opponent_life: view.opponent_life(),
            attackers,
            home_guard,
            blockers: opponent_units.iter().filter(|u| !u.tapped).copied().collect(),
            opponent_units,
        }
    }

    /// Damage left after the opponent blocks the biggest attackers it can
    pub fn alpha_strike_damage(&self) -> u32 {
        unblocked_damage(&self.attackers, &self.blockers)
    }

    /// Opponent's best swing next turn if `committed` are tapped
    pub fn crackback_damage(&self, committed: &[UnitSnapshot]) -> u32 {
        self.crackback_damage_in(&self.opponent_units, committed)
    }

    /// Spectra in which the crackback gets through
    fn threatened(&self, committed: &[UnitSnapshot]) -> Vec<Spectrum> {
        Spectrum::ALL
            .iter()
            .copied()
            .filter(|s| {
                let theirs: Vec<UnitSnapshot> = self
                    .opponent_units
                    .iter()
                    .filter(|u| u.spectrum == *s)
                    .copied()
                    .collect();
                self.crackback_damage_in(&theirs, committed) > 0
            })
            .collect()
    }

    fn crackback_damage_in(&self, theirs: &[UnitSnapshot], committed: &[UnitSnapshot]) -> u32 {
        let defenders: Vec<UnitSnapshot> = self
            .home_guard
            .iter()
            .chain(self.attackers.iter())
            .filter(|u| !committed.iter().any(|c| c.id == u.id))
            .copied()
            .collect();
        unblocked_damage(theirs, &defenders)
    }
}

/// Would this attacker walk into a loss, or a trade it should not take
fn is_bad_attack(attacker: &UnitSnapshot, board: &AttackBoard) -> bool {
    let same_lane = || board.blockers.iter().filter(|b| b.spectrum == attacker.spectrum);
    if same_lane().any(|b| b.beats(attacker)) {
        return true;
    }
    let trade_ok = attacker.value <= TRADE_TOLERANCE_VALUE || board.my_life <= CRITICAL_LIFE;
    !trade_ok && same_lane().any(|b| b.trades_with(attacker))
}

/// Choose attackers against a detached board
pub fn plan_attack_on(board: &AttackBoard) -> Vec<CardId> {
    if board.attackers.is_empty() {
        return Vec::new();
    }
    if board.alpha_strike_damage() as i64 >= board.opponent_life as i64 {
        return board.attackers.iter().map(|u| u.id).collect();
    }

    let mut committed: Vec<UnitSnapshot> = board
        .attackers
        .iter()
        .filter(|a| !is_bad_attack(a, board))
        .copied()
        .collect();

    let survivable = |committed: &[UnitSnapshot]| {
        (board.crackback_damage(committed) as i64) < board.my_life as i64
    };
    while !committed.is_empty() && !survivable(&committed) {
        let threatened = board.threatened(&committed);
        let withdraw = committed
            .iter()
            .enumerate()
            .min_by_key(|(_, u)| (!threatened.contains(&u.spectrum), u.value, u.id))
            .map(|(i, _)| i);
        match withdraw {
            Some(i) => {
                committed.remove(i);
            }
            None => break,
        }
    }

    committed.iter().map(|u| u.id).collect()
}

pub fn plan_attack(view: &MatchView) -> Vec<CardId> {
    plan_attack_on(&AttackBoard::from_view(view))
}
