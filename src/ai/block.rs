//! Block planner
//!
//! Attackers are handled from highest value to lowest. For each one the
//! planner tries, in order: a blocker that kills and survives, an even
//! trade, an Ace trade, a multi-block found by subset-sum search, and
//! finally a chump block. Aces are held back from cheap attackers unless
//! the incoming damage is lethal.

use crate::ai::{snapshot_row, UnitSnapshot};
use crate::core::CardId;
use crate::game::MatchView;

/// Attackers at least this valuable are worth an Ace
pub const ACE_TRADE_MIN_VALUE: u8 = 4;

/// Everything the block planner reads, detached from the match
#[derive(Debug, Clone)]
pub struct BlockBoard {
    pub life: i32,
    pub multi_blocking: bool,
    /// Declared attackers, declaration order
    pub attackers: Vec<UnitSnapshot>,
    /// Untapped defending units
    pub blockers: Vec<UnitSnapshot>,
}

impl BlockBoard {
    pub fn from_view(view: &MatchView) -> Self {
        BlockBoard {
            life: view.life(),
            multi_blocking: view.multi_blocking(),
            attackers: view
                .declared_attackers()
                .iter()
                .filter_map(|id| view.unit(*id))
                .map(UnitSnapshot::from)
                .collect(),
            blockers: snapshot_row(view.my_field().iter().filter(|u| !u.tapped)),
        }
    }

    pub fn incoming_damage(&self) -> u32 {
        self.attackers.iter().map(|a| a.value as u32).sum()
    }

    pub fn facing_lethal(&self) -> bool {
        self.incoming_damage() as i64 >= self.life as i64
    }

    /// Attackers worth chumping: the bar drops with life
    fn chump_threshold(&self) -> i32 {
        (self.life / 2).max(1)
    }
}

/// Smallest-sum subset of at least two values reaching `target`
///
/// Returns indices into `values`. Sums are searched exactly, so the first
/// reachable sum at or above the target is the cheapest commitment.
pub fn min_covering_subset(values: &[u8], target: u8) -> Option<Vec<usize>> {
    let total: usize = values.iter().map(|v| *v as usize).sum();
    let target = target as usize;
    if total < target || values.len() < 2 {
        return None;
    }

    // best[sum][k]: a subset with that sum and min(len, 2) == k
    let mut best: Vec<[Option<Vec<usize>>; 3]> = vec![[None, None, None]; total + 1];
    best[0][0] = Some(Vec::new());
    for (i, value) in values.iter().enumerate() {
        let value = *value as usize;
        if value == 0 {
            continue;
        }
        for sum in (value..=total).rev() {
            for k in (0..3).rev() {
                let Some(prev) = best[sum - value][k].clone() else {
                    continue;
                };
                let next = (k + 1).min(2);
                if best[sum][next].is_none() {
                    let mut subset = prev;
                    subset.push(i);
                    best[sum][next] = Some(subset);
                }
            }
        }
    }

    (target..=total).find_map(|sum| best[sum][2].clone())
}

/// Choose blocker/attacker pairs against a detached board
pub fn plan_blocks_on(board: &BlockBoard) -> Vec<(CardId, CardId)> {
    let lethal = board.facing_lethal();
    let mut order = board.attackers.clone();
    order.sort_by(|a, b| b.value.cmp(&a.value));

    let mut free = board.blockers.clone();
    let mut plan = Vec::new();

    for attacker in &order {
        let lane: Vec<UnitSnapshot> = free
            .iter()
            .filter(|b| b.spectrum == attacker.spectrum)
            .copied()
            .collect();
        if lane.is_empty() {
            continue;
        }
        let cheapest = |pick: &dyn Fn(&UnitSnapshot) -> bool| {
            lane.iter()
                .filter(|b| pick(b))
                .min_by_key(|b| (b.value, b.id))
                .copied()
        };

        let single = cheapest(&|b: &UnitSnapshot| b.beats(attacker))
            .or_else(|| cheapest(&|b: &UnitSnapshot| {
                b.trades_with(attacker) && b.value == attacker.value
            }))
            .or_else(|| {
                cheapest(&|b: &UnitSnapshot| {
                    b.is_ace
                        && !attacker.is_ace
                        && (attacker.value >= ACE_TRADE_MIN_VALUE || lethal)
                })
            });

        let chosen: Vec<UnitSnapshot> = if let Some(blocker) = single {
            vec![blocker]
        } else if let Some(group) = multi_block(board, attacker, &lane, lethal) {
            group
        } else if lethal || attacker.value as i32 >= board.chump_threshold() {
            // Aces only chump when the alternative is losing
            cheapest(&|b: &UnitSnapshot| lethal || !b.is_ace)
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };

        for blocker in chosen {
            free.retain(|b| b.id != blocker.id);
            plan.push((blocker.id, attacker.id));
        }
    }
    plan
}

fn multi_block(
    board: &BlockBoard,
    attacker: &UnitSnapshot,
    lane: &[UnitSnapshot],
    lethal: bool,
) -> Option<Vec<UnitSnapshot>> {
    if !board.multi_blocking || attacker.is_ace {
        return None;
    }
    let pool: Vec<UnitSnapshot> = lane.iter().filter(|b| !b.is_ace).copied().collect();
    let values: Vec<u8> = pool.iter().map(|b| b.value).collect();
    let picked = min_covering_subset(&values, attacker.value)?;
    let committed: u32 = picked.iter().map(|i| values[*i] as u32).sum();
    if committed <= attacker.value as u32 || lethal {
        Some(picked.into_iter().map(|i| pool[i]).collect())
    } else {
        None
    }
}

pub fn plan_blocks(view: &MatchView) -> Vec<(CardId, CardId)> {
    plan_blocks_on(&BlockBoard::from_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support::unit;
    use crate::core::Spectrum::{Magical, Physical};

    fn board(attackers: Vec<UnitSnapshot>, blockers: Vec<UnitSnapshot>) -> BlockBoard {
        BlockBoard {
            life: 20,
            multi_blocking: false,
            attackers,
            blockers,
        }
    }

    #[test]
    fn test_subset_sum_exact_cover() {
        let picked = min_covering_subset(&[5, 4, 3, 2], 9).unwrap();
        let sum: u8 = picked.iter().map(|i| [5, 4, 3, 2][*i]).sum();
        assert_eq!(sum, 9);
        assert!(picked.len() >= 2);
    }

    #[test]
    fn test_subset_sum_needs_two() {
        assert_eq!(min_covering_subset(&[9], 5), None);
        assert_eq!(min_covering_subset(&[2, 2], 5), None);
        let picked = min_covering_subset(&[9, 1], 5).unwrap();
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_kill_and_survive_preferred() {
        let b = board(
            vec![unit(1, 6, Physical)],
            vec![unit(10, 9, Physical), unit(11, 7, Physical), unit(12, 6, Physical)],
        );
        assert_eq!(plan_blocks_on(&b), vec![(CardId::new(11), CardId::new(1))]);
    }

    #[test]
    fn test_even_trade_then_ace() {
        let b = board(
            vec![unit(1, 5, Physical), unit(2, 8, Magical)],
            vec![unit(10, 5, Physical), unit(11, 1, Magical)],
        );
        let plan = plan_blocks_on(&b);
        assert!(plan.contains(&(CardId::new(11), CardId::new(2))));
        assert!(plan.contains(&(CardId::new(10), CardId::new(1))));
    }

    #[test]
    fn test_multi_block_exact() {
        let mut b = board(
            vec![unit(1, 9, Physical)],
            vec![unit(10, 5, Physical), unit(11, 4, Physical), unit(12, 2, Physical)],
        );
        b.multi_blocking = true;
        let mut plan = plan_blocks_on(&b);
        plan.sort();
        assert_eq!(
            plan,
            vec![(CardId::new(10), CardId::new(1)), (CardId::new(11), CardId::new(1))]
        );
    }

    #[test]
    fn test_no_chump_when_healthy() {
        let b = board(vec![unit(1, 6, Physical)], vec![unit(10, 2, Physical)]);
        assert!(plan_blocks_on(&b).is_empty());

        let mut low = b.clone();
        low.life = 10;
        assert_eq!(plan_blocks_on(&low), vec![(CardId::new(10), CardId::new(1))]);
    }

    #[test]
    fn test_chump_keeps_ace_for_bigger_attackers() {
        let mut b = board(vec![unit(1, 3, Physical)], vec![unit(10, 1, Physical)]);
        b.life = 4;
        assert!(plan_blocks_on(&b).is_empty());

        // A non-Ace soldier still chumps
        b.blockers.push(unit(11, 2, Physical));
        assert_eq!(plan_blocks_on(&b), vec![(CardId::new(11), CardId::new(1))]);

        // Facing lethal, the Ace is committed
        let mut lethal = board(vec![unit(1, 3, Physical)], vec![unit(10, 1, Physical)]);
        lethal.life = 3;
        assert_eq!(plan_blocks_on(&lethal), vec![(CardId::new(10), CardId::new(1))]);
    }

    #[test]
    fn test_block_everything_when_lethal() {
        let mut b = board(
            vec![unit(1, 9, Physical), unit(2, 2, Magical)],
            vec![unit(10, 2, Physical), unit(11, 1, Magical)],
        );
        b.life = 11;
        assert_eq!(plan_blocks_on(&b).len(), 2);
    }
}
