//! End-game results.

use serde::{Deserialize, Serialize};

use crate::board::{PlayerState, Quadrant};

/// One line of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub player: Quadrant,
    pub cash: u32,
    pub reached_portal: bool,
    pub reached_portal_first: bool,
}

/// The sorted results table and the winner, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResults {
    /// Players who reached the portal come first; within each group, higher
    /// cash ranks higher and the first finisher wins ties.
    pub rows: Vec<ResultRow>,
    pub winner: Option<Quadrant>,
}

impl GameResults {
    /// Rows for players who made it through a portal.
    pub fn survivors(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|r| r.reached_portal)
    }

    /// Rows for players still on the board when the game ended.
    pub fn casualties(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|r| !r.reached_portal)
    }
}

/// Builds the results table from the final player records.
///
/// The winner is the richest survivor; nobody wins if no one reached a
/// portal.
pub fn compute_results(players: &[PlayerState]) -> GameResults {
    let mut rows: Vec<ResultRow> = players
        .iter()
        .map(|p| ResultRow {
            player: p.quadrant,
            cash: p.cash,
            reached_portal: p.reached_portal,
            reached_portal_first: p.reached_portal_first,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.reached_portal
            .cmp(&a.reached_portal)
            .then(b.cash.cmp(&a.cash))
            .then(b.reached_portal_first.cmp(&a.reached_portal_first))
            .then(a.player.index().cmp(&b.player.index()))
    });

    let winner = rows.first().filter(|r| r.reached_portal).map(|r| r.player);
    GameResults { rows, winner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, ALL_QUADRANTS};

    fn players(cash: [u32; 4], portal: [bool; 4], first: Option<usize>) -> Vec<PlayerState> {
        ALL_QUADRANTS
            .iter()
            .map(|&q| {
                let mut p = PlayerState::new(q, Cell::new(0), false);
                p.cash = cash[q.index()];
                p.reached_portal = portal[q.index()];
                p.reached_portal_first = first == Some(q.index());
                p
            })
            .collect()
    }

    #[test]
    fn survivors_rank_above_richer_casualties() {
        let results = compute_results(&players([3, 50, 7, 0], [true, false, true, false], Some(0)));
        let order: Vec<Quadrant> = results.rows.iter().map(|r| r.player).collect();
        assert_eq!(
            order,
            vec![Quadrant::Fire, Quadrant::Water, Quadrant::Earth, Quadrant::Air]
        );
        assert_eq!(results.winner, Some(Quadrant::Fire));
        assert_eq!(results.survivors().count(), 2);
        assert_eq!(results.casualties().count(), 2);
    }

    #[test]
    fn cash_tie_goes_to_first_finisher() {
        let results = compute_results(&players([9, 9, 9, 1], [true, true, true, false], Some(2)));
        assert_eq!(results.winner, Some(Quadrant::Fire));
        assert_eq!(results.rows[1].player, Quadrant::Water);
        assert_eq!(results.rows[2].player, Quadrant::Earth);
    }

    #[test]
    fn no_survivors_no_winner() {
        let results = compute_results(&players([1, 2, 3, 4], [false; 4], None));
        assert_eq!(results.winner, None);
        assert_eq!(results.rows[0].player, Quadrant::Air);
    }
}
