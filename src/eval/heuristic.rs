//! AI move selection.
//!
//! Picks one of the two destinations produced by move generation. The
//! policy is deterministic apart from the final coin flip, which draws from
//! the game PRNG so seeded games replay exactly.

use rand::Rng;

use crate::board::{Cell, DiamondField};
use crate::movegen::Destinations;

/// Chooses the AI's landing cell.
///
/// - Neither direction legal: None, the turn has no move.
/// - One direction legal: take it.
/// - Both legal: in deer mode, or while the player holds the cash lead,
///   head right toward the portal. Otherwise prefer a cell that holds a
///   token (right first), and flip a coin when both are empty.
pub fn choose_destination<R: Rng + ?Sized>(
    destinations: Destinations,
    deer_mode: bool,
    reach_portal_mode: bool,
    diamonds: &DiamondField,
    rng: &mut R,
) -> Option<Cell> {
    let (left, right) = match (destinations.left, destinations.right) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only),
        (Some(left), Some(right)) => (left, right),
    };

    if deer_mode || reach_portal_mode {
        return Some(right);
    }

    if !diamonds.is_field_empty(right) {
        return Some(right);
    }
    if !diamonds.is_field_empty(left) {
        return Some(left);
    }
    if rng.gen_bool(0.5) {
        Some(right)
    } else {
        Some(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardTopology;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn both(left: u8, right: u8) -> Destinations {
        Destinations {
            left: Some(Cell::new(left)),
            right: Some(Cell::new(right)),
        }
    }

    fn occupied_field() -> DiamondField {
        let topo = BoardTopology::standard();
        let mut rng = SmallRng::seed_from_u64(12);
        let mut field = DiamondField::new();
        field.reshuffle_all(&topo, &mut rng);
        field
    }

    fn occupied_and_empty(field: &DiamondField) -> (Cell, Cell) {
        let full = field.diamonds()[0].position.unwrap();
        // Start corners are never candidates, so always empty.
        (full, Cell::new(0))
    }

    #[test]
    fn no_destination_means_no_move() {
        let field = DiamondField::new();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            choose_destination(Destinations::NONE, false, false, &field, &mut rng),
            None
        );
    }

    #[test]
    fn single_destination_is_taken() {
        let field = DiamondField::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let only_left = Destinations {
            left: Some(Cell::new(5)),
            right: None,
        };
        let only_right = Destinations {
            left: None,
            right: Some(Cell::new(9)),
        };
        assert_eq!(
            choose_destination(only_left, true, true, &field, &mut rng),
            Some(Cell::new(5))
        );
        assert_eq!(
            choose_destination(only_right, false, false, &field, &mut rng),
            Some(Cell::new(9))
        );
    }

    #[test]
    fn deer_mode_and_lead_go_right() {
        let field = occupied_field();
        let (full, empty) = occupied_and_empty(&field);
        let mut rng = SmallRng::seed_from_u64(1);
        let d = Destinations {
            left: Some(full),
            right: Some(empty),
        };
        assert_eq!(choose_destination(d, true, false, &field, &mut rng), Some(empty));
        assert_eq!(choose_destination(d, false, true, &field, &mut rng), Some(empty));
    }

    #[test]
    fn prefers_occupied_cell() {
        let field = occupied_field();
        let (full, empty) = occupied_and_empty(&field);
        let mut rng = SmallRng::seed_from_u64(1);
        let left_full = Destinations {
            left: Some(full),
            right: Some(empty),
        };
        assert_eq!(
            choose_destination(left_full, false, false, &field, &mut rng),
            Some(full)
        );
        let right_full = Destinations {
            left: Some(empty),
            right: Some(full),
        };
        assert_eq!(
            choose_destination(right_full, false, false, &field, &mut rng),
            Some(full)
        );
    }

    #[test]
    fn both_occupied_goes_right() {
        let field = occupied_field();
        let a = field.diamonds()[0].position.unwrap();
        let b = field.diamonds()[1].position.unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let d = Destinations {
            left: Some(a),
            right: Some(b),
        };
        assert_eq!(choose_destination(d, false, false, &field, &mut rng), Some(b));
    }

    #[test]
    fn both_empty_flips_between_the_two() {
        let field = DiamondField::new();
        let mut rng = SmallRng::seed_from_u64(99);
        let d = both(1, 2);
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..64 {
            match choose_destination(d, false, false, &field, &mut rng) {
                Some(c) if c == Cell::new(1) => seen_left = true,
                Some(c) if c == Cell::new(2) => seen_right = true,
                other => panic!("unexpected choice {other:?}"),
            }
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn coin_flip_is_seed_deterministic() {
        let field = DiamondField::new();
        let picks = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..16)
                .map(|_| choose_destination(both(1, 2), false, false, &field, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
    }
}
