// Offset tables for the mailbox generator, as (dx, dy).

pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_RAYS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_RAYS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tables_have_no_duplicates() {
        let knight: HashSet<_> = KNIGHT_JUMPS.iter().collect();
        let king: HashSet<_> = KING_STEPS.iter().collect();
        assert_eq!(knight.len(), 8);
        assert_eq!(king.len(), 8);
        assert!(!king.contains(&(0, 0)));
    }

    #[test]
    fn rays_are_unit_steps() {
        for (dx, dy) in ROOK_RAYS {
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
        for (dx, dy) in BISHOP_RAYS {
            assert_eq!((dx.abs(), dy.abs()), (1, 1));
        }
    }
}
