use super::grid::Grid;
use super::move_engine::apply_move;
use super::types::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Hint {
    pub direction: Direction,
    pub score_delta: u32,
    pub empty_cells: usize,
}

/// One-ply greedy suggestion: the moving direction with the largest score gain,
/// then the most empty cells afterwards. Ties keep `Direction::ALL` order.
pub fn suggest_move(grid: &Grid) -> Option<Hint> {
    let mut best: Option<Hint> = None;

    for direction in Direction::ALL {
        let outcome = apply_move(grid, direction);
        if !outcome.moved {
            continue;
        }

        let candidate = Hint {
            direction,
            score_delta: outcome.score_delta,
            empty_cells: outcome.grid.empty_count(),
        };

        let better = match best {
            None => true,
            Some(current) => {
                (candidate.score_delta, candidate.empty_cells)
                    > (current.score_delta, current.empty_cells)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::puzzle2048::types::TileIdGenerator;

    fn grid_from(size: usize, values: &[u32]) -> Grid {
        Grid::from_values(size, values, &mut TileIdGenerator::new()).unwrap()
    }

    #[test]
    fn test_prefers_biggest_merge() {
        #[rustfmt::skip]
        let grid = grid_from(4, &[
            2, 2, 0, 0,
            0, 0, 0, 0,
            8, 0, 0, 0,
            8, 0, 0, 0,
        ]);
        let hint = suggest_move(&grid).unwrap();
        assert_eq!(hint.score_delta, 16);
        assert_eq!(hint.direction, Direction::Up);
    }

    #[test]
    fn test_no_hint_when_stuck() {
        let grid = grid_from(2, &[2, 4, 4, 2]);
        assert!(suggest_move(&grid).is_none());
    }

    #[test]
    fn test_tie_breaks_on_direction_order() {
        let grid = grid_from(2, &[0, 0, 0, 2]);
        assert_eq!(suggest_move(&grid).unwrap().direction, Direction::Up);
    }

    #[test]
    fn test_hint_skips_directions_that_do_not_move() {
        let grid = grid_from(2, &[2, 0, 0, 0]);
        let hint = suggest_move(&grid).unwrap();
        assert_eq!(hint.direction, Direction::Right);
    }
}
