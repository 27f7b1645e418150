use super::grid::Grid;
use super::move_engine::merges_with;

/// True once any tile has reached `target_value`.
pub fn has_won(grid: &Grid, target_value: u32) -> bool {
    grid.tiles().any(|t| t.value >= target_value)
}

/// True iff some direction would change the grid: an empty cell exists, or two
/// orthogonally adjacent tiles can merge.
pub fn can_move(grid: &Grid) -> bool {
    if grid.empty_count() > 0 {
        return true;
    }

    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            let value = grid.value_at(row, col);
            if col + 1 < size && merges_with(value, grid.value_at(row, col + 1)) {
                return true;
            }
            if row + 1 < size && merges_with(value, grid.value_at(row + 1, col)) {
                return true;
            }
        }
    }

    false
}
