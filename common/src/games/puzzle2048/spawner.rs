use super::grid::Grid;
use super::types::{Tile, TileIdGenerator};
use crate::games::SessionRng;

/// One spawn in this many is a 4, the rest are 2s.
pub const FOUR_SPAWN_ONE_IN: u32 = 10;

/// Places a 2 or a 4 into a uniformly chosen empty cell. A full grid is not an
/// error: nothing is placed and `None` comes back.
pub fn add_random_tile(
    grid: &mut Grid,
    rng: &mut SessionRng,
    ids: &mut TileIdGenerator,
) -> Option<Tile> {
    let empty = grid.empty_cells();
    let position = empty[rng.pick_index(empty.len())?];
    let value = if rng.one_in(FOUR_SPAWN_ONE_IN) { 4 } else { 2 };
    Some(grid.place(value, position.row, position.col, ids.next_id()))
}
