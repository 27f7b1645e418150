use std::collections::HashMap;

use super::grid::Grid;
use super::types::{Position, Tile, TileId};

/// Presentation flags for one tile, derived from two consecutive grids.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileView {
    pub tile: Tile,
    pub is_new: bool,
    pub is_merged: bool,
    pub moved_from: Option<Position>,
}

pub fn diff_grids(previous: &Grid, current: &Grid) -> Vec<TileView> {
    let before: HashMap<TileId, &Tile> = previous.tiles().map(|t| (t.id, t)).collect();

    current
        .tiles()
        .map(|tile| match before.get(&tile.id) {
            None => TileView {
                tile: *tile,
                is_new: true,
                is_merged: false,
                moved_from: None,
            },
            Some(old) => TileView {
                tile: *tile,
                is_new: false,
                is_merged: tile.value > old.value,
                moved_from: (old.position() != tile.position()).then(|| old.position()),
            },
        })
        .collect()
}
