use super::grid::Grid;
use super::types::{Direction, Position, Tile, TileId};

/// Largest tile a `u32` cell can hold. Tiles of this value no longer merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Whether two neighbouring values combine into one tile.
pub fn merges_with(a: u32, b: u32) -> bool {
    a == b && a < MAX_TILE_VALUE
}

/// Two tiles combined during a move. The survivor keeps its id and doubles;
/// the consumed tile leaves the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MergeEvent {
    pub survivor: TileId,
    pub consumed: TileId,
    pub value: u32,
    pub row: usize,
    pub col: usize,
}

/// A tile that changed cell during a move. Consumed tiles also get a slide,
/// ending on the merge cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileSlide {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
}

#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub grid: Grid,
    pub score_delta: u32,
    pub moved: bool,
    pub merges: Vec<MergeEvent>,
    pub slides: Vec<TileSlide>,
}

/// Slides and merges every line of `grid` towards `direction`. Pure: the input grid is untouched.
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveOutcome {
    let size = grid.size();
    let mut next = Grid::new(size);
    let mut score_delta: u32 = 0;
    let mut merges = Vec::new();
    let mut slides = Vec::new();

    for lane in 0..size {
        let cells = line_positions(size, direction, lane);
        let tiles: Vec<Tile> = cells
            .iter()
            .filter_map(|p| grid.get(p.row, p.col).copied())
            .collect();

        let mut target = 0;
        let mut i = 0;
        while i < tiles.len() {
            let dest = cells[target];
            let tile = tiles[i];

            if i + 1 < tiles.len() && merges_with(tile.value, tiles[i + 1].value) {
                let consumed = tiles[i + 1];
                let value = tile.value * 2;
                score_delta = score_delta.saturating_add(value);
                merges.push(MergeEvent {
                    survivor: tile.id,
                    consumed: consumed.id,
                    value,
                    row: dest.row,
                    col: dest.col,
                });
                record_slide(&mut slides, &tile, dest);
                record_slide(&mut slides, &consumed, dest);
                next.place(value, dest.row, dest.col, tile.id);
                i += 2;
            } else {
                record_slide(&mut slides, &tile, dest);
                next.place(tile.value, dest.row, dest.col, tile.id);
                i += 1;
            }

            target += 1;
        }
    }

    let moved = next != *grid;

    MoveOutcome {
        grid: next,
        score_delta,
        moved,
        merges,
        slides,
    }
}

/// Whether `direction` would change `grid`, without building the outcome grid.
pub fn would_move(grid: &Grid, direction: Direction) -> bool {
    let size = grid.size();
    (0..size).any(|lane| {
        let values: Vec<u32> = line_positions(size, direction, lane)
            .iter()
            .map(|p| grid.value_at(p.row, p.col))
            .collect();
        let (merged, _) = slide_line(&values);
        merged != values
    })
}

/// The 1-D rule over plain values (0 = empty), leading end first.
/// Returns the compacted line padded with zeros and the score it earns.
pub fn slide_line(line: &[u32]) -> (Vec<u32>, u32) {
    let mut result: Vec<u32> = Vec::with_capacity(line.len());
    let mut score: u32 = 0;

    let non_zero: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut i = 0;
    while i < non_zero.len() {
        if i + 1 < non_zero.len() && merges_with(non_zero[i], non_zero[i + 1]) {
            let merged = non_zero[i] * 2;
            result.push(merged);
            score = score.saturating_add(merged);
            i += 2;
        } else {
            result.push(non_zero[i]);
            i += 1;
        }
    }

    result.resize(line.len(), 0);
    (result, score)
}

/// Cells of one line ordered from the leading edge (the side tiles move towards).
fn line_positions(size: usize, direction: Direction, lane: usize) -> Vec<Position> {
    (0..size)
        .map(|k| match direction {
            Direction::Left => Position::new(lane, k),
            Direction::Right => Position::new(lane, size - 1 - k),
            Direction::Up => Position::new(k, lane),
            Direction::Down => Position::new(size - 1 - k, lane),
        })
        .collect()
}

fn record_slide(slides: &mut Vec<TileSlide>, tile: &Tile, dest: Position) {
    if tile.position() != dest {
        slides.push(TileSlide {
            id: tile.id,
            from: tile.position(),
            to: dest,
        });
    }
}
