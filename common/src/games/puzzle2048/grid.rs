use super::types::{Position, Tile, TileId, TileIdGenerator};

/// Square board of optional tiles, stored row-major. A tile sits in the cell
/// matching its own `row`/`col`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a grid from row-major values where 0 is an empty cell.
    pub fn from_values(
        size: usize,
        values: &[u32],
        ids: &mut TileIdGenerator,
    ) -> Result<Self, String> {
        if values.len() != size * size {
            return Err(format!(
                "Expected {} cells for a {}x{} grid, got {}",
                size * size,
                size,
                size,
                values.len()
            ));
        }
        let mut grid = Self::new(size);
        for (index, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            if value < 2 || !value.is_power_of_two() {
                return Err(format!("Tile value must be a power of 2, got {}", value));
            }
            grid.place(value, index / size, index % size, ids.next_id());
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.index(row, col)].as_ref()
    }

    pub fn value_at(&self, row: usize, col: usize) -> u32 {
        self.get(row, col).map(|t| t.value).unwrap_or(0)
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Puts a tile with the given identity at `(row, col)`, replacing whatever was there.
    pub fn place(&mut self, value: u32, row: usize, col: usize, id: TileId) -> Tile {
        let tile = Tile { id, value, row, col };
        let index = self.index(row, col);
        self.cells[index] = Some(tile);
        tile
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Position::new(index / self.size, index % self.size))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles().find(|t| t.id == id)
    }

    /// Row-major values, 0 for empty cells.
    pub fn values(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.map(|t| t.value).unwrap_or(0))
            .collect()
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.values()
            .chunks(self.size.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn highest_tile(&self) -> u32 {
        self.tiles().map(|t| t.value).max().unwrap_or(0)
    }

    pub fn total_value(&self) -> u64 {
        self.tiles().map(|t| t.value as u64).sum()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }
}
