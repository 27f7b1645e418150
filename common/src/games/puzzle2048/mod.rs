mod achievements;
mod end_state;
mod game_state;
mod grid;
mod hint;
mod history;
mod input;
mod move_engine;
mod settings;
mod spawner;
mod store;
mod types;
mod view;

pub use achievements::{Achievement, Achievements};
pub use end_state::{can_move, has_won};
pub use game_state::{Puzzle2048GameState, TurnRejection, TurnReport};
pub use grid::Grid;
pub use hint::{Hint, suggest_move};
pub use history::{HistoryEntry, UndoHistory};
pub use input::{DEFAULT_SWIPE_THRESHOLD, classify_swipe};
pub use move_engine::{
    MAX_TILE_VALUE, MergeEvent, MoveOutcome, TileSlide, apply_move, slide_line, would_move,
};
pub use settings::{MAX_SIZE, MAX_UNDO_CAPACITY, MIN_SIZE, Puzzle2048Settings};
pub use spawner::{FOUR_SPAWN_ONE_IN, add_random_tile};
pub use store::{GameSnapshot, PersistedState, StateStore, Statistics, StoreError};
pub use types::{Direction, GameStatus, Position, Tile, TileId, TileIdGenerator, TurnPhase};
pub use view::{TileView, diff_grids};
