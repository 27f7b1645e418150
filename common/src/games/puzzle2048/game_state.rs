use std::fmt;

use super::achievements::{Achievement, Achievements};
use super::end_state::{can_move, has_won};
use super::grid::Grid;
use super::hint::{Hint, suggest_move};
use super::history::{HistoryEntry, UndoHistory};
use super::move_engine::{MoveOutcome, apply_move};
use super::settings::Puzzle2048Settings;
use super::spawner::add_random_tile;
use super::store::{GameSnapshot, PersistedState};
use super::types::{Direction, GameStatus, Tile, TileIdGenerator, TurnPhase};
use crate::config::Validate;
use crate::games::SessionRng;

/// Why an input was dropped. Rejected input is never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejection {
    MoveInProgress,
    GameOver,
    NothingToUndo,
}

impl fmt::Display for TurnRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRejection::MoveInProgress => write!(f, "Previous move has not settled yet"),
            TurnRejection::GameOver => write!(f, "No moves left, start a new game"),
            TurnRejection::NothingToUndo => write!(f, "Nothing to undo"),
        }
    }
}

impl std::error::Error for TurnRejection {}

/// Result of one accepted input. Enough for a renderer to animate without
/// asking the session again.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub direction: Direction,
    pub outcome: MoveOutcome,
    pub spawned: Option<Tile>,
    pub score: u32,
    /// Set only on the move that first reaches the target value.
    pub won_now: bool,
    pub lost: bool,
    pub unlocked: Vec<Achievement>,
}

impl TurnReport {
    pub fn moved(&self) -> bool {
        self.outcome.moved
    }
}

pub struct Puzzle2048GameState {
    settings: Puzzle2048Settings,
    grid: Grid,
    ids: TileIdGenerator,
    score: u32,
    best_score: u32,
    moves_made: u32,
    won: bool,
    lost: bool,
    phase: TurnPhase,
    history: UndoHistory,
    achievements: Achievements,
}

impl Puzzle2048GameState {
    pub fn new(settings: Puzzle2048Settings, rng: &mut SessionRng) -> Self {
        let mut state = Self {
            settings,
            grid: Grid::new(settings.size),
            ids: TileIdGenerator::new(),
            score: 0,
            best_score: 0,
            moves_made: 0,
            won: false,
            lost: false,
            phase: TurnPhase::Idle,
            history: UndoHistory::new(settings.undo_capacity),
            achievements: Achievements::new(),
        };
        state.seed_tiles(rng);
        state
    }

    /// Continues saved progress. A missing, invalid or finished snapshot starts a
    /// fresh game; best score and achievements carry over either way.
    pub fn resume(
        settings: Puzzle2048Settings,
        persisted: &PersistedState,
        rng: &mut SessionRng,
    ) -> Self {
        let mut state = match persisted.snapshot.as_ref() {
            Some(snapshot) => match Self::from_snapshot(settings, snapshot) {
                Ok(state) => state,
                Err(e) => {
                    crate::warn!("Discarding saved game: {}", e);
                    Self::new(settings, rng)
                }
            },
            None => Self::new(settings, rng),
        };
        state.best_score = state.best_score.max(persisted.best_score);
        state.achievements = persisted.achievements.clone();
        state
    }

    pub fn from_snapshot(
        settings: Puzzle2048Settings,
        snapshot: &GameSnapshot,
    ) -> Result<Self, String> {
        snapshot.validate()?;
        if snapshot.size != settings.size {
            return Err(format!(
                "Saved board is {}x{}, configured board is {}x{}",
                snapshot.size, snapshot.size, settings.size, settings.size
            ));
        }

        let mut ids = TileIdGenerator::new();
        let grid = Grid::from_values(snapshot.size, &snapshot.cells, &mut ids)?;
        if !can_move(&grid) {
            return Err("Saved game has no moves left".to_string());
        }

        Ok(Self {
            settings,
            won: snapshot.won || has_won(&grid, settings.target_value),
            grid,
            ids,
            score: snapshot.score,
            best_score: snapshot.score,
            moves_made: snapshot.moves_made,
            lost: false,
            phase: TurnPhase::Idle,
            history: UndoHistory::new(settings.undo_capacity),
            achievements: Achievements::new(),
        })
    }

    /// Clears the board and score. Best score and achievements are kept; tile ids keep counting.
    pub fn new_game(&mut self, rng: &mut SessionRng) {
        self.grid = Grid::new(self.settings.size);
        self.score = 0;
        self.moves_made = 0;
        self.won = false;
        self.lost = false;
        self.phase = TurnPhase::Idle;
        self.history.clear();
        self.seed_tiles(rng);
    }

    /// Applies a move, spawns, and evaluates win/loss. A move that changes
    /// nothing has no side effects. An accepted move leaves the session in
    /// `MoveInProgress` until `settle` is called.
    pub fn apply_move(
        &mut self,
        direction: Direction,
        rng: &mut SessionRng,
    ) -> Result<TurnReport, TurnRejection> {
        if self.lost {
            return Err(TurnRejection::GameOver);
        }
        if self.phase == TurnPhase::MoveInProgress {
            return Err(TurnRejection::MoveInProgress);
        }

        let outcome = apply_move(&self.grid, direction);
        if !outcome.moved {
            return Ok(TurnReport {
                direction,
                outcome,
                spawned: None,
                score: self.score,
                won_now: false,
                lost: false,
                unlocked: Vec::new(),
            });
        }

        self.phase = TurnPhase::MoveInProgress;
        self.history.push(HistoryEntry {
            grid: self.grid.clone(),
            score: self.score,
            moves_made: self.moves_made,
        });

        self.grid = outcome.grid.clone();
        self.score = self.score.saturating_add(outcome.score_delta);
        self.best_score = self.best_score.max(self.score);
        self.moves_made = self.moves_made.saturating_add(1);

        let spawned = add_random_tile(&mut self.grid, rng, &mut self.ids);

        let won_now = !self.won && has_won(&self.grid, self.settings.target_value);
        self.won |= won_now;
        self.lost = !can_move(&self.grid);

        let unlocked =
            self.achievements
                .evaluate(&self.grid, self.score, !outcome.merges.is_empty());

        Ok(TurnReport {
            direction,
            outcome,
            spawned,
            score: self.score,
            won_now,
            lost: self.lost,
            unlocked,
        })
    }

    /// Signals that the presentation finished showing the last move.
    pub fn settle(&mut self) {
        self.phase = TurnPhase::Idle;
    }

    /// `apply_move` followed by `settle`, for callers without animation.
    pub fn play(
        &mut self,
        direction: Direction,
        rng: &mut SessionRng,
    ) -> Result<TurnReport, TurnRejection> {
        let report = self.apply_move(direction, rng)?;
        self.settle();
        Ok(report)
    }

    /// Steps back one accepted move. The best score is not lowered.
    pub fn undo(&mut self) -> Result<(), TurnRejection> {
        if self.lost {
            return Err(TurnRejection::GameOver);
        }
        if self.phase == TurnPhase::MoveInProgress {
            return Err(TurnRejection::MoveInProgress);
        }

        let entry = self.history.pop().ok_or(TurnRejection::NothingToUndo)?;
        self.grid = entry.grid;
        self.score = entry.score;
        self.moves_made = entry.moves_made;
        Ok(())
    }

    pub fn hint(&self) -> Option<Hint> {
        if self.lost {
            return None;
        }
        suggest_move(&self.grid)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.grid.size(),
            cells: self.grid.values(),
            score: self.score,
            moves_made: self.moves_made,
            won: self.won,
        }
    }

    /// Copies progress into `persisted`. A lost game leaves no snapshot behind.
    pub fn persist_into(&self, persisted: &mut PersistedState) {
        persisted.best_score = persisted.best_score.max(self.best_score);
        persisted.snapshot = if self.lost { None } else { Some(self.snapshot()) };
        persisted.achievements = self.achievements.clone();
    }

    pub fn status(&self) -> GameStatus {
        if self.lost {
            GameStatus::Lost
        } else if self.won {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Puzzle2048Settings {
        &self.settings
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn highest_tile(&self) -> u32 {
        self.grid.highest_tile()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn can_move(&self) -> bool {
        can_move(&self.grid)
    }

    pub fn can_undo(&self) -> bool {
        !self.lost && self.phase == TurnPhase::Idle && !self.history.is_empty()
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    fn seed_tiles(&mut self, rng: &mut SessionRng) {
        for _ in 0..2 {
            add_random_tile(&mut self.grid, rng, &mut self.ids);
        }
    }

    #[cfg(test)]
    fn set_cells(&mut self, cells: &[u32]) {
        self.grid = Grid::from_values(self.settings.size, cells, &mut self.ids).unwrap();
        self.lost = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state(size: usize) -> (Puzzle2048GameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let settings = Puzzle2048Settings {
            size,
            ..Puzzle2048Settings::default()
        };
        let state = Puzzle2048GameState::new(settings, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_new_has_two_tiles() {
        let (state, _) = create_state(4);
        assert_eq!(state.grid().tile_count(), 2);
        assert!(state.grid().tiles().all(|t| t.value == 2 || t.value == 4));
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_five_by_five_board() {
        let (state, _) = create_state(5);
        assert_eq!(state.grid().size(), 5);
        assert_eq!(state.grid().tile_count(), 2);
    }

    #[test]
    fn test_accepted_move_scores_and_spawns() {
        let (mut state, mut rng) = create_state(4);
        #[rustfmt::skip]
        state.set_cells(&[
            2, 2, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]);

        let report = state.apply_move(Direction::Left, &mut rng).unwrap();
        assert!(report.moved());
        assert_eq!(report.outcome.score_delta, 4);
        assert_eq!(state.score(), 4);
        assert_eq!(state.best_score(), 4);
        assert_eq!(state.moves_made(), 1);
        assert_eq!(state.grid().value_at(0, 0), 4);
        // One merged tile plus one spawned tile.
        assert_eq!(state.grid().tile_count(), 2);
        assert!(report.spawned.is_some());
        assert_eq!(report.unlocked, vec![Achievement::FirstMerge]);
    }

    #[test]
    fn test_unchanged_move_has_no_side_effects() {
        let (mut state, mut rng) = create_state(4);
        state.set_cells(&[2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let before = state.grid().clone();

        let report = state.apply_move(Direction::Left, &mut rng).unwrap();
        assert!(!report.moved());
        assert!(report.spawned.is_none());
        assert_eq!(state.grid(), &before);
        assert_eq!(state.moves_made(), 0);
        assert_eq!(state.phase(), TurnPhase::Idle);
        assert!(!state.can_undo());
    }

    #[test]
    fn test_input_during_move_is_dropped() {
        let (mut state, mut rng) = create_state(4);
        state.set_cells(&[2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        state.apply_move(Direction::Left, &mut rng).unwrap();
        assert_eq!(state.phase(), TurnPhase::MoveInProgress);
        let grid_after_first = state.grid().clone();

        let second = state.apply_move(Direction::Right, &mut rng);
        assert_eq!(second.unwrap_err(), TurnRejection::MoveInProgress);
        assert_eq!(state.grid(), &grid_after_first);
        assert_eq!(state.undo(), Err(TurnRejection::MoveInProgress));

        state.settle();
        assert_eq!(state.phase(), TurnPhase::Idle);
        assert!(state.apply_move(Direction::Right, &mut rng).is_ok());
    }

    #[test]
    fn test_win_is_reported_once() {
        let (mut state, mut rng) = create_state(4);
        state.set_cells(&[1024, 1024, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let report = state.play(Direction::Left, &mut rng).unwrap();
        assert!(report.won_now);
        assert_eq!(state.status(), GameStatus::Won);

        state.set_cells(&[2048, 2048, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let report = state.play(Direction::Left, &mut rng).unwrap();
        assert!(report.moved());
        assert!(!report.won_now);
        assert_eq!(state.highest_tile(), 4096);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_lost_is_absorbing() {
        let (mut state, mut rng) = create_state(2);
        // After sliding left the only empty cell is (1, 1); neither a 2 nor a 4 there can pair up.
        state.set_cells(&[8, 16, 0, 32]);

        let report = state.apply_move(Direction::Left, &mut rng).unwrap();
        assert!(report.lost);
        assert_eq!(state.status(), GameStatus::Lost);
        assert!(!state.can_move());

        state.settle();
        assert!(!state.can_undo());
        for direction in Direction::ALL {
            assert_eq!(
                state.apply_move(direction, &mut rng).unwrap_err(),
                TurnRejection::GameOver
            );
        }
        assert_eq!(state.undo(), Err(TurnRejection::GameOver));
        assert!(state.hint().is_none());

        state.new_game(&mut rng);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.grid().tile_count(), 2);
    }

    #[test]
    fn test_stuck_board_lost_iff_no_direction_moves() {
        let (mut state, mut rng) = create_state(4);
        for _ in 0..300 {
            if state.is_lost() {
                break;
            }
            let direction = Direction::ALL[rng.random_range(0..4)];
            let _ = state.play(direction, &mut rng);
            let any_moves = Direction::ALL
                .iter()
                .any(|&d| apply_move(state.grid(), d).moved);
            assert_eq!(state.is_lost(), !any_moves);
        }
    }

    #[test]
    fn test_undo_restores_previous_board_and_score() {
        let (mut state, mut rng) = create_state(4);
        state.set_cells(&[2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let before = state.grid().clone();

        state.play(Direction::Left, &mut rng).unwrap();
        assert!(state.can_undo());
        state.undo().unwrap();

        assert_eq!(state.grid(), &before);
        assert_eq!(state.score(), 0);
        assert_eq!(state.moves_made(), 0);
        assert_eq!(state.best_score(), 4);
        assert_eq!(state.undo(), Err(TurnRejection::NothingToUndo));
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let (mut state, mut rng) = create_state(4);
        let capacity = state.settings().undo_capacity;
        let mut accepted = 0;
        for direction in Direction::ALL.iter().cycle().take(40) {
            if let Ok(report) = state.play(*direction, &mut rng)
                && report.moved()
            {
                accepted += 1;
            }
        }
        assert!(accepted > capacity);

        let mut undone = 0;
        while state.undo().is_ok() {
            undone += 1;
        }
        assert_eq!(undone, capacity);
    }

    #[test]
    fn test_new_game_keeps_best_score() {
        let (mut state, mut rng) = create_state(4);
        state.set_cells(&[8, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        state.play(Direction::Left, &mut rng).unwrap();
        assert_eq!(state.best_score(), 16);

        state.new_game(&mut rng);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 16);
        assert_eq!(state.moves_made(), 0);
        assert!(!state.can_undo());
    }

    #[test]
    fn test_same_seed_same_game() {
        let (mut a, mut rng_a) = create_state(4);
        let (mut b, mut rng_b) = create_state(4);
        for direction in Direction::ALL.iter().cycle().take(30) {
            let _ = a.play(*direction, &mut rng_a);
            let _ = b.play(*direction, &mut rng_b);
        }
        assert_eq!(a.grid().values(), b.grid().values());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_snapshot_resume() {
        let (mut state, mut rng) = create_state(4);
        for direction in Direction::ALL.iter().cycle().take(8) {
            let _ = state.play(*direction, &mut rng);
        }

        let mut persisted = PersistedState::default();
        state.persist_into(&mut persisted);
        let resumed = Puzzle2048GameState::resume(*state.settings(), &persisted, &mut rng);

        assert_eq!(resumed.grid().values(), state.grid().values());
        assert_eq!(resumed.score(), state.score());
        assert_eq!(resumed.moves_made(), state.moves_made());
        assert_eq!(resumed.best_score(), state.best_score());
        assert!(!resumed.can_undo());
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh_game() {
        let mut rng = SessionRng::new(42);
        let persisted = PersistedState {
            best_score: 900,
            snapshot: Some(GameSnapshot {
                size: 4,
                cells: vec![3; 16],
                score: 50,
                moves_made: 2,
                won: false,
            }),
            ..PersistedState::default()
        };

        let state = Puzzle2048GameState::resume(Puzzle2048Settings::default(), &persisted, &mut rng);
        assert_eq!(state.score(), 0);
        assert_eq!(state.grid().tile_count(), 2);
        assert_eq!(state.best_score(), 900);
    }

    #[test]
    fn test_resumed_extreme_values_do_not_overflow() {
        let mut rng = SessionRng::new(42);
        let max = crate::games::puzzle2048::move_engine::MAX_TILE_VALUE;
        let mut cells = vec![0; 16];
        cells[0] = max;
        cells[1] = max;
        cells[2] = 2;
        cells[3] = 2;
        let persisted = PersistedState {
            snapshot: Some(GameSnapshot {
                size: 4,
                cells,
                score: u32::MAX - 1,
                moves_made: u32::MAX,
                won: true,
            }),
            ..PersistedState::default()
        };

        let mut state =
            Puzzle2048GameState::resume(Puzzle2048Settings::default(), &persisted, &mut rng);

        let report = state.play(Direction::Left, &mut rng).unwrap();
        assert!(report.moved());
        assert_eq!(state.grid().rows()[0][..3], [max, max, 4]);
        assert_eq!(state.score(), u32::MAX);
        assert_eq!(state.best_score(), u32::MAX);
        assert_eq!(state.moves_made(), u32::MAX);
    }

    #[test]
    fn test_mismatched_size_snapshot_is_rejected() {
        let snapshot = GameSnapshot {
            size: 5,
            cells: vec![0; 25],
            score: 0,
            moves_made: 0,
            won: false,
        };
        assert!(
            Puzzle2048GameState::from_snapshot(Puzzle2048Settings::default(), &snapshot).is_err()
        );
    }

    #[test]
    fn test_lost_game_is_not_persisted() {
        let (mut state, mut rng) = create_state(2);
        state.set_cells(&[4, 8, 16, 16]);
        state.play(Direction::Left, &mut rng).unwrap();
        assert!(state.is_lost());

        let mut persisted = PersistedState {
            snapshot: Some(state.snapshot()),
            ..PersistedState::default()
        };
        state.persist_into(&mut persisted);
        assert!(persisted.snapshot.is_none());
        assert_eq!(persisted.best_score, 32);
    }

    #[test]
    fn test_hint_matches_a_moving_direction() {
        let (state, _) = create_state(4);
        let hint = state.hint().unwrap();
        assert!(apply_move(state.grid(), hint.direction).moved);
    }
}
