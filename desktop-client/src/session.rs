use std::time::{Duration, Instant};

use common::config::ConfigContentProvider;
use common::games::SessionRng;
use common::games::puzzle2048::{
    Direction, Grid, Hint, PersistedState, Puzzle2048GameState, Puzzle2048Settings, StateStore,
    TileView, TurnPhase, TurnRejection, diff_grids,
};
use ringbuffer::{AllocRingBuffer, RingBuffer};

const EVENT_LOG_CAPACITY: usize = 6;

/// Offline session: the game, its persisted record and the settle timer.
pub struct LocalSession<P: ConfigContentProvider> {
    game: Puzzle2048GameState,
    rng: SessionRng,
    store: StateStore<P>,
    persisted: PersistedState,
    animation: Duration,
    move_started: Option<Instant>,
    previous_grid: Grid,
    event_log: AllocRingBuffer<String>,
    hint: Option<Hint>,
}

impl<P: ConfigContentProvider> LocalSession<P> {
    pub fn start(
        settings: Puzzle2048Settings,
        store: StateStore<P>,
        mut rng: SessionRng,
        animation: Duration,
    ) -> Self {
        let mut persisted = store.load();
        let game = Puzzle2048GameState::resume(settings, &persisted, &mut rng);

        let resumed = persisted
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.cells == game.grid().values());
        if !resumed {
            persisted.statistics.record_game_started();
        }

        let mut session = Self {
            previous_grid: game.grid().clone(),
            game,
            rng,
            store,
            persisted,
            animation,
            move_started: None,
            event_log: AllocRingBuffer::new(EVENT_LOG_CAPACITY),
            hint: None,
        };
        session.push_event(if resumed {
            "Resumed saved game".to_string()
        } else {
            "New game".to_string()
        });
        common::log!(
            "Session started (seed {}, resumed: {})",
            session.rng.seed(),
            resumed
        );
        session
    }

    /// Feeds one direction to the game. Input arriving while the previous move
    /// is still animating is dropped.
    pub fn handle_direction(&mut self, direction: Direction, now: Instant) {
        let before = self.game.grid().clone();
        match self.game.apply_move(direction, &mut self.rng) {
            Ok(report) if report.moved() => {
                self.previous_grid = before;
                self.move_started = Some(now);
                self.hint = None;
                self.persisted.statistics.record_turn(&report);

                if report.won_now {
                    self.push_event(format!(
                        "Reached {}!",
                        self.game.settings().target_value
                    ));
                }
                for achievement in &report.unlocked {
                    self.push_event(format!("Achievement: {}", achievement.title()));
                }
                if report.lost {
                    self.push_event(format!("Game over with {} points", report.score));
                }
                if self.animation.is_zero() {
                    self.tick(now);
                }
            }
            Ok(_) => {}
            Err(TurnRejection::MoveInProgress) => {}
            Err(rejection) => self.push_event(rejection.to_string()),
        }
    }

    /// Settles the running move once its animation time is over.
    pub fn tick(&mut self, now: Instant) {
        let Some(started) = self.move_started else {
            return;
        };
        if now.duration_since(started) < self.animation {
            return;
        }
        self.move_started = None;
        self.game.settle();
        self.save();
    }

    /// 0.0 right after a move, 1.0 once settled.
    pub fn animation_progress(&self, now: Instant) -> f32 {
        match self.move_started {
            Some(started) if !self.animation.is_zero() => {
                (now.duration_since(started).as_secs_f32() / self.animation.as_secs_f32())
                    .min(1.0)
            }
            _ => 1.0,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.game.phase() == TurnPhase::MoveInProgress
    }

    pub fn new_game(&mut self) {
        self.move_started = None;
        self.game.new_game(&mut self.rng);
        self.previous_grid = self.game.grid().clone();
        self.hint = None;
        self.persisted.statistics.record_game_started();
        self.push_event("New game".to_string());
        self.save();
    }

    pub fn undo(&mut self) {
        match self.game.undo() {
            Ok(()) => {
                self.previous_grid = self.game.grid().clone();
                self.hint = None;
                self.push_event("Undid last move".to_string());
                self.save();
            }
            Err(rejection) => self.push_event(rejection.to_string()),
        }
    }

    pub fn request_hint(&mut self) {
        self.hint = self.game.hint();
        match self.hint {
            Some(hint) => self.push_event(format!(
                "Hint: {} (+{}, {} free)",
                hint.direction, hint.score_delta, hint.empty_cells
            )),
            None => self.push_event("No move available".to_string()),
        }
    }

    pub fn save(&mut self) {
        self.game.persist_into(&mut self.persisted);
        if let Err(e) = self.store.save(&self.persisted) {
            common::warn!("{}", e);
        }
    }

    pub fn tile_views(&self) -> Vec<TileView> {
        diff_grids(&self.previous_grid, self.game.grid())
    }

    pub fn game(&self) -> &Puzzle2048GameState {
        &self.game
    }

    pub fn persisted(&self) -> &PersistedState {
        &self.persisted
    }

    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    pub fn events(&self) -> impl Iterator<Item = &String> {
        self.event_log.iter()
    }

    fn push_event(&mut self, event: String) {
        common::log!("{}", event);
        self.event_log.enqueue(event);
    }
}
