use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::achievements::Achievements;
use super::game_state::TurnReport;
use super::settings::{MAX_SIZE, MIN_SIZE};
use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, MemoryContentProvider,
    Validate, YamlConfigSerializer,
};

/// Resumable game: row-major cell values with 0 for empty cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: usize,
    pub cells: Vec<u32>,
    pub score: u32,
    pub moves_made: u32,
    #[serde(default)]
    pub won: bool,
}

impl Validate for GameSnapshot {
    fn validate(&self) -> Result<(), String> {
        if self.size < MIN_SIZE || self.size > MAX_SIZE {
            return Err(format!("Unsupported board size {}", self.size));
        }
        if self.cells.len() != self.size * self.size {
            return Err(format!(
                "Expected {} cells, got {}",
                self.size * self.size,
                self.cells.len()
            ));
        }
        if let Some(bad) = self
            .cells
            .iter()
            .find(|&&v| v != 0 && (v < 2 || !v.is_power_of_two()))
        {
            return Err(format!("Cell value {} is not a power of 2", bad));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub games_played: u32,
    pub games_won: u32,
    pub highest_tile: u32,
    pub total_moves: u64,
}

impl Statistics {
    pub fn record_game_started(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    pub fn record_turn(&mut self, report: &TurnReport) {
        if !report.moved() {
            return;
        }
        self.total_moves = self.total_moves.saturating_add(1);
        if report.won_now {
            self.games_won = self.games_won.saturating_add(1);
        }
        let highest = report
            .outcome
            .grid
            .highest_tile()
            .max(report.spawned.map(|t| t.value).unwrap_or(0));
        self.highest_tile = self.highest_tile.max(highest);
    }
}

/// Everything kept between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub best_score: u32,
    pub snapshot: Option<GameSnapshot>,
    pub achievements: Achievements,
    pub statistics: Statistics,
}

#[derive(Debug)]
pub enum StoreError {
    Serialize(String),
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Serialize(e) => write!(f, "Failed to serialize saved state: {}", e),
            StoreError::Write(e) => write!(f, "Failed to write saved state: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Reads and writes `PersistedState`. Loading never fails: anything unreadable
/// is logged and treated as absent.
pub struct StateStore<TProvider, TSerializer = YamlConfigSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<PersistedState>,
{
    provider: TProvider,
    serializer: TSerializer,
}

impl StateStore<FileContentConfigProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl StateStore<MemoryContentProvider, YamlConfigSerializer> {
    pub fn in_memory() -> Self {
        Self::new(MemoryContentProvider::new(), YamlConfigSerializer::new())
    }
}

impl<TProvider, TSerializer> StateStore<TProvider, TSerializer>
where
    TProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<PersistedState>,
{
    pub fn new(provider: TProvider, serializer: TSerializer) -> Self {
        Self {
            provider,
            serializer,
        }
    }

    pub fn load(&self) -> PersistedState {
        let content = match self.provider.get_config_content() {
            Ok(Some(content)) => content,
            Ok(None) => return PersistedState::default(),
            Err(e) => {
                crate::warn!("Ignoring saved state: {}", e);
                return PersistedState::default();
            }
        };

        match self.serializer.deserialize(&content) {
            Ok(state) => state,
            Err(e) => {
                crate::warn!("Discarding unreadable saved state: {}", e);
                PersistedState::default()
            }
        }
    }

    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        let content = self
            .serializer
            .serialize(state)
            .map_err(StoreError::Serialize)?;
        self.provider
            .set_config_content(&content)
            .map_err(StoreError::Write)
    }
}
