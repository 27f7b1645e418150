use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Achievement {
    FirstMerge,
    Tile512,
    Tile1024,
    Tile2048,
    Tile4096,
    Score10000,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstMerge,
        Achievement::Tile512,
        Achievement::Tile1024,
        Achievement::Tile2048,
        Achievement::Tile4096,
        Achievement::Score10000,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstMerge => "First merge",
            Achievement::Tile512 => "Reached 512",
            Achievement::Tile1024 => "Reached 1024",
            Achievement::Tile2048 => "Reached 2048",
            Achievement::Tile4096 => "Reached 4096",
            Achievement::Score10000 => "Scored 10000 points",
        }
    }

    fn is_reached(self, grid: &Grid, score: u32, merged: bool) -> bool {
        match self {
            Achievement::FirstMerge => merged,
            Achievement::Tile512 => grid.highest_tile() >= 512,
            Achievement::Tile1024 => grid.highest_tile() >= 1024,
            Achievement::Tile2048 => grid.highest_tile() >= 2048,
            Achievement::Tile4096 => grid.highest_tile() >= 4096,
            Achievement::Score10000 => score >= 10_000,
        }
    }
}

/// Unlock flags kept across games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    unlocked: BTreeMap<Achievement, bool>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.get(&achievement).copied().unwrap_or(false)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.unlocked
            .iter()
            .filter(|(_, unlocked)| **unlocked)
            .map(|(achievement, _)| *achievement)
    }

    /// Marks every newly reached achievement and returns only those.
    pub fn evaluate(&mut self, grid: &Grid, score: u32, merged: bool) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();
        for achievement in Achievement::ALL {
            if !self.is_unlocked(achievement) && achievement.is_reached(grid, score, merged) {
                self.unlocked.insert(achievement, true);
                newly_unlocked.push(achievement);
            }
        }
        newly_unlocked
    }
}
