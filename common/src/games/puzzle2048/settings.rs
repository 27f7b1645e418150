use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 8;
pub const MAX_UNDO_CAPACITY: usize = 10;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub struct Puzzle2048Settings {
    pub size: usize,
    pub target_value: u32,
    pub undo_capacity: usize,
}

impl Validate for Puzzle2048Settings {
    fn validate(&self) -> Result<(), String> {
        if self.size < MIN_SIZE || self.size > MAX_SIZE {
            return Err(format!(
                "Board size must be between {} and {}, got {}",
                MIN_SIZE, MAX_SIZE, self.size
            ));
        }
        if self.target_value < 8 {
            return Err(format!(
                "Target value must be at least 8, got {}",
                self.target_value
            ));
        }
        if !self.target_value.is_power_of_two() {
            return Err(format!(
                "Target value must be a power of 2, got {}",
                self.target_value
            ));
        }
        if self.undo_capacity == 0 || self.undo_capacity > MAX_UNDO_CAPACITY {
            return Err(format!(
                "Undo capacity must be between 1 and {}, got {}",
                MAX_UNDO_CAPACITY, self.undo_capacity
            ));
        }
        Ok(())
    }
}

impl Default for Puzzle2048Settings {
    fn default() -> Self {
        Self {
            size: 4,
            target_value: 2048,
            undo_capacity: 5,
        }
    }
}
