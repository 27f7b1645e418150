use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct UiConfig {
    /// How long an accepted move blocks further input while it animates.
    pub animation_ms: u64,
    pub swipe_threshold: f32,
    pub tile_size: f32,
}

impl Validate for UiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.animation_ms > 1000 {
            return Err(format!(
                "animation_ms must not exceed 1000, got {}",
                self.animation_ms
            ));
        }
        if !(5.0..=200.0).contains(&self.swipe_threshold) {
            return Err(format!(
                "swipe_threshold must be between 5 and 200, got {}",
                self.swipe_threshold
            ));
        }
        if !(40.0..=200.0).contains(&self.tile_size) {
            return Err(format!(
                "tile_size must be between 40 and 200, got {}",
                self.tile_size
            ));
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_ms: 120,
            swipe_threshold: common::games::puzzle2048::DEFAULT_SWIPE_THRESHOLD,
            tile_size: 96.0,
        }
    }
}
