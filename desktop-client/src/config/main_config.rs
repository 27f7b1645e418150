use common::config::Validate;
use common::games::puzzle2048::Puzzle2048Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigManager, FileContentConfigProvider, UiConfig, YamlConfigSerializer};

pub const CONFIG_FILE: &str = "puzzle2048_client_config.yaml";

pub fn get_config_manager(
    path: impl AsRef<Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.as_ref())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: Puzzle2048Settings,
    pub ui: UiConfig,
    pub state_file: String,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.ui.validate()?;
        if self.state_file.is_empty() {
            return Err("state_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: Puzzle2048Settings::default(),
            ui: UiConfig::default(),
            state_file: "puzzle2048_state.yaml".to_string(),
        }
    }
}
