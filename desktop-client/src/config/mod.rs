mod main_config;
mod ui_config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use main_config::{CONFIG_FILE, get_config_manager};
pub use ui_config::UiConfig;
