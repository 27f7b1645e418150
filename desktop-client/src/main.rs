mod config;
mod input;
mod session;
mod ui;

use std::time::Duration;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::games::puzzle2048::StateStore;
use common::logger::init_logger;
use common::version::VERSION;
use eframe::egui;

use config::{CONFIG_FILE, get_config_manager};
use session::LocalSession;
use ui::Puzzle2048App;

#[derive(Parser, Debug)]
#[command(name = "puzzle2048_client")]
#[command(version = VERSION)]
#[command(about = "2048 sliding-tile puzzle")]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Board size, overrides the config file
    #[arg(long)]
    size: Option<usize>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Prefix every log line with the client name
    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logger(args.use_log_prefix.then(|| "Puzzle2048".to_string()));

    let config_exists = std::path::Path::new(&args.config).exists();
    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;
    if !config_exists {
        config_manager.set_config(&config)?;
        common::log!("Wrote default config to {}", args.config);
    }

    if let Some(size) = args.size {
        config.game.size = size;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let session = LocalSession::start(
        config.game,
        StateStore::from_yaml_file(&config.state_file),
        rng,
        Duration::from_millis(config.ui.animation_ms),
    );

    let ui_config = config.ui;
    let side = config.game.size as f32 * (ui_config.tile_size + 6.0) + 6.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side.max(360.0) + 40.0, side + 300.0])
            .with_title(format!("2048 - v{}", VERSION)),
        ..Default::default()
    };

    eframe::run_native(
        "Puzzle 2048",
        options,
        Box::new(move |_cc| Ok(Box::new(Puzzle2048App::new(session, ui_config)))),
    )?;

    Ok(())
}
