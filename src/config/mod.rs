pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::game::{BOARD_HALF_EXTENT, STEP_DELAY_START};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Half the board span per axis; the playfield covers twice this in
    /// each direction, centered on the origin.
    #[serde(default = "default_board_half_extent")]
    pub board_half_extent: i32,
    /// Seconds between automatic gravity steps at level 1.
    #[serde(default = "default_step_delay_start")]
    pub step_delay_start: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_half_extent: default_board_half_extent(),
            step_delay_start: default_step_delay_start(),
        }
    }
}

fn default_board_half_extent() -> i32 {
    BOARD_HALF_EXTENT
}

fn default_step_delay_start() -> f32 {
    STEP_DELAY_START
}

impl Config {
    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config;
            true
        } else {
            false
        }
    }
}
