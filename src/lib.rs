pub mod app;
pub mod components;
pub mod config;
pub mod game;
pub mod highscore;
pub mod menu;
pub mod menu_types;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::Instant;

/// Wall-clock delta source for the main loop.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    last_update: Instant,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
        }
    }

    /// Advances the clock and returns the elapsed seconds since the last
    /// call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);
        self.last_update = now;
        delta.as_secs_f32()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
