#![warn(clippy::all, clippy::pedantic)]

pub mod board_tests;
pub mod highscore_tests;
pub mod score_tests;

// Shared test utilities
#[cfg(test)]
pub mod test_utils {
    use crate::Time;
    use crate::components::{Board, GameEvents, GameState, Input};
    use crate::game::BOARD_HALF_EXTENT;
    use bevy_ecs::prelude::*;
    use std::sync::{Mutex, PoisonError};

    // Tests that touch the QUADFALL_HIGH_SCORE / QUADFALL_CONFIG env vars
    // must hold the matching lock, since the test harness runs in parallel.
    pub static HIGH_SCORE_ENV_LOCK: Mutex<()> = Mutex::new(());
    pub static CONFIG_ENV_LOCK: Mutex<()> = Mutex::new(());

    pub fn lock_env(lock: &'static Mutex<()>) -> std::sync::MutexGuard<'static, ()> {
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a world with the standard game resources and an empty board.
    /// Tests place their own tiles and pieces.
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();

        world.insert_resource(Board::new(BOARD_HALF_EXTENT));
        world.insert_resource(GameState::default());
        world.insert_resource(Input::default());
        world.insert_resource(GameEvents::default());
        world.insert_resource(Time::new());

        world
    }
}
