#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;

use crate::Time;
use crate::components::{ActivePiece, Board, GameEvents, GameState, Input, Position, TetrominoType};
use crate::config::CONFIG;
use crate::highscore;
use crate::menu::MenuRenderer;
use crate::menu_types::Menu;
use crate::systems::spawn_random_piece;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let (half_extent, step_delay_start) = {
            let config = CONFIG.read().unwrap();
            (
                config.game.board_half_extent,
                config.game.step_delay_start,
            )
        };

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(GameEvents::default());

        let mut board = Board::new(half_extent);
        board.seed_center(TetrominoType::O);
        world.insert_resource(board);

        world.insert_resource(GameState {
            step_delay: step_delay_start,
            high_score: highscore::load_high_score(),
            ..GameState::default()
        });

        let mut app = Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(),
        };

        spawn_random_piece(&mut app.world);

        app
    }

    #[must_use]
    pub fn board_half_extent(&self) -> i32 {
        self.world.resource::<Board>().half_extent
    }

    /// Cells to draw. The active piece rests in the occupancy grid between
    /// mutations, so the board alone covers both locked and falling cells.
    #[must_use]
    pub fn get_render_blocks(&self) -> Vec<(Position, TetrominoType)> {
        self.world.resource::<Board>().occupied_cells().collect()
    }

    /// Resets the session: fresh board and score, preserved high score, a
    /// freshly spawned piece.
    pub fn reset(&mut self) {
        let step_delay_start = CONFIG.read().unwrap().game.step_delay_start;

        {
            let mut game_state = self.world.resource_mut::<GameState>();
            game_state.reset();
            game_state.step_delay = step_delay_start;
        }
        {
            let mut board = self.world.resource_mut::<Board>();
            board.reset();
            board.seed_center(TetrominoType::O);
        }
        self.world.insert_resource(Input::default());
        self.world.insert_resource(GameEvents::default());

        let leftover: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<ActivePiece>>()
            .iter(&self.world)
            .collect();
        for entity in leftover {
            self.world.despawn(entity);
        }

        spawn_random_piece(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
