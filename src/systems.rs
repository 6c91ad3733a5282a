#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, error, info, trace};

use crate::components::{
    ActivePiece, Board, GameEvent, GameEvents, GameState, Input, Position, TetrominoType,
};
use crate::game::{CLEARS_PER_LEVEL, POINTS_PER_CLEAR, STEP_DELAY_DECREMENT};
use crate::highscore;

/// Spawns the next piece: uniform random shape, uniform random spawn edge,
/// and 0-3 extra clockwise rotations for a random starting orientation.
pub fn spawn_random_piece(world: &mut World) {
    let spawn_count = world.resource::<Board>().spawn_points.len();
    let kind = TetrominoType::random();
    let spawn_index = fastrand::usize(..spawn_count);
    let extra_rotations = fastrand::u32(0..4);

    spawn_piece_at(world, kind, spawn_index, extra_rotations);
}

/// Deterministic spawn shared by [`spawn_random_piece`] and the tests. A
/// spawn whose cells overlap locked tiles locks immediately with the
/// out-of-bounds flag set, which ends the session without a respawn.
pub fn spawn_piece_at(
    world: &mut World,
    kind: TetrominoType,
    spawn_index: usize,
    extra_rotations: u32,
) {
    // Drop any latched input so a held key does not carry into the new
    // piece, keeping the hard-drop edge trigger state.
    if let Some(mut input) = world.get_resource_mut::<Input>() {
        let was_released = input.hard_drop_released;
        *input = Input::default();
        input.hard_drop_released = was_released;
    }

    let spawn_point = world.resource::<Board>().spawn_points[spawn_index];
    let mut piece = ActivePiece::new(kind, spawn_point.gravity);
    let mut anchor = spawn_point.cell;

    // Each extra rotation runs the full kick procedure against current
    // occupancy; the piece is not on the board yet.
    {
        let board = world.resource::<Board>();
        for _ in 0..extra_rotations {
            piece.rotate(board, &mut anchor, 1);
        }
    }

    debug!(
        "Spawning {kind:?} at ({}, {}) from {:?}",
        anchor.x, anchor.y, spawn_point.edge
    );

    let blocked = !world.resource::<Board>().is_tile_free(&piece.cells, anchor);
    if blocked {
        // The spawn overlaps locked tiles: the piece never enters play.
        let entity = world.spawn((piece, anchor)).id();
        lock_piece(world, entity, true);
        return;
    }

    {
        let mut board = world.resource_mut::<Board>();
        board.place(&piece, anchor);
    }
    world.spawn((piece, anchor));
}

fn active_piece(world: &mut World) -> Option<(Entity, ActivePiece, Position)> {
    let mut query = world.query::<(Entity, &ActivePiece, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece, anchor)| (entity, piece.clone(), *anchor))
}

/// Applies the tick's latched input to the active piece. A directional
/// command opposite to the piece's gravity is reinterpreted as a hard drop;
/// other blocked directions are a no-op, never a lock.
pub fn input_system(world: &mut World) {
    let input = world.resource::<Input>().clone();
    {
        let mut latched = world.resource_mut::<Input>();
        let was_released = latched.hard_drop_released;
        *latched = Input::default();
        latched.hard_drop_released = was_released;
    }

    if world.resource::<GameState>().game_over {
        return;
    }

    let Some((entity, piece, _)) = active_piece(world) else {
        return;
    };

    if input.hard_drop {
        hard_drop(world, entity);
        return;
    }

    let pressed = [
        (input.up, Position::UP),
        (input.down, Position::DOWN),
        (input.left, Position::LEFT),
        (input.right, Position::RIGHT),
    ];
    for (held, translation) in pressed {
        if !held {
            continue;
        }
        if translation == piece.gravity.inverse() {
            hard_drop(world, entity);
            return;
        }
        nudge(world, entity, translation);
    }

    if input.rotate_cw {
        rotate_active(world, entity, 1);
    }
    if input.rotate_ccw {
        rotate_active(world, entity, -1);
    }
}

/// Single-cell translation: clear the piece from the grid, test the move,
/// re-place at wherever it ended up.
fn nudge(world: &mut World, entity: Entity, translation: Position) {
    let Some(piece) = world.get::<ActivePiece>(entity).cloned() else {
        return;
    };
    let Some(mut anchor) = world.get::<Position>(entity).copied() else {
        return;
    };

    let outcome = {
        let mut board = world.resource_mut::<Board>();
        board.clear_piece(&piece, anchor);
        let outcome = piece.try_move(&board, &mut anchor, translation);
        board.place(&piece, anchor);
        outcome
    };

    if outcome.moved {
        trace!("Moved to ({}, {})", anchor.x, anchor.y);
        world.entity_mut(entity).insert(anchor);
    }
}

fn rotate_active(world: &mut World, entity: Entity, direction: i32) {
    let Some(mut piece) = world.get::<ActivePiece>(entity).cloned() else {
        return;
    };
    let Some(mut anchor) = world.get::<Position>(entity).copied() else {
        return;
    };

    let rotated = {
        let mut board = world.resource_mut::<Board>();
        board.clear_piece(&piece, anchor);
        let rotated = piece.rotate(&board, &mut anchor, direction);
        board.place(&piece, anchor);
        rotated
    };

    if rotated {
        trace!("Rotated to index {}", piece.rotation);
        world.entity_mut(entity).insert((piece, anchor));
    }
}

/// Rides gravity until the piece stops, then locks with the final failed
/// attempt's out-of-bounds flag.
pub fn hard_drop(world: &mut World, entity: Entity) {
    let Some(piece) = world.get::<ActivePiece>(entity).cloned() else {
        return;
    };
    let Some(mut anchor) = world.get::<Position>(entity).copied() else {
        return;
    };

    let outcome = {
        let mut board = world.resource_mut::<Board>();
        board.clear_piece(&piece, anchor);
        let mut outcome = piece.try_move(&board, &mut anchor, piece.gravity);
        while outcome.moved {
            outcome = piece.try_move(&board, &mut anchor, piece.gravity);
        }
        outcome
    };

    debug!("Hard drop to ({}, {})", anchor.x, anchor.y);
    world.entity_mut(entity).insert(anchor);
    lock_piece(world, entity, outcome.out_of_bounds);
}

/// Commits the piece permanently, or ends the session when the lock
/// resolved out of bounds (the cells are never committed in that case).
pub fn lock_piece(world: &mut World, entity: Entity, out_of_bounds: bool) {
    let Some(piece) = world.get::<ActivePiece>(entity).cloned() else {
        return;
    };
    let Some(anchor) = world.get::<Position>(entity).copied() else {
        return;
    };
    world.despawn(entity);

    if out_of_bounds {
        info!("Piece locked out of bounds, game over");
        world.resource_mut::<GameState>().game_over = true;
        world.resource_mut::<GameEvents>().push(GameEvent::GameOver);
        return;
    }

    let cleared = {
        let mut board = world.resource_mut::<Board>();
        board.place(&piece, anchor);
        board.scan_and_clear_boxes()
    };
    if !cleared.is_empty() {
        info!("Cleared {} box(es)", cleared.len());
    }
    {
        let mut events = world.resource_mut::<GameEvents>();
        for _ in &cleared {
            events.push(GameEvent::BoxCleared);
        }
    }

    spawn_random_piece(world);
}

/// Advances the step accumulator and applies one gravity step when it
/// reaches the current delay. A blocked gravity step locks the piece.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("Game tick with delta: {delta_seconds}");

    if world.resource::<GameState>().game_over {
        return;
    }

    let should_step = {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.step_timer += delta_seconds;
        if game_state.step_timer >= game_state.step_delay {
            game_state.step_timer = 0.0;
            true
        } else {
            false
        }
    };
    if !should_step {
        return;
    }

    let Some((entity, piece, anchor)) = active_piece(world) else {
        debug!("No active piece, spawning one");
        spawn_random_piece(world);
        return;
    };

    let (outcome, anchor) = {
        let mut board = world.resource_mut::<Board>();
        board.clear_piece(&piece, anchor);
        let mut anchor = anchor;
        let outcome = piece.try_move(&board, &mut anchor, piece.gravity);
        if outcome.moved {
            board.place(&piece, anchor);
        }
        (outcome, anchor)
    };

    if outcome.moved {
        world.entity_mut(entity).insert(anchor);
    } else {
        lock_piece(world, entity, outcome.out_of_bounds);
    }
}

/// Drains the notification queue: 100 points per cleared box, a level-up
/// and speed-up every tenth clear, and high-score persistence at game over.
pub fn score_system(world: &mut World) {
    let events = world.resource_mut::<GameEvents>().drain();
    if events.is_empty() {
        return;
    }

    for event in events {
        match event {
            GameEvent::BoxCleared => {
                let mut game_state = world.resource_mut::<GameState>();
                game_state.score += POINTS_PER_CLEAR;
                game_state.clears += 1;

                if game_state.clears % CLEARS_PER_LEVEL == 0 {
                    game_state.level += 1;
                    game_state.adjust_step_delay(-STEP_DELAY_DECREMENT);
                    info!(
                        "Level up to {} (step delay {:.2}s)",
                        game_state.level, game_state.step_delay
                    );
                }
            }
            GameEvent::GameOver => {
                let beaten = {
                    let mut game_state = world.resource_mut::<GameState>();
                    if game_state.score > game_state.high_score {
                        game_state.high_score = game_state.score;
                        Some(game_state.high_score)
                    } else {
                        None
                    }
                };

                if let Some(high_score) = beaten {
                    info!("New high score: {high_score}");
                    if let Err(err) = highscore::save_high_score(high_score) {
                        error!("Failed to persist high score: {err:?}");
                    }
                }
            }
        }
    }
}
