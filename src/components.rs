#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting rotation results back to i32 since cell
    // offsets stay within single digits
    clippy::cast_possible_truncation,
    // Allow precision loss when feeding cell offsets through the f32
    // rotation transform since the values are tiny integers
    clippy::cast_precision_loss,
    // Allow potential wrapping when casting between index types as the
    // rotation index and table rows are always in [0, 8)
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    // Allow more than 3 bools in the input state where each bool is a
    // distinct latched key
    clippy::struct_excessive_bools
)]

use std::collections::{HashMap, VecDeque};

use bevy_ecs::prelude::*;
use crossterm::event::KeyEvent;

use crate::game::{
    CLEAR_BOX_SIZE, DEFAULT_WALL_KICKS, I_WALL_KICKS, Kick, MIN_BOARD_HALF_EXTENT, ROTATION_MATRIX,
    SPAWN_INSET, STEP_DELAY_FLOOR, STEP_DELAY_START,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    #[must_use]
    pub fn random() -> Self {
        match fastrand::u8(0..7) {
            0 => TetrominoType::I,
            1 => TetrominoType::J,
            2 => TetrominoType::L,
            3 => TetrominoType::O,
            4 => TetrominoType::S,
            5 => TetrominoType::T,
            _ => TetrominoType::Z,
        }
    }

    /// Unrotated silhouette as offsets from the piece anchor.
    #[must_use]
    pub fn cells(self) -> [Position; 4] {
        let offsets = match self {
            TetrominoType::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
            TetrominoType::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
            TetrominoType::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
            TetrominoType::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        };
        offsets.map(|(x, y)| Position::new(x, y))
    }

    /// Kick table used to resolve blocked rotations. The I shape has its
    /// own; the other six share the default table.
    #[must_use]
    pub fn wall_kicks(self) -> &'static [[Kick; 5]; 8] {
        match self {
            TetrominoType::I => &I_WALL_KICKS,
            _ => &DEFAULT_WALL_KICKS,
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            TetrominoType::I => ratatui::style::Color::Cyan,
            TetrominoType::J => ratatui::style::Color::Blue,
            TetrominoType::L => ratatui::style::Color::LightYellow,
            TetrominoType::O => ratatui::style::Color::Yellow,
            TetrominoType::S => ratatui::style::Color::Green,
            TetrominoType::T => ratatui::style::Color::Magenta,
            TetrominoType::Z => ratatui::style::Color::Red,
        }
    }
}

/// Board coordinate, piece-local offset, or translation vector. The board
/// is centered on the origin, so both components may be negative.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ZERO: Self = Self::new(0, 0);
    pub const UP: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Board edge a piece can enter from. Gravity always points from the edge
/// toward the center of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
        SpawnEdge::Right,
    ];

    #[must_use]
    pub fn gravity(self) -> Position {
        match self {
            SpawnEdge::Top => Position::DOWN,
            SpawnEdge::Bottom => Position::UP,
            SpawnEdge::Left => Position::RIGHT,
            SpawnEdge::Right => Position::LEFT,
        }
    }

    #[must_use]
    pub fn spawn_cell(self, half_extent: i32) -> Position {
        let inset = half_extent - SPAWN_INSET;
        match self {
            SpawnEdge::Top => Position::new(0, inset),
            SpawnEdge::Bottom => Position::new(0, -inset),
            SpawnEdge::Left => Position::new(-inset, 0),
            SpawnEdge::Right => Position::new(inset, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpawnPoint {
    pub edge: SpawnEdge,
    pub cell: Position,
    pub gravity: Position,
}

/// Result of a single move attempt. The out-of-bounds flag is meaningful on
/// failure: it tells the caller whether to lock in place or end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub out_of_bounds: bool,
}

/// The single falling piece. Its anchor lives in a separate [`Position`]
/// component on the same entity; every absolute cell is anchor + offset.
#[derive(Component, Debug, Clone)]
pub struct ActivePiece {
    pub kind: TetrominoType,
    pub cells: [Position; 4],
    pub rotation: usize,
    pub gravity: Position,
}

impl ActivePiece {
    #[must_use]
    pub fn new(kind: TetrominoType, gravity: Position) -> Self {
        Self {
            kind,
            cells: kind.cells(),
            rotation: 0,
            gravity,
        }
    }

    #[must_use]
    pub fn absolute_cells(&self, anchor: Position) -> [Position; 4] {
        self.cells.map(|cell| anchor.offset(cell))
    }

    /// Attempts to translate the anchor. The anchor is committed on success
    /// and untouched on failure. Both validity queries run unconditionally:
    /// the out-of-bounds flag is reported even when tiles are what blocked
    /// the move.
    pub fn try_move(
        &self,
        board: &Board,
        anchor: &mut Position,
        translation: Position,
    ) -> MoveOutcome {
        let candidate = anchor.offset(translation);
        let tile_free = board.is_tile_free(&self.cells, candidate);
        let in_bounds = board.is_within_bounds(candidate);

        if tile_free && in_bounds {
            *anchor = candidate;
            MoveOutcome {
                moved: true,
                out_of_bounds: false,
            }
        } else {
            MoveOutcome {
                moved: false,
                out_of_bounds: !in_bounds,
            }
        }
    }

    /// Rotates 90° in `direction` (+1 clockwise, -1 counter-clockwise) with
    /// wall-kick resolution. All-or-nothing: if no kick candidate fits, the
    /// rotation index and cells revert and the anchor is untouched.
    pub fn rotate(&mut self, board: &Board, anchor: &mut Position, direction: i32) -> bool {
        let previous_rotation = self.rotation;
        let previous_cells = self.cells;

        self.rotation = (self.rotation as i32 + direction).rem_euclid(4) as usize;
        self.apply_rotation(direction);

        if self.test_wall_kicks(board, anchor, direction) {
            true
        } else {
            self.rotation = previous_rotation;
            self.cells = previous_cells;
            false
        }
    }

    fn apply_rotation(&mut self, direction: i32) {
        let dir = direction as f32;

        for cell in &mut self.cells {
            let x = cell.x as f32;
            let y = cell.y as f32;

            *cell = match self.kind {
                // I and O pivot about a half-integer point: shift onto it
                // and round the transform up.
                TetrominoType::I | TetrominoType::O => {
                    let (x, y) = (x - 0.5, y - 0.5);
                    Position::new(
                        (x * ROTATION_MATRIX[0] * dir + y * ROTATION_MATRIX[1] * dir).ceil() as i32,
                        (x * ROTATION_MATRIX[2] * dir + y * ROTATION_MATRIX[3] * dir).ceil() as i32,
                    )
                }
                _ => Position::new(
                    (x * ROTATION_MATRIX[0] * dir + y * ROTATION_MATRIX[1] * dir).round() as i32,
                    (x * ROTATION_MATRIX[2] * dir + y * ROTATION_MATRIX[3] * dir).round() as i32,
                ),
            };
        }
    }

    /// Walks the kick row for the new rotation state, trying each candidate
    /// translation against the already-rotated cells. The first candidate
    /// that moves wins (candidate 0 is the null kick).
    fn test_wall_kicks(&self, board: &Board, anchor: &mut Position, direction: i32) -> bool {
        let table = self.kind.wall_kicks();

        let mut row = self.rotation as i32 * 2;
        if direction < 0 {
            row -= 1;
        }
        let row = row.rem_euclid(table.len() as i32) as usize;

        for &(dx, dy) in &table[row] {
            if self.try_move(board, anchor, Position::new(dx, dy)).moved {
                return true;
            }
        }
        false
    }
}

/// Occupancy grid plus board geometry. A cell is either absent from the map
/// (empty) or maps to exactly one occupant.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub half_extent: i32,
    pub clear_box_size: i32,
    pub spawn_points: Vec<SpawnPoint>,
    cells: HashMap<Position, TetrominoType>,
}

impl Board {
    #[must_use]
    pub fn new(half_extent: i32) -> Self {
        let half_extent = half_extent.max(MIN_BOARD_HALF_EXTENT);
        let spawn_points = SpawnEdge::ALL
            .iter()
            .map(|&edge| SpawnPoint {
                edge,
                cell: edge.spawn_cell(half_extent),
                gravity: edge.gravity(),
            })
            .collect();

        Self {
            half_extent,
            clear_box_size: CLEAR_BOX_SIZE,
            spawn_points,
            cells: HashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.cells.clear();
    }

    /// Marks a single cell as occupied.
    pub fn occupy(&mut self, cell: Position, kind: TetrominoType) {
        self.cells.insert(cell, kind);
    }

    /// Seeds the starting tile at the origin so incoming pieces have
    /// something to land on.
    pub fn seed_center(&mut self, kind: TetrominoType) {
        self.occupy(Position::ZERO, kind);
    }

    #[must_use]
    pub fn is_within_bounds(&self, cell: Position) -> bool {
        cell.x >= -self.half_extent
            && cell.x < self.half_extent
            && cell.y >= -self.half_extent
            && cell.y < self.half_extent
    }

    /// True iff every absolute cell the piece would occupy at `anchor` is
    /// currently empty. Independent of bounds.
    #[must_use]
    pub fn is_tile_free(&self, cells: &[Position; 4], anchor: Position) -> bool {
        cells
            .iter()
            .all(|cell| !self.cells.contains_key(&anchor.offset(*cell)))
    }

    /// Writes the piece's cells into the grid. Callers validate first; this
    /// does not re-check, to preserve the one-occupant-per-cell invariant.
    pub fn place(&mut self, piece: &ActivePiece, anchor: Position) {
        for cell in piece.absolute_cells(anchor) {
            self.cells.insert(cell, piece.kind);
        }
    }

    /// Removes the piece's cells from the grid unconditionally. Run before
    /// testing a candidate move so stale self-occupancy never blocks the
    /// piece's own motion.
    pub fn clear_piece(&mut self, piece: &ActivePiece, anchor: Position) {
        for cell in piece.absolute_cells(anchor) {
            self.cells.remove(&cell);
        }
    }

    #[must_use]
    pub fn occupant(&self, cell: Position) -> Option<TetrominoType> {
        self.cells.get(&cell).copied()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, TetrominoType)> + '_ {
        self.cells.iter().map(|(cell, kind)| (*cell, *kind))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Scans every in-bounds cell as the minimum corner of a clear box and
    /// clears each full box, returning the corners cleared. Row-major from
    /// the minimum corner, row index outer; boxes cleared earlier in the
    /// pass read as empty for the boxes scanned after them.
    pub fn scan_and_clear_boxes(&mut self) -> Vec<Position> {
        let mut cleared = Vec::new();

        for y in -self.half_extent..self.half_extent {
            for x in -self.half_extent..self.half_extent {
                let corner = Position::new(x, y);
                if self.is_full_box(corner) {
                    self.clear_box(corner);
                    cleared.push(corner);
                }
            }
        }

        cleared
    }

    fn box_center(&self, corner: Position) -> Position {
        Position::new(
            corner.x + self.clear_box_size / 2,
            corner.y + self.clear_box_size / 2,
        )
    }

    /// A box is full iff every cell except its exact center is occupied.
    /// Center occupancy is ignored, never required.
    fn is_full_box(&self, corner: Position) -> bool {
        let center = self.box_center(corner);

        for y in corner.y..corner.y + self.clear_box_size {
            for x in corner.x..corner.x + self.clear_box_size {
                let cell = Position::new(x, y);
                if cell == center {
                    continue;
                }
                if !self.cells.contains_key(&cell) {
                    return false;
                }
            }
        }
        true
    }

    fn clear_box(&mut self, corner: Position) {
        let center = self.box_center(corner);

        for y in corner.y..corner.y + self.clear_box_size {
            for x in corner.x..corner.x + self.clear_box_size {
                let cell = Position::new(x, y);
                if cell == center {
                    continue;
                }
                self.cells.remove(&cell);
            }
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub clears: u32,
    pub level: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub step_delay: f32,
    pub step_timer: f32,
    pub was_paused_for_resize: bool,
    pub last_key: Option<KeyEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            clears: 0,
            level: 1,
            high_score: 0,
            game_over: false,
            step_delay: STEP_DELAY_START,
            step_timer: 0.0,
            was_paused_for_resize: false,
            last_key: None,
        }
    }
}

impl GameState {
    /// Resets the session, keeping the high score.
    pub fn reset(&mut self) {
        *self = Self {
            high_score: self.high_score,
            ..Self::default()
        };
    }

    /// Adjusts the auto-step cadence, clamped to the floor.
    pub fn adjust_step_delay(&mut self, delta: f32) {
        self.step_delay = (self.step_delay + delta).max(STEP_DELAY_FLOOR);
    }
}

/// Latched keyboard state for one game tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hard_drop: bool,
    pub hard_drop_released: bool, // Track if the hard drop key has been released
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BoxCleared,
    GameOver,
}

/// Notification queue between the simulation and the scoring consumer. The
/// simulation pushes, the session drains once per tick.
#[derive(Resource, Debug, Default)]
pub struct GameEvents {
    queue: VecDeque<GameEvent>,
}

impl GameEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
