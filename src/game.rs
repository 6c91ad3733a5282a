#![warn(clippy::all, clippy::pedantic)]

// Board geometry. Bounds are symmetric about the origin and cover
// [-BOARD_HALF_EXTENT, BOARD_HALF_EXTENT) in each axis, so the playfield is
// twice the half extent wide and tall. The oversizing leaves room for pieces
// entering from every edge.
pub const BOARD_HALF_EXTENT: i32 = 18;
pub const MIN_BOARD_HALF_EXTENT: i32 = 6;

// Spawn cells sit this many cells inside the bounds on their edge.
pub const SPAWN_INSET: i32 = 2;

// Width and height of the box that must be ringed to score. The box center
// is exempt from both the fullness test and the clear.
pub const CLEAR_BOX_SIZE: i32 = 3;

// Scoring
pub const POINTS_PER_CLEAR: u32 = 100;
pub const CLEARS_PER_LEVEL: u32 = 10;

// Auto-step pacing, in seconds. Every CLEARS_PER_LEVEL-th clear shaves off
// one decrement, never dropping below the floor.
pub const STEP_DELAY_START: f32 = 0.8;
pub const STEP_DELAY_DECREMENT: f32 = 0.1;
pub const STEP_DELAY_FLOOR: f32 = 0.3;

// 90° rotation transform: cos, sin, -sin, cos.
pub const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

pub type Kick = (i32, i32);

// Wall-kick candidate tables. Rows are indexed by new_rotation * 2, minus
// one for counter-clockwise turns, wrapped into [0, 8); the five candidates
// in a row are tried in order and the first starts at the null kick.
pub static DEFAULT_WALL_KICKS: [[Kick; 5]; 8] = [
    // 3->0 (clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->1 (counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->1 (clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->2 (counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2 (clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 0->3 (counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3 (clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
];

// The I shape slides along its long axis and needs its own table.
pub static I_WALL_KICKS: [[Kick; 5]; 8] = [
    // 3->0 (clockwise)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->1 (counter-clockwise)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->1 (clockwise)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->2 (counter-clockwise)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2 (clockwise)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 0->3 (counter-clockwise)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3 (clockwise)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->0 (counter-clockwise)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
];
