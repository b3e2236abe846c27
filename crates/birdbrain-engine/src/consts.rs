//! World geometry and physics constants.
//!
//! All lengths are in world units, velocities in units per second.

/// Height of the playable area; birds die above or below it.
pub const GAME_HEIGHT: f32 = 512.0;

/// Bird hitbox width.
pub const BIRD_WIDTH: f32 = 34.0;
/// Bird hitbox height.
pub const BIRD_HEIGHT: f32 = 24.0;

/// Width of a pipe pair.
pub const PIPE_WIDTH: f32 = 52.0;
/// Vertical gap between the lower and upper pipe of a pair.
pub const HOLE_HEIGHT: f32 = 150.0;
/// Horizontal spacing between consecutive pipe pairs.
pub const PIPE_DISTANCE: f32 = 220.0;
/// X position of the first pipe pair.
pub const START_PIPE_X: f32 = 400.0;

/// Lowest allowed bottom edge of a hole.
pub const MIN_HOLE_Y: f32 = 80.0;
/// Highest allowed bottom edge of a hole.
pub const MAX_HOLE_Y: f32 = GAME_HEIGHT - HOLE_HEIGHT - 80.0;

/// Downward acceleration applied every physics step.
pub const GRAVITY: f32 = 1200.0;
/// Upward velocity set by a flap.
pub const FLAP_Y_VELOCITY: f32 = 380.0;
/// Constant horizontal scroll velocity of a live bird.
pub const SCROLL_X_VELOCITY: f32 = 160.0;

/// Range used to normalize distance sensors into `[-1, 1]`.
pub const DISTANCE_RANGE: f32 = GAME_HEIGHT / 1.5;
