//! Flap Fit - a pose-controlled flappy fitness game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar motion, obstacles, scoring, metrics)
//! - `tuning`: Data-driven game balance
//! - `settings`: User preferences
//! - `scoreboard`: Best-score persistence port

pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use scoreboard::{LocalScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Logical canvas width (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    /// Logical canvas height (pixels)
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Avatar bounding-box side length
    pub const AVATAR_SIZE: f32 = 40.0;
    /// Fixed avatar column
    pub const AVATAR_X: f32 = 120.0;
    /// Gain converting target error into the cosmetic velocity
    pub const VELOCITY_GAIN: f32 = 0.3;
    /// Degrees of rotation per unit of velocity
    pub const ROTATION_GAIN: f32 = 3.0;
    /// Rotation clamp (degrees)
    pub const ROTATION_MIN: f32 = -30.0;
    pub const ROTATION_MAX: f32 = 90.0;

    /// Impulse fallback mode (per-tick integration)
    pub const GRAVITY: f32 = 0.55;
    pub const JUMP_FORCE: f32 = -9.5;
    pub const TERMINAL_VELOCITY: f32 = 12.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const OBSTACLE_GAP_HEIGHT: f32 = 180.0;
    /// Horizontal distance between consecutive spawns
    pub const OBSTACLE_SPACING: f32 = 280.0;
    /// Scroll speed (pixels per tick)
    pub const OBSTACLE_SCROLL_SPEED: f32 = 3.0;
    /// Minimum distance between a gap edge and the top/bottom walls
    pub const GAP_MARGIN: f32 = 60.0;

    /// Calorie accrual defaults
    pub const KCAL_PER_FLAP: f32 = 0.35;
    pub const KCAL_PER_SECOND: f32 = 0.12;

    /// Default pose smoothing factor (0..1], higher = snappier
    pub const DEFAULT_SMOOTHING: f32 = 0.2;

    /// Exponential-average factor for the fps readout
    pub const FPS_SMOOTHING: f32 = 0.1;
}

/// Clamp a vertical position so a box of `size` stays fully on the canvas
#[inline]
pub fn clamp_to_canvas(y: f32, size: f32) -> f32 {
    y.clamp(0.0, consts::CANVAS_HEIGHT - size)
}
