//! Data-driven game balance
//!
//! Everything the simulation treats as a knob lives in `Tuning`, resolved
//! once per session from the selected difficulty.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Standard,
    Intense,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Standard => "Standard",
            Difficulty::Intense => "Intense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "standard" | "normal" => Some(Difficulty::Standard),
            "intense" | "hard" => Some(Difficulty::Intense),
            _ => None,
        }
    }

    /// Resolve this preset into concrete balance values
    pub fn tuning(&self) -> Tuning {
        match self {
            Difficulty::Relaxed => Tuning {
                scroll_speed: 2.4,
                gap_height: 220.0,
                spawn_spacing: 330.0,
                ..Tuning::default()
            },
            Difficulty::Standard => Tuning::default(),
            Difficulty::Intense => Tuning {
                scroll_speed: 3.8,
                gap_height: 150.0,
                spawn_spacing: 240.0,
                ..Tuning::default()
            },
        }
    }
}

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Obstacle scroll speed, pixels per tick
    pub scroll_speed: f32,
    /// Passable gap height, pixels
    pub gap_height: f32,
    /// Horizontal distance between consecutive spawns
    pub spawn_spacing: f32,
    /// Pose smoothing factor in (0, 1]
    pub smoothing: f32,
    pub kcal_per_flap: f32,
    pub kcal_per_second: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_speed: OBSTACLE_SCROLL_SPEED,
            gap_height: OBSTACLE_GAP_HEIGHT,
            spawn_spacing: OBSTACLE_SPACING,
            smoothing: DEFAULT_SMOOTHING,
            kcal_per_flap: KCAL_PER_FLAP,
            kcal_per_second: KCAL_PER_SECOND,
        }
    }
}
