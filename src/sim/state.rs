//! Game state and session lifecycle
//!
//! One `GameState` per session. The phase machine has a single terminal
//! transition, `Running -> GameOver`, fired by the collision check; the
//! only way back is an explicit restart.

use serde::{Deserialize, Serialize};

use super::avatar::{Avatar, ControlMode};
use super::collision::DeathCause;
use super::field::ObstacleField;
use super::metrics::MetricsLedger;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; simulation frozen until restart
    GameOver,
}

/// Complete per-session simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducible obstacle layouts
    pub seed: u64,
    pub phase: GamePhase,
    pub control_mode: ControlMode,
    pub avatar: Avatar,
    pub field: ObstacleField,
    pub metrics: MetricsLedger,
    pub tuning: Tuning,
    /// Why the last run ended, if it has
    pub death: Option<DeathCause>,
    /// Tick counter for this run
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64, best_score: u32, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Running,
            control_mode: ControlMode::default(),
            avatar: Avatar::new(AVATAR_X, start_y()),
            field: ObstacleField::new(seed, tuning.gap_height, tuning.spawn_spacing),
            metrics: MetricsLedger::new(best_score, tuning.kcal_per_flap, tuning.kcal_per_second),
            tuning,
            death: None,
            time_ticks: 0,
        }
    }

    /// Full session reinitialization: avatar back to the start column,
    /// field cleared and reseeded, per-run metrics zeroed. The best score
    /// survives in the ledger.
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting session with seed {}", seed);
        self.seed = seed;
        self.phase = GamePhase::Running;
        self.death = None;
        self.time_ticks = 0;
        self.avatar.reset(AVATAR_X, start_y());
        self.field.reset(seed);
        self.metrics.reset();
    }
}

/// Vertical center of the canvas for a fresh avatar
fn start_y() -> f32 {
    (CANVAS_HEIGHT - AVATAR_SIZE) / 2.0
}
