//! Per-frame simulation tick
//!
//! The host invokes `tick` exactly once per rendered frame with the
//! measured delta. The simulation never blocks on pose input: it acts on
//! whatever sample the host had available, and a frame without one simply
//! holds the avatar in place.

use serde::{Deserialize, Serialize};

use super::avatar::ControlMode;
use super::collision;
use super::state::{GamePhase, GameState};

/// One pose pipeline reading, treated as untrusted until clamped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Target vertical position in canvas space
    pub target_y: f32,
    /// Detection confidence in [0, 1]; telemetry only, never gates motion
    pub confidence: f32,
    /// Inference latency in milliseconds
    pub latency_ms: f32,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Most recent pose sample, if one arrived since the last frame
    pub pose: Option<PoseSample>,
    /// A detected movement event (squat/arm raise upstream, or Space in
    /// the keyboard fallback)
    pub flap: bool,
    /// Restart request from the presentation layer
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_seconds: f32) {
    if input.restart {
        if state.phase == GamePhase::GameOver {
            state.restart(next_seed(state.seed));
        }
        return;
    }

    // Terminal state: collision checks and metric updates are no-ops
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Telemetry reflects this frame's input conditions
    state.metrics.on_tick(dt_seconds);
    if let Some(pose) = &input.pose {
        state.metrics.on_pose_sample(pose.confidence, pose.latency_ms);
    }
    if input.flap {
        state.metrics.on_flap();
    }

    // Motion: the two control modes share the avatar's clamping contract
    match state.control_mode {
        ControlMode::Pose => {
            if let Some(pose) = &input.pose {
                state.avatar.set_target_y(pose.target_y, state.tuning.smoothing);
            }
        }
        ControlMode::Impulse => {
            if input.flap {
                state.avatar.flap();
            }
            state.avatar.integrate();
        }
    }

    state.field.advance(state.tuning.scroll_speed);
    state.field.spawn_if_due();
    state.field.retire_offscreen();

    // Terminal check before scoring: a colliding frame never scores
    if let Some(cause) = collision::check_death(&state.avatar, &state.field) {
        state.phase = GamePhase::GameOver;
        state.death = Some(cause);
        let score = state.metrics.snapshot().score;
        if let Some(record) = state.metrics.commit_best() {
            log::info!("New best score: {}", record);
        }
        log::info!("Game over ({:?}) at score {}", cause, score);
        return;
    }

    let cleared = collision::mark_cleared(&state.avatar, &mut state.field);
    if cleared > 0 {
        state.metrics.record_clears(cleared);
    }
}

/// Derive the next session seed from the previous one (golden ratio hash),
/// keeping restarts reproducible from the initial seed
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(2654435761).wrapping_add(0x9E37_79B9)
}
