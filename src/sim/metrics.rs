//! Score, calorie, and telemetry bookkeeping
//!
//! The ledger is the authoritative scoreboard; presentation layers only
//! ever see read-only snapshots. Nothing here decreases except through
//! `reset`, and the best score is committed once, at the game-over
//! transition.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Read-only scoreboard snapshot handed to presentation each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameMetrics {
    /// Current run score
    pub score: u32,
    /// Max score across runs; persisted by the host's score store
    pub best_score: u32,
    /// Estimated kcal burned this run
    pub calories: f32,
    /// Detected movement events this run
    pub flaps: u32,
    /// Smoothed frames per second
    pub fps: f32,
    /// Last pose sample confidence in [0, 1]
    pub pose_confidence: f32,
    /// Last pose inference latency in milliseconds
    pub latency_ms: f32,
}

/// Accumulates per-run metrics and performance telemetry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsLedger {
    metrics: GameMetrics,
    kcal_per_flap: f32,
    kcal_per_second: f32,
}

impl MetricsLedger {
    pub fn new(best_score: u32, kcal_per_flap: f32, kcal_per_second: f32) -> Self {
        Self {
            metrics: GameMetrics {
                score: 0,
                best_score,
                calories: 0.0,
                flaps: 0,
                fps: 0.0,
                pose_confidence: 0.0,
                latency_ms: 0.0,
            },
            kcal_per_flap,
            kcal_per_second,
        }
    }

    /// Immutable per-frame snapshot for the HUD and game-over screen
    pub fn snapshot(&self) -> GameMetrics {
        self.metrics
    }

    /// A detected movement event: one flap, plus its calorie bonus
    pub fn on_flap(&mut self) {
        self.metrics.flaps += 1;
        self.metrics.calories += self.kcal_per_flap;
    }

    /// Continuous activity accrual and fps tracking for one frame
    pub fn on_tick(&mut self, dt_seconds: f32) {
        if dt_seconds <= 0.0 || !dt_seconds.is_finite() {
            return;
        }
        self.metrics.calories += self.kcal_per_second * dt_seconds;

        let instantaneous = 1.0 / dt_seconds;
        self.metrics.fps = if self.metrics.fps == 0.0 {
            instantaneous
        } else {
            self.metrics.fps + (instantaneous - self.metrics.fps) * FPS_SMOOTHING
        };
    }

    /// Record pose telemetry, last-value-wins.
    ///
    /// Confidence is never used to gate motion or scoring here; whether to
    /// suppress low-confidence samples is the upstream pipeline's decision.
    pub fn on_pose_sample(&mut self, confidence: f32, latency_ms: f32) {
        self.metrics.pose_confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.metrics.latency_ms = if latency_ms.is_finite() {
            latency_ms.max(0.0)
        } else {
            0.0
        };
    }

    /// Score points for newly cleared obstacles
    pub fn record_clears(&mut self, count: u32) {
        self.metrics.score += count;
    }

    /// Raise the best score to the current score if it was beaten.
    /// Called at the game-over transition; returns the new record for the
    /// persistence port, if there is one.
    pub fn commit_best(&mut self) -> Option<u32> {
        if self.metrics.score > self.metrics.best_score {
            self.metrics.best_score = self.metrics.score;
            Some(self.metrics.best_score)
        } else {
            None
        }
    }

    /// Zero the per-run fields; the best score survives
    pub fn reset(&mut self) {
        self.metrics.score = 0;
        self.metrics.calories = 0.0;
        self.metrics.flaps = 0;
    }
}

impl Default for MetricsLedger {
    fn default() -> Self {
        Self::new(0, KCAL_PER_FLAP, KCAL_PER_SECOND)
    }
}
