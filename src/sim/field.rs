//! Scrolling obstacle field
//!
//! Spawning is distance-based, not time-based: a new obstacle appears when
//! the last one's trailing edge has scrolled past a fixed threshold, so
//! obstacle density is independent of frame rate. Gap centers are drawn
//! from a seeded RNG, keeping a session fully reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A vertical barrier pair with a passable gap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge, decreasing each tick
    pub x: f32,
    pub width: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    /// Set once the avatar has passed this obstacle's x position
    pub cleared: bool,
}

impl Obstacle {
    /// Top edge of the passable band
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    /// Bottom edge of the passable band
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// Right edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Ordered sequence of obstacles.
///
/// Invariant: `obstacles` is strictly increasing in x (spawn order equals
/// spatial order); the collision engine relies on this to stop scanning at
/// the first obstacle entirely right of the avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    seed: u64,
    /// Spawn counter, also the per-spawn RNG stream index
    spawned: u32,
    gap_height: f32,
    spacing: f32,
}

impl ObstacleField {
    pub fn new(seed: u64, gap_height: f32, spacing: f32) -> Self {
        debug_assert!(gap_height < CANVAS_HEIGHT);
        Self {
            obstacles: Vec::new(),
            seed,
            spawned: 0,
            gap_height,
            spacing,
        }
    }

    /// Scroll every obstacle left by `scroll_speed`
    pub fn advance(&mut self, scroll_speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= scroll_speed;
        }
    }

    /// Spawn the next obstacle at the right edge once the last one has
    /// scrolled far enough. Returns the new obstacle, if any.
    pub fn spawn_if_due(&mut self) -> Option<&Obstacle> {
        let due = match self.obstacles.last() {
            None => true,
            Some(last) => last.trailing_edge() <= CANVAS_WIDTH - self.spacing,
        };
        if !due {
            return None;
        }

        // Per-spawn seed derived from the session seed (golden ratio hash),
        // so field layout is reproducible without serializing RNG state
        let spawn_seed = (self.spawned as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        let mut rng = Pcg32::seed_from_u64(spawn_seed);

        // Keep the full gap on-screen with a margin from both walls
        let half_gap = self.gap_height / 2.0;
        let lo = GAP_MARGIN + half_gap;
        let hi = CANVAS_HEIGHT - GAP_MARGIN - half_gap;
        let gap_center = rng.random_range(lo..hi);

        self.spawned += 1;
        self.obstacles.push(Obstacle {
            x: CANVAS_WIDTH,
            width: OBSTACLE_WIDTH,
            gap_center,
            gap_height: self.gap_height,
            cleared: false,
        });
        self.obstacles.last()
    }

    /// Remove obstacles fully off-screen on the trailing edge, returning
    /// the removed set for bookkeeping
    pub fn retire_offscreen(&mut self) -> Vec<Obstacle> {
        let mut retired = Vec::new();
        while self.obstacles.first().is_some_and(|o| o.trailing_edge() < 0.0) {
            retired.push(self.obstacles.remove(0));
        }
        retired
    }

    /// Clear and reseed for a fresh session
    pub fn reset(&mut self, seed: u64) {
        self.obstacles.clear();
        self.seed = seed;
        self.spawned = 0;
    }
}
