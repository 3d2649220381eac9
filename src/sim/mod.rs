//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, driven by the host
//! - Seeded RNG only
//! - Stable obstacle order (spawn order = spatial order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod field;
pub mod metrics;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, ControlMode};
pub use collision::{Aabb, DeathCause, check_death, mark_cleared};
pub use field::{Obstacle, ObstacleField};
pub use metrics::{GameMetrics, MetricsLedger};
pub use state::{GamePhase, GameState};
pub use tick::{PoseSample, TickInput, tick};
