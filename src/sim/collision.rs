//! Collision and scoring checks
//!
//! Per frame the engine tests the avatar's box against the boundary walls,
//! then against the gap of the nearest overlapping obstacle, then marks
//! passed obstacles as cleared for scoring. Wall death takes precedence
//! over obstacle death when both would fire in the same frame, so replays
//! report a deterministic cause.

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::field::ObstacleField;
use crate::consts::CANVAS_HEIGHT;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn of_avatar(avatar: &Avatar) -> Self {
        Self {
            left: avatar.pos.x,
            right: avatar.pos.x + avatar.size,
            top: avatar.pos.y,
            bottom: avatar.pos.y + avatar.size,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Avatar crossed the top or bottom boundary
    Wall,
    /// Avatar left the passable gap while inside an obstacle's span
    Obstacle,
}

/// Test for a terminal condition this frame.
///
/// Thanks to the field's ordering invariant the scan stops at the first
/// obstacle entirely right of the avatar.
pub fn check_death(avatar: &Avatar, field: &ObstacleField) -> Option<DeathCause> {
    let bounds = Aabb::of_avatar(avatar);

    if bounds.top < 0.0 || bounds.bottom > CANVAS_HEIGHT {
        return Some(DeathCause::Wall);
    }

    for obstacle in &field.obstacles {
        if obstacle.x >= bounds.right {
            break;
        }
        if obstacle.trailing_edge() <= bounds.left {
            continue;
        }
        // Overlapping horizontally: the avatar's vertical span must lie
        // entirely within the gap
        if bounds.top < obstacle.gap_top() || bounds.bottom > obstacle.gap_bottom() {
            return Some(DeathCause::Obstacle);
        }
    }

    None
}

/// Mark obstacles whose x position the avatar has passed as cleared.
/// Returns how many were newly cleared (one score point each).
pub fn mark_cleared(avatar: &Avatar, field: &mut ObstacleField) -> u32 {
    let mut newly_cleared = 0;
    for obstacle in &mut field.obstacles {
        if avatar.pos.x <= obstacle.x {
            break;
        }
        if !obstacle.cleared {
            obstacle.cleared = true;
            newly_cleared += 1;
        }
    }
    newly_cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::field::Obstacle;

    fn obstacle_at(x: f32, gap_center: f32) -> Obstacle {
        Obstacle {
            x,
            width: OBSTACLE_WIDTH,
            gap_center,
            gap_height: OBSTACLE_GAP_HEIGHT,
            cleared: false,
        }
    }

    fn field_with(obstacles: Vec<Obstacle>) -> ObstacleField {
        let mut field = ObstacleField::new(0, OBSTACLE_GAP_HEIGHT, OBSTACLE_SPACING);
        field.obstacles = obstacles;
        field
    }

    #[test]
    fn test_inside_gap_survives() {
        // Avatar at x=120 overlapping an obstacle, centered in its gap
        let avatar = Avatar::new(120.0, 300.0 - AVATAR_SIZE / 2.0);
        let field = field_with(vec![obstacle_at(130.0, 300.0)]);
        assert_eq!(check_death(&avatar, &field), None);
    }

    #[test]
    fn test_outside_gap_dies() {
        let avatar = Avatar::new(120.0, 50.0);
        let field = field_with(vec![obstacle_at(130.0, 400.0)]);
        assert_eq!(check_death(&avatar, &field), Some(DeathCause::Obstacle));
    }

    #[test]
    fn test_no_horizontal_overlap_no_death() {
        // Same bad altitude, but the obstacle is far ahead
        let avatar = Avatar::new(120.0, 50.0);
        let field = field_with(vec![obstacle_at(500.0, 400.0)]);
        assert_eq!(check_death(&avatar, &field), None);
    }

    #[test]
    fn test_wall_death_top_and_bottom() {
        let mut avatar = Avatar::new(120.0, 0.0);
        avatar.pos.y = -1.0;
        assert_eq!(
            check_death(&avatar, &field_with(vec![])),
            Some(DeathCause::Wall)
        );

        avatar.pos.y = CANVAS_HEIGHT - avatar.size + 1.0;
        assert_eq!(
            check_death(&avatar, &field_with(vec![])),
            Some(DeathCause::Wall)
        );
    }

    #[test]
    fn test_wall_takes_precedence_over_obstacle() {
        // Out of bounds AND outside an overlapping obstacle's gap: the wall
        // is the reported cause
        let mut avatar = Avatar::new(120.0, 0.0);
        avatar.pos.y = -5.0;
        let field = field_with(vec![obstacle_at(130.0, 500.0)]);
        assert_eq!(check_death(&avatar, &field), Some(DeathCause::Wall));
    }

    #[test]
    fn test_boundary_edges_are_alive() {
        // Exactly on the clamp limits is still in play
        let mut avatar = Avatar::new(120.0, 0.0);
        assert_eq!(check_death(&avatar, &field_with(vec![])), None);
        avatar.pos.y = CANVAS_HEIGHT - avatar.size;
        assert_eq!(check_death(&avatar, &field_with(vec![])), None);
    }

    #[test]
    fn test_mark_cleared_once() {
        let avatar = Avatar::new(120.0, 300.0);
        let mut field = field_with(vec![obstacle_at(100.0, 300.0)]);

        assert_eq!(mark_cleared(&avatar, &mut field), 1);
        assert!(field.obstacles[0].cleared);
        // Second pass over the same obstacle scores nothing
        assert_eq!(mark_cleared(&avatar, &mut field), 0);
    }

    #[test]
    fn test_mark_cleared_not_yet_passed() {
        let avatar = Avatar::new(120.0, 300.0);
        let mut field = field_with(vec![obstacle_at(120.0, 300.0)]);
        assert_eq!(mark_cleared(&avatar, &mut field), 0);

        let mut field = field_with(vec![obstacle_at(400.0, 300.0)]);
        assert_eq!(mark_cleared(&avatar, &mut field), 0);
    }

    #[test]
    fn test_mark_cleared_stops_at_first_unpassed() {
        let avatar = Avatar::new(120.0, 300.0);
        let mut field = field_with(vec![
            obstacle_at(-60.0, 300.0),
            obstacle_at(100.0, 300.0),
            obstacle_at(400.0, 300.0),
        ]);
        assert_eq!(mark_cleared(&avatar, &mut field), 2);
        assert!(!field.obstacles[2].cleared);
    }
}
