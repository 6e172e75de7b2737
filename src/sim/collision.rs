//! Pure collision predicates between the avatar and each obstacle variant

use super::field::Obstacle;
use super::state::{Avatar, Tunables};
use crate::consts::*;

/// Whether the avatar intersects the given obstacle
///
/// Gates: axis-aligned span overlap against either barrier of the pair.
/// Drifters: circle test against the avatar's center, padded by its
/// half-width. Total over all well-formed input; any true result ends the
/// run immediately.
pub fn collides(avatar: &Avatar, obstacle: &Obstacle, tunables: &Tunables) -> bool {
    match *obstacle {
        Obstacle::Gate { x, gap_y, .. } => {
            let horizontal_overlap =
                avatar.x < x + GATE_WIDTH && avatar.x + Avatar::WIDTH > x;
            if !horizontal_overlap {
                return false;
            }
            let above_gap = avatar.y < gap_y;
            let below_gap = avatar.y + Avatar::HEIGHT > gap_y + tunables.gap;
            above_gap || below_gap
        }
        Obstacle::Drifter { x, y, radius, .. } => {
            let center = glam::Vec2::new(x, y);
            avatar.center().distance(center) < radius + Avatar::WIDTH / 2.0
        }
    }
}
