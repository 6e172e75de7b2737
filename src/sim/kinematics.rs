//! Per-mode avatar motion laws and boundary checks

use super::state::{Avatar, FieldBounds, Mode, Tunables};
use crate::consts::*;

/// Result of one kinematics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Avatar remains inside the field
    InBounds,
    /// Avatar breached a lethal boundary; the run ends
    Breached,
}

/// Apply an activate impulse
///
/// Vertical mode: a fixed upward kick with the tilt snapped back.
/// Lateral mode: a fixed rightward thrust.
pub fn apply_impulse(avatar: &mut Avatar, mode: Mode, tunables: &Tunables) {
    match mode {
        Mode::Vertical => {
            avatar.vy = tunables.impulse;
            avatar.rotation = ROTATION_MIN;
        }
        Mode::Lateral => {
            avatar.vx = tunables.impulse;
        }
    }
}

/// Advance the avatar by one tick under the mode's motion law
#[must_use]
pub fn step(
    avatar: &mut Avatar,
    mode: Mode,
    tunables: &Tunables,
    bounds: &FieldBounds,
) -> StepOutcome {
    match mode {
        Mode::Vertical => {
            avatar.vy += tunables.gravity;
            avatar.y += avatar.vy;

            // Tilt follows the velocity sign: nose up while rising,
            // pitching down while falling
            avatar.rotation += if avatar.vy > 0.0 { 3.0 } else { -2.0 };
            avatar.rotation = avatar.rotation.clamp(ROTATION_MIN, ROTATION_MAX);

            // Ceiling clamps, floor kills
            if avatar.y < 0.0 {
                avatar.y = 0.0;
                avatar.vy = 0.0;
            }
            if avatar.y + Avatar::HEIGHT > bounds.height {
                return StepOutcome::Breached;
            }
        }
        Mode::Lateral => {
            // Lateral gravity: thrust decays, then drags the avatar back left
            avatar.vx -= tunables.gravity;
            avatar.x += avatar.vx;
            avatar.rotation = if avatar.vx >= 0.0 {
                -ROTATION_MIN
            } else {
                ROTATION_MIN
            };

            // Stay pinned to the dodge lane
            avatar.y = bounds.lateral_lane();

            if avatar.x < 0.0 || avatar.x + Avatar::WIDTH > bounds.width {
                return StepOutcome::Breached;
            }
        }
    }
    StepOutcome::InBounds
}
