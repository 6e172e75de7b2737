//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by `GameState`
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod kinematics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use field::{Obstacle, ObstacleField};
pub use kinematics::StepOutcome;
pub use state::{
    Avatar, Config, FieldBounds, GamePhase, GameState, Mode, Transition, Tunables,
};
pub use tick::{TickInput, tick};
