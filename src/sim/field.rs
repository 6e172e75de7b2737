//! The live obstacle collection: spawn policy, advancement, recycling,
//! and pass detection

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{Avatar, FieldBounds, Mode, Tunables};
use crate::consts::*;

/// A single obstacle
///
/// Closed tagged variant with exhaustive handling everywhere it is
/// processed; a partially-initialized or unknown obstacle is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Obstacle {
    /// Vertical-mode gate: a barrier pair scrolling left with a passable gap
    /// spanning `gap_y..gap_y + gap`
    Gate { x: f32, gap_y: f32, passed: bool },
    /// Lateral-mode hazard: a circle falling from above
    Drifter {
        x: f32,
        y: f32,
        radius: f32,
        passed: bool,
    },
}

impl Obstacle {
    pub fn passed(&self) -> bool {
        match *self {
            Obstacle::Gate { passed, .. } => passed,
            Obstacle::Drifter { passed, .. } => passed,
        }
    }
}

/// Owns the active obstacles and the spawn policy for both modes
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Inject an obstacle directly, bypassing the spawn policy (tests only)
    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Clear the collection and immediately seed it for the given mode
    /// (run start and mode switch)
    pub fn reseed<R: Rng>(
        &mut self,
        mode: Mode,
        rng: &mut R,
        bounds: &FieldBounds,
        tunables: &Tunables,
    ) {
        self.obstacles.clear();
        match mode {
            Mode::Vertical => self.spawn_gate(rng, bounds, tunables),
            Mode::Lateral => {
                // The separation check is against an empty set, so the first
                // candidate always lands
                self.try_spawn_drifter(rng, bounds);
            }
        }
    }

    /// Spawn one obstacle if the mode's trigger condition holds
    ///
    /// Must not be called while a transition has spawning suspended; the
    /// caller gates on that.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        mode: Mode,
        rng: &mut R,
        bounds: &FieldBounds,
        tunables: &Tunables,
    ) {
        match mode {
            Mode::Vertical => {
                let due = match self.obstacles.last() {
                    None => true,
                    Some(Obstacle::Gate { x, .. }) => *x < bounds.width - tunables.spawn_spacing,
                    Some(Obstacle::Drifter { .. }) => true,
                };
                if due {
                    self.spawn_gate(rng, bounds, tunables);
                }
            }
            Mode::Lateral => {
                let due = match self.obstacles.last() {
                    None => true,
                    Some(Obstacle::Drifter { y, .. }) => *y > DRIFTER_SPAWN_FOLLOW_Y,
                    Some(Obstacle::Gate { .. }) => true,
                };
                if due {
                    self.try_spawn_drifter(rng, bounds);
                }
            }
        }
    }

    fn spawn_gate<R: Rng>(&mut self, rng: &mut R, bounds: &FieldBounds, tunables: &Tunables) {
        let gap_y = spawn::gate_gap_y(rng, bounds, tunables.gap);
        self.obstacles.push(Obstacle::Gate {
            x: bounds.width,
            gap_y,
            passed: false,
        });
    }

    /// Drifter spawns are rejected (a no-op, not a retry) when the candidate
    /// lands within the minimum separation of any live drifter
    fn try_spawn_drifter<R: Rng>(&mut self, rng: &mut R, bounds: &FieldBounds) {
        let (x, y, radius) = spawn::drifter_candidate(rng, bounds);
        let candidate = Vec2::new(x, y);
        let too_close = self.obstacles.iter().any(|o| match *o {
            Obstacle::Drifter { x, y, .. } => {
                candidate.distance(Vec2::new(x, y)) < DRIFTER_MIN_SEPARATION
            }
            Obstacle::Gate { .. } => false,
        });
        if !too_close {
            self.obstacles.push(Obstacle::Drifter {
                x,
                y,
                radius,
                passed: false,
            });
        }
    }

    /// Move every live obstacle one tick along its travel axis
    pub fn advance(&mut self, tunables: &Tunables) {
        for obstacle in &mut self.obstacles {
            match obstacle {
                Obstacle::Gate { x, .. } => *x -= tunables.scroll_speed,
                Obstacle::Drifter { y, .. } => *y += tunables.scroll_speed,
            }
        }
    }

    /// Drop obstacles that have fully exited the field in their travel
    /// direction
    pub fn recycle(&mut self, bounds: &FieldBounds) {
        self.obstacles.retain(|o| match *o {
            Obstacle::Gate { x, .. } => x + GATE_WIDTH >= 0.0,
            Obstacle::Drifter { y, radius, .. } => y - radius <= bounds.height,
        });
    }

    /// Flip `passed` for obstacles whose trailing edge has cleared the avatar
    /// along the travel axis; returns how many flipped this tick
    ///
    /// `passed` transitions false -> true exactly once per obstacle. Only
    /// called while the session is Playing.
    pub fn score_passes(&mut self, avatar: &Avatar) -> u32 {
        let mut newly_passed = 0;
        for obstacle in &mut self.obstacles {
            match obstacle {
                Obstacle::Gate { x, passed, .. } => {
                    if !*passed && *x + GATE_WIDTH < avatar.x {
                        *passed = true;
                        newly_passed += 1;
                    }
                }
                Obstacle::Drifter {
                    y, radius, passed, ..
                } => {
                    if !*passed && *y - *radius > avatar.y + Avatar::HEIGHT {
                        *passed = true;
                        newly_passed += 1;
                    }
                }
            }
        }
        newly_passed
    }
}
