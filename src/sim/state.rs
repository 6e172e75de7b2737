//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::field::ObstacleField;
use super::spawn;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen for an activate input
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended on collision or boundary breach
    GameOver,
}

/// The two avatar-control schemes a run can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Gravity pulls down, obstacles are gates scrolling in from the right
    Vertical,
    /// Thrust pushes right, obstacles are drifters falling from above
    Lateral,
}

impl Mode {
    pub fn flipped(self) -> Self {
        match self {
            Mode::Vertical => Mode::Lateral,
            Mode::Lateral => Mode::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Vertical => "vertical",
            Mode::Lateral => "lateral",
        }
    }
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl FieldBounds {
    /// The y coordinate of the avatar's fixed lane in lateral mode
    pub fn lateral_lane(&self) -> f32 {
        self.height - LATERAL_LANE_MARGIN
    }
}

/// The player avatar
///
/// Fixed 30x30 size; `(x, y)` is the top-left corner. `vy` drives vertical
/// mode, `vx` drives lateral mode; the inactive axis stays zero.
#[derive(Debug, Clone, Copy)]
pub struct Avatar {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Tilt in degrees, clamped to [ROTATION_MIN, ROTATION_MAX]
    pub rotation: f32,
}

impl Avatar {
    pub const WIDTH: f32 = AVATAR_WIDTH;
    pub const HEIGHT: f32 = AVATAR_HEIGHT;

    /// Mode-appropriate defaults, applied on start, restart, and mode switch
    pub fn reset_for(mode: Mode, bounds: &FieldBounds) -> Self {
        match mode {
            Mode::Vertical => Self {
                x: AVATAR_HOME_X,
                y: bounds.height / 2.0,
                vx: 0.0,
                vy: 0.0,
                rotation: 0.0,
            },
            Mode::Lateral => Self {
                x: (bounds.width - Self::WIDTH) / 2.0,
                y: bounds.lateral_lane(),
                vx: 0.0,
                vy: 0.0,
                rotation: 0.0,
            },
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + Self::WIDTH / 2.0, self.y + Self::HEIGHT / 2.0)
    }
}

/// Per-mode motion and obstacle presets
///
/// Values are per-tick units. Built via [`Tunables::preset`], which applies
/// the reduced-motion multiplier exactly once.
#[derive(Debug, Clone, Copy)]
pub struct Tunables {
    /// Acceleration opposing the impulse axis (px/tick²)
    pub gravity: f32,
    /// Velocity set by an activate input: upward (negative) in vertical mode,
    /// rightward (positive) in lateral mode (px/tick)
    pub impulse: f32,
    /// Obstacle travel speed along its axis (px/tick)
    pub scroll_speed: f32,
    /// Gate gap height (vertical mode)
    pub gap: f32,
    /// Horizontal distance between consecutive gates (vertical mode)
    pub spawn_spacing: f32,
}

impl Tunables {
    pub fn preset(mode: Mode, motion_scale: f32) -> Self {
        match mode {
            Mode::Vertical => Self {
                gravity: 0.5 * motion_scale,
                impulse: -8.0 * motion_scale,
                scroll_speed: 2.0 * motion_scale,
                gap: 150.0,
                spawn_spacing: 200.0,
            },
            Mode::Lateral => Self {
                gravity: 0.12 * motion_scale,
                impulse: 5.0 * motion_scale,
                scroll_speed: 3.0 * motion_scale,
                gap: 150.0,
                spawn_spacing: 200.0,
            },
        }
    }
}

/// Environment profile and debug overrides, read once at construction
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Scale gravity, impulse, and obstacle speed for constrained environments
    pub reduced_motion: bool,
    /// Debug: start every run in lateral mode and never auto-switch
    pub force_lateral: bool,
}

/// An in-flight mode switch
///
/// Deadlines are absolute tick counts. Spawning stays suspended until
/// `spawn_resume_at`; the cinematic window runs until `ends_at`. The two
/// timers are independent. Stored as `Option<Transition>` on the state, so
/// starting a new transition or resetting the session replaces/clears it
/// wholesale - a stale transition can never fire.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub target_mode: Mode,
    pub started_at: u64,
    pub spawn_resume_at: u64,
    pub ends_at: u64,
}

impl Transition {
    pub fn begin(target_mode: Mode, now: u64) -> Self {
        Self {
            target_mode,
            started_at: now,
            spawn_resume_at: now + SWITCH_SUSPEND_TICKS as u64,
            ends_at: now + SWITCH_TRANSITION_TICKS as u64,
        }
    }

    /// Whether obstacle spawning (and activate input) is still withheld
    pub fn spawning_suspended(&self, now: u64) -> bool {
        now < self.spawn_resume_at
    }

    pub fn finished(&self, now: u64) -> bool {
        now >= self.ends_at
    }

    /// Cinematic progress in [0, 1]
    pub fn progress(&self, now: u64) -> f32 {
        let span = (self.ends_at - self.started_at) as f32;
        ((now - self.started_at) as f32 / span).clamp(0.0, 1.0)
    }
}

/// Complete session state
///
/// Owns everything mutated by the per-tick update: the avatar, the live
/// obstacle collection, the score counters, and the RNG every random draw
/// flows through.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub mode: Mode,
    pub score: u32,
    /// Monotonic max over ended runs; persisted externally
    pub best_score: u32,
    /// Simulation tick counter, reset on run start
    pub time_ticks: u64,
    pub bounds: FieldBounds,
    pub avatar: Avatar,
    pub obstacles: ObstacleField,
    pub tunables: Tunables,
    /// In-flight mode switch, if any
    pub transition: Option<Transition>,
    /// Score at which the next automatic mode switch triggers
    pub next_switch_score: u32,
    /// Score at which the previous switch triggered (0 before the first)
    pub last_switch_score: u32,
    pub config: Config,
}

impl GameState {
    /// Create a new session in the Ready phase
    pub fn new(seed: u64, bounds: FieldBounds, config: Config) -> Self {
        let mode = if config.force_lateral {
            Mode::Lateral
        } else {
            Mode::Vertical
        };
        let motion_scale = if config.reduced_motion {
            REDUCED_MOTION_SCALE
        } else {
            1.0
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            mode,
            score: 0,
            best_score: 0,
            time_ticks: 0,
            bounds,
            avatar: Avatar::reset_for(mode, &bounds),
            obstacles: ObstacleField::new(),
            tunables: Tunables::preset(mode, motion_scale),
            transition: None,
            next_switch_score: 0,
            last_switch_score: 0,
            config,
        }
    }

    pub fn motion_scale(&self) -> f32 {
        if self.config.reduced_motion {
            REDUCED_MOTION_SCALE
        } else {
            1.0
        }
    }

    /// Begin a run: Ready -> Playing
    ///
    /// Resets score, mode, avatar, and the obstacle collection
    /// (cleared then reseeded), and redraws the switch threshold.
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.time_ticks = 0;
        self.mode = if self.config.force_lateral {
            Mode::Lateral
        } else {
            Mode::Vertical
        };
        self.tunables = Tunables::preset(self.mode, self.motion_scale());
        self.avatar = Avatar::reset_for(self.mode, &self.bounds);
        self.transition = None;
        self.last_switch_score = 0;
        self.next_switch_score = spawn::switch_threshold(&mut self.rng, self.mode);
        self.obstacles
            .reseed(self.mode, &mut self.rng, &self.bounds, &self.tunables);
        log::info!(
            "run started: mode={}, first switch at {}",
            self.mode.as_str(),
            self.next_switch_score
        );
    }

    /// End a run: Playing -> GameOver; updates the best score
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.transition = None;
        if self.score > self.best_score {
            self.best_score = self.score;
            log::info!("run ended: score={} (new best)", self.score);
        } else {
            log::info!("run ended: score={}", self.score);
        }
    }

    /// Return to the start screen: GameOver -> Ready
    pub fn reset_to_ready(&mut self) {
        self.phase = GamePhase::Ready;
        self.mode = if self.config.force_lateral {
            Mode::Lateral
        } else {
            Mode::Vertical
        };
        self.avatar = Avatar::reset_for(self.mode, &self.bounds);
        self.obstacles.clear();
        self.transition = None;
    }

    /// Whether obstacle spawning and activate input are currently withheld
    pub fn spawning_suspended(&self) -> bool {
        self.transition
            .is_some_and(|t| t.spawning_suspended(self.time_ticks))
    }

    /// Cinematic transition progress for the render consumer
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition.map(|t| t.progress(self.time_ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_ready_in_vertical_mode() {
        let state = GameState::new(7, FieldBounds::default(), Config::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.mode, Mode::Vertical);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_force_lateral_override() {
        let config = Config {
            force_lateral: true,
            ..Default::default()
        };
        let mut state = GameState::new(7, FieldBounds::default(), config);
        assert_eq!(state.mode, Mode::Lateral);
        state.start_run();
        assert_eq!(state.mode, Mode::Lateral);
    }

    #[test]
    fn test_start_run_reseeds_obstacles_and_draws_threshold() {
        let mut state = GameState::new(42, FieldBounds::default(), Config::default());
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 1);
        assert!((10..=17).contains(&state.next_switch_score));
        assert_eq!(state.last_switch_score, 0);
    }

    #[test]
    fn test_end_run_updates_best_monotonically() {
        let mut state = GameState::new(42, FieldBounds::default(), Config::default());
        state.start_run();
        state.score = 12;
        state.end_run();
        assert_eq!(state.best_score, 12);

        state.reset_to_ready();
        state.start_run();
        state.score = 5;
        state.end_run();
        assert_eq!(state.best_score, 12, "best score never decreases");
    }

    #[test]
    fn test_reduced_motion_scales_presets() {
        let config = Config {
            reduced_motion: true,
            ..Default::default()
        };
        let state = GameState::new(1, FieldBounds::default(), config);
        let full = Tunables::preset(Mode::Vertical, 1.0);
        assert!(state.tunables.gravity < full.gravity);
        assert!(state.tunables.impulse > full.impulse); // less negative
        assert!(state.tunables.scroll_speed < full.scroll_speed);
        // Geometry is not motion; it stays fixed
        assert_eq!(state.tunables.gap, full.gap);
    }

    #[test]
    fn test_transition_timers_are_independent() {
        let t = Transition::begin(Mode::Lateral, 100);
        assert!(t.spawning_suspended(100));
        assert!(t.spawning_suspended(123));
        assert!(!t.spawning_suspended(124), "suspension lifts first");
        assert!(!t.finished(124), "cinematic window is still running");
        assert!(t.finished(190));
        assert_eq!(t.progress(100), 0.0);
        assert_eq!(t.progress(190), 1.0);
    }
}
