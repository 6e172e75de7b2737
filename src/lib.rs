//! Skyshift - a mode-shifting arcade avoider
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, mode switching)
//! - `render`: Canvas2D render consumer (wasm only, read-only)
//! - `settings`: User preferences (reduced motion, debug overrides)
//! - `bestscore`: Single persisted best-score value

pub mod bestscore;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use bestscore::BestScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Motion constants are per-tick (pixels/tick, pixels/tick²) at a fixed
/// 60 Hz simulation rate, matching the frame-locked feel of the original.
pub mod consts {
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const TICK_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default field dimensions (overridden by canvas size on wasm)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Avatar dimensions and vertical-mode home column
    pub const AVATAR_WIDTH: f32 = 30.0;
    pub const AVATAR_HEIGHT: f32 = 30.0;
    pub const AVATAR_HOME_X: f32 = 80.0;
    /// Distance of the lateral-mode lane above the bottom edge
    pub const LATERAL_LANE_MARGIN: f32 = 100.0;

    /// Avatar rotation limits (degrees)
    pub const ROTATION_MIN: f32 = -20.0;
    pub const ROTATION_MAX: f32 = 90.0;

    /// Gate (vertical-mode obstacle) width
    pub const GATE_WIDTH: f32 = 60.0;
    /// Minimum center distance between live drifters at spawn time
    pub const DRIFTER_MIN_SEPARATION: f32 = 200.0;
    /// A new drifter may spawn once the newest has fallen past this y
    pub const DRIFTER_SPAWN_FOLLOW_Y: f32 = -200.0;

    /// Obstacle spawning (and activate input) stays suspended for this long
    /// after a mode switch; short enough that the avatar can recover on the
    /// first input after it lifts
    pub const SWITCH_SUSPEND_TICKS: u32 = 24; // 400 ms
    /// Full cinematic transition window (render fade), independent timer
    pub const SWITCH_TRANSITION_TICKS: u32 = 90; // 1500 ms

    /// Motion multiplier applied when reduced motion is requested
    pub const REDUCED_MOTION_SCALE: f32 = 0.6;
}
