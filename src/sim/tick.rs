//! Fixed timestep session update
//!
//! The single entry point the frame driver calls. Dispatches on the session
//! phase and, while Playing, runs the per-tick pipeline: avatar kinematics,
//! obstacle spawn/advance/recycle/score, collision, then mode-switch
//! eligibility.

use super::collision::collides;
use super::kinematics::{self, StepOutcome};
use super::spawn;
use super::state::{Avatar, GamePhase, GameState, Transition, Tunables};

/// Input for a single tick
///
/// One-shot: the frame driver sets `activate` when an input event arrived
/// since the last tick and clears it after the tick runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump / thrust / start / restart, depending on the session phase
    pub activate: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Ready => {
            if input.activate {
                state.start_run();
            }
        }
        GamePhase::GameOver => {
            if input.activate {
                state.reset_to_ready();
            }
        }
        GamePhase::Playing => playing_tick(state, input),
    }
}

fn playing_tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    let now = state.time_ticks;

    // Retire an expired transition. The deadline is checked every tick
    // against the state-owned counter, so there is no unmanaged timer to
    // cancel; replacing `state.transition` is the cancel-and-replace policy.
    if state.transition.is_some_and(|t| t.finished(now)) {
        state.transition = None;
    }
    let suspended = state.spawning_suspended();

    // All activate input is withheld while spawning is suspended
    if input.activate && !suspended {
        kinematics::apply_impulse(&mut state.avatar, state.mode, &state.tunables);
    }

    let outcome = kinematics::step(&mut state.avatar, state.mode, &state.tunables, &state.bounds);

    // Existing obstacles keep moving and scoring during suspension; only
    // new spawns are withheld
    if !suspended {
        state
            .obstacles
            .maybe_spawn(state.mode, &mut state.rng, &state.bounds, &state.tunables);
    }
    state.obstacles.advance(&state.tunables);
    state.obstacles.recycle(&state.bounds);
    let newly_passed = state.obstacles.score_passes(&state.avatar);
    state.score += newly_passed;

    // Collision is judged before any mode switch this tick, so switch setup
    // can never shadow a lethal state
    let hit = state
        .obstacles
        .iter()
        .any(|o| collides(&state.avatar, o, &state.tunables));
    if outcome == StepOutcome::Breached || hit {
        state.end_run();
        return;
    }

    if newly_passed > 0 && switch_eligible(state) {
        switch_mode(state);
    }
}

/// Whether an automatic mode switch triggers at the current score
fn switch_eligible(state: &GameState) -> bool {
    state.phase == GamePhase::Playing
        && state.transition.is_none()
        && !state.config.force_lateral
        && state.score >= state.next_switch_score
        && state.score > state.last_switch_score
}

/// Flip the mode mid-run
///
/// Resets the avatar to the new mode's defaults, installs the new mode's
/// tunables, clears and reseeds the obstacle collection, redraws the switch
/// threshold for the mode being entered, and starts the timed transition
/// with spawning suspended.
fn switch_mode(state: &mut GameState) {
    let target = state.mode.flipped();
    state.mode = target;
    state.tunables = Tunables::preset(target, state.motion_scale());
    state.avatar = Avatar::reset_for(target, &state.bounds);
    state
        .obstacles
        .reseed(target, &mut state.rng, &state.bounds, &state.tunables);
    state.last_switch_score = state.score;
    state.next_switch_score = state.score + spawn::switch_threshold(&mut state.rng, target);
    state.transition = Some(Transition::begin(target, state.time_ticks));
    log::info!(
        "mode switch -> {} at score {}, next at {}",
        target.as_str(),
        state.score,
        state.next_switch_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::field::Obstacle;
    use crate::sim::state::{Config, FieldBounds, Mode};

    const ACTIVATE: TickInput = TickInput { activate: true };
    const COAST: TickInput = TickInput { activate: false };

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, FieldBounds::default(), Config::default());
        state.start_run();
        state
    }

    /// A gate already left of the avatar's column: scores on the next tick,
    /// can never collide
    fn pass_ready_gate() -> Obstacle {
        Obstacle::Gate {
            x: 15.0,
            gap_y: 200.0,
            passed: false,
        }
    }

    #[test]
    fn test_phase_cycle_on_activate() {
        let mut state = GameState::new(3, FieldBounds::default(), Config::default());
        assert_eq!(state.phase, GamePhase::Ready);

        tick(&mut state, &COAST);
        assert_eq!(state.phase, GamePhase::Ready);

        tick(&mut state, &ACTIVATE);
        assert_eq!(state.phase, GamePhase::Playing);

        // Coast into the floor
        while state.phase == GamePhase::Playing {
            tick(&mut state, &COAST);
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &ACTIVATE);
        assert_eq!(state.phase, GamePhase::Ready);
    }

    #[test]
    fn test_score_counts_passes_exactly_once() {
        let mut state = playing_state(5);
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());
        state.obstacles.push(Obstacle::Gate {
            x: -10.0,
            gap_y: 250.0,
            passed: false,
        });

        tick(&mut state, &COAST);
        assert_eq!(state.score, 2);

        // Those gates are done; score only moves for new passes
        let score_after = state.score;
        for _ in 0..5 {
            tick(&mut state, &ACTIVATE);
            assert!(state.score >= score_after);
        }
        assert_eq!(state.score, score_after);
    }

    #[test]
    fn test_switch_fires_exactly_once_at_threshold() {
        let mut state = playing_state(8);
        state.next_switch_score = 1;
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());

        tick(&mut state, &COAST);
        assert_eq!(state.score, 1);
        assert_eq!(state.mode, Mode::Lateral);
        assert_eq!(state.last_switch_score, 1);
        assert!(
            (14..=25).contains(&state.next_switch_score),
            "threshold redrawn from the lateral range on top of the score"
        );
        assert!(state.transition.is_some());
        assert!(state.spawning_suspended());
        assert_eq!(state.avatar.y, state.bounds.lateral_lane());
        assert!(
            state
                .obstacles
                .iter()
                .all(|o| matches!(o, Obstacle::Drifter { .. })),
            "collection reseeded for the new mode"
        );

        // No re-entry: the transition in flight blocks further switches
        let mode_after = state.mode;
        tick(&mut state, &COAST);
        assert_eq!(state.mode, mode_after);
        assert_eq!(state.last_switch_score, 1);
    }

    #[test]
    fn test_suspension_withholds_spawns_and_input_only() {
        let mut state = playing_state(8);
        state.next_switch_score = 1;
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());
        tick(&mut state, &COAST);
        assert!(state.spawning_suspended());

        // A leftover gate far left of the lateral avatar: passes during
        // suspension, proving scoring still runs
        state.obstacles.push(Obstacle::Gate {
            x: 15.0,
            gap_y: 200.0,
            passed: false,
        });

        let len_before = state.obstacles.len();
        let score_before = state.score;
        let x_before = state.avatar.x;
        while state.spawning_suspended() {
            tick(&mut state, &ACTIVATE);
            assert!(state.obstacles.len() <= len_before, "no spawns while suspended");
            // Thrust would set vx positive; lateral gravity only drags it down
            assert!(state.avatar.vx <= 0.0, "activate input is ignored");
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.score > score_before, "scoring kept running");
        assert_ne!(state.avatar.x, x_before, "kinematics kept running");

        // Once suspension lifts, an empty field respawns immediately
        state.obstacles.clear();
        tick(&mut state, &ACTIVATE);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.avatar.vx > 0.0, "input accepted again");
    }

    #[test]
    fn test_breach_is_not_shadowed_by_switch_setup() {
        let mut state = playing_state(13);
        state.next_switch_score = 1;
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());

        // Avatar breaches the floor on the same tick the pass would trigger
        // a switch; the breach must win
        state.avatar.y = state.bounds.height - 31.0;
        state.avatar.vy = 5.0;
        tick(&mut state, &COAST);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.mode, Mode::Vertical, "no switch happened");
        assert!(state.transition.is_none());
    }

    #[test]
    fn test_restart_resets_run_but_keeps_best() {
        let mut state = playing_state(21);
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());
        tick(&mut state, &COAST);
        assert_eq!(state.score, 1);

        while state.phase == GamePhase::Playing {
            tick(&mut state, &COAST);
        }
        assert_eq!(state.best_score, 1);

        tick(&mut state, &ACTIVATE); // GameOver -> Ready
        tick(&mut state, &ACTIVATE); // Ready -> Playing
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.mode, Mode::Vertical);
        assert_eq!(state.best_score, 1);
        assert_eq!(state.obstacles.len(), 1, "collection reseeded");
        assert!(state.transition.is_none());
    }

    #[test]
    fn test_force_lateral_disables_auto_switch() {
        let config = Config {
            force_lateral: true,
            ..Default::default()
        };
        let mut state = GameState::new(9, FieldBounds::default(), config);
        state.start_run();
        assert_eq!(state.mode, Mode::Lateral);

        state.next_switch_score = 1;
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());
        tick(&mut state, &COAST);
        assert_eq!(state.score, 1);
        assert_eq!(state.mode, Mode::Lateral, "override pins the mode");
        assert!(state.transition.is_none());
    }

    #[test]
    fn test_score_is_monotonic_while_playing() {
        let mut state = playing_state(77);
        let mut last = state.score;
        for i in 0..2000 {
            // Naive hover: flap whenever falling
            let input = TickInput {
                activate: state.avatar.vy > 0.0,
            };
            tick(&mut state, &input);
            assert!(state.score >= last, "score regressed at tick {i}");
            last = state.score;
            if state.phase != GamePhase::Playing {
                break;
            }
        }
    }

    #[test]
    fn test_determinism_per_seed() {
        let mut a = playing_state(4242);
        let mut b = playing_state(4242);
        for i in 0..500 {
            let input = TickInput {
                activate: i % 11 == 0,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.avatar.y, b.avatar.y);
        assert_eq!(a.next_switch_score, b.next_switch_score);
    }

    #[test]
    fn test_suspension_window_matches_consts() {
        let mut state = playing_state(8);
        state.next_switch_score = 1;
        state.obstacles.clear();
        state.obstacles.push(pass_ready_gate());
        tick(&mut state, &COAST);
        let started = state.time_ticks;

        let mut suspended_ticks = 0;
        while state.spawning_suspended() {
            tick(&mut state, &COAST);
            suspended_ticks += 1;
            assert!(suspended_ticks <= SWITCH_SUSPEND_TICKS + 1, "suspension never lifted");
        }
        assert_eq!(state.time_ticks - started, SWITCH_SUSPEND_TICKS as u64);

        // The cinematic timer outlives the suspension, then expires
        assert!(state.transition.is_some());
        while state.transition.is_some() && state.phase == GamePhase::Playing {
            tick(&mut state, &COAST);
        }
        assert!(
            state.phase == GamePhase::GameOver || state.transition.is_none(),
            "transition retired by its own deadline"
        );
    }
}
