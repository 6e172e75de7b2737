//! Canvas2D render consumer (wasm only)
//!
//! Reads the simulation state each frame and draws it; performs no mutation.
//! Gameplay never depends on anything in this module.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::GATE_WIDTH;
use crate::sim::{Avatar, GamePhase, GameState, Mode, Obstacle};

const SKY_TOP: &str = "#87CEEB";
const SKY_BOTTOM: &str = "#98FB98";
const DUSK_TOP: &str = "#2B2D4A";
const DUSK_BOTTOM: &str = "#7A4E8C";
const GATE_BODY: &str = "#228B22";
const GATE_CAP: &str = "#006400";
const DRIFTER_BODY: &str = "#B22222";
const AVATAR_BODY: &str = "#FFD700";

/// Draw one frame of the current state
pub fn draw(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let w = state.bounds.width as f64;
    let h = state.bounds.height as f64;

    ctx.clear_rect(0.0, 0.0, w, h);
    draw_background(ctx, state.mode, w, h);

    for obstacle in state.obstacles.iter() {
        draw_obstacle(ctx, obstacle, state.tunables.gap as f64, h);
    }

    if state.phase != GamePhase::Ready {
        draw_avatar(ctx, &state.avatar);
    }

    // Mode-switch veil: fades in and back out over the cinematic window
    if let Some(progress) = state.transition_progress() {
        let alpha = (progress as f64 * std::f64::consts::PI).sin() * 0.8;
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_global_alpha(1.0);
    }
}

fn draw_background(ctx: &CanvasRenderingContext2d, mode: Mode, w: f64, h: f64) {
    let (top, bottom) = match mode {
        Mode::Vertical => (SKY_TOP, SKY_BOTTOM),
        Mode::Lateral => (DUSK_TOP, DUSK_BOTTOM),
    };
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    let _ = gradient.add_color_stop(0.0, top);
    let _ = gradient.add_color_stop(1.0, bottom);
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_obstacle(ctx: &CanvasRenderingContext2d, obstacle: &Obstacle, gap: f64, field_h: f64) {
    match *obstacle {
        Obstacle::Gate { x, gap_y, .. } => {
            let x = x as f64;
            let gap_y = gap_y as f64;
            let width = GATE_WIDTH as f64;

            ctx.set_fill_style_str(GATE_BODY);
            ctx.fill_rect(x, 0.0, width, gap_y);
            ctx.fill_rect(x, gap_y + gap, width, field_h - gap_y - gap);

            ctx.set_fill_style_str(GATE_CAP);
            ctx.fill_rect(x - 5.0, gap_y - 20.0, width + 10.0, 20.0);
            ctx.fill_rect(x - 5.0, gap_y + gap, width + 10.0, 20.0);
        }
        Obstacle::Drifter { x, y, radius, .. } => {
            ctx.set_fill_style_str(DRIFTER_BODY);
            ctx.begin_path();
            let _ = ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU);
            ctx.fill();
        }
    }
}

fn draw_avatar(ctx: &CanvasRenderingContext2d, avatar: &Avatar) {
    let w = Avatar::WIDTH as f64;
    let h = Avatar::HEIGHT as f64;
    let cx = avatar.x as f64 + w / 2.0;
    let cy = avatar.y as f64 + h / 2.0;

    ctx.save();
    let _ = ctx.translate(cx, cy);
    let _ = ctx.rotate((avatar.rotation as f64).to_radians());

    ctx.set_fill_style_str(AVATAR_BODY);
    ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
    ctx.set_fill_style_str("#000000");
    ctx.fill_rect(-w / 2.0 + 5.0, -h / 2.0 + 5.0, 8.0, 8.0);

    ctx.restore();
}
