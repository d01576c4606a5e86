use bevy::prelude::*;
use std::f32::consts::PI;

use crate::core::components::Agent;
use crate::core::config::config::AgentConfig;
use crate::core::config::IntroConfig;
use crate::field::FieldViewport;
use crate::rendering::palette::palette::{boosted, AGENT_COLORS, AGENT_HEAD_COLOR};

/// Monotonic animation clock, advanced by a fixed step each frame. Reset to
/// zero when the field is rebuilt on resize.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FieldClock {
    pub t: f32,
}

/// Position on the Lissajous path for a given phase and clock value: the x
/// and y oscillators run at 1x and 2x the phase offset, tracing the
/// figure-eight sweep both agents share from opposite sides.
pub fn agent_position(phase: f32, t: f32, radii: Vec2) -> Vec2 {
    Vec2::new(
        (phase + t).cos() * radii.x,
        (2.0 * phase + t).sin() * radii.y,
    )
}

/// Ellipse radii derived from the viewport.
pub fn ellipse_radii(viewport: Vec2, cfg: &AgentConfig) -> Vec2 {
    Vec2::new(
        viewport.x * cfg.radius_x_frac,
        viewport.y * cfg.radius_y_frac,
    )
}

/// Exactly two agents, phases 0 and pi, one per stream color. The entity's
/// sprite is the bright head; the trail is drawn from history each frame.
pub fn spawn_agents(commands: &mut Commands, cfg: &AgentConfig) {
    for (i, color) in AGENT_COLORS.iter().enumerate() {
        commands.spawn((
            Agent::new(i as f32 * PI, *color),
            Sprite {
                color: boosted(AGENT_HEAD_COLOR, cfg.glow_boost),
                custom_size: Some(Vec2::splat(cfg.head_radius * 2.0)),
                ..default()
            },
            Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)),
        ));
    }
}

/// Advance the clock, move each agent along its path and record the new
/// position in its bounded history.
pub fn advance_agents(
    mut clock: ResMut<FieldClock>,
    cfg: Res<IntroConfig>,
    viewport: Res<FieldViewport>,
    mut q_agents: Query<(&mut Agent, &mut Transform)>,
) {
    clock.t += cfg.agents.time_step;
    let radii = ellipse_radii(viewport.size, &cfg.agents);
    let limit = cfg.agents.history_limit;
    for (mut agent, mut tf) in q_agents.iter_mut() {
        let pos = agent_position(agent.phase, clock.t, radii);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        agent.push_history(pos, limit);
    }
}

/// Stroke each agent's history as a polyline whose alpha decays with sample
/// age, plus a halo ring at the head. HDR colors let bloom supply the glow.
pub fn draw_trails(
    cfg: Res<IntroConfig>,
    mut gizmos: Gizmos,
    q_agents: Query<(&Agent, &Transform)>,
) {
    for (agent, tf) in &q_agents {
        let glow = boosted(agent.color, cfg.agents.glow_boost);
        let n = agent.history.len();
        if n >= 2 {
            gizmos.linestrip_gradient_2d(agent.history.iter().enumerate().map(|(i, p)| {
                let age = (n - 1 - i) as f32;
                (*p, glow.with_alpha(cfg.agents.fade_retain.powf(age)))
            }));
        }
        gizmos.circle_2d(tf.translation.truncate(), cfg.agents.head_radius, glow);
    }
}
