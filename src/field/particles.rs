use bevy::prelude::*;
use rand::Rng;

use crate::core::components::{Agent, Particle};
use crate::core::config::config::FieldConfig;
use crate::core::config::IntroConfig;
use crate::field::mask::{mask_to_world, rasterize_text_mask, sample_mask};
use crate::field::pointer::PointerState;
use crate::rendering::palette::palette::{boosted, random_particle_color};

/// One frame of pointer repulsion. Returns `None` when the particle is
/// outside the interaction radius. Inside it, displacement scales with
/// (radius - d) / radius, so proximity means a stronger push.
pub fn repel_step(pos: Vec2, pointer: Vec2, radius: f32, gain: f32) -> Option<Vec2> {
    let delta = pointer - pos;
    let distance = delta.length();
    if distance >= radius {
        return None;
    }
    let force = (radius - distance) / radius;
    // A particle exactly under the pointer still has to move somewhere.
    let dir = if distance > 1e-4 { delta / distance } else { Vec2::X };
    Some(pos - dir * force * gain)
}

/// One frame of relaxation toward the glyph base: recover 1/divisor of the
/// offset. Exponential decay; converges without ever overshooting.
pub fn relax_step(pos: Vec2, base: Vec2, divisor: f32) -> Vec2 {
    pos - (pos - base) / divisor
}

/// Rasterize the configured text, sample the mask, and spawn one particle per
/// accepted sample with a random start anywhere in the viewport. Returns the
/// spawn count. No font -> zero particles, by design of the failure path.
pub fn spawn_particles(
    commands: &mut Commands,
    cfg: &FieldConfig,
    font: Option<&fontdue::Font>,
    viewport: Vec2,
) -> usize {
    let Some(font) = font else {
        warn!(target: "field", "no font loaded; field runs without text particles");
        return 0;
    };
    let font_px = (viewport.x / cfg.font_scale_divisor).min(cfg.max_font_px);
    let mask = rasterize_text_mask(&cfg.text, font, font_px);
    if mask.is_empty() {
        warn!(target: "field", "text '{}' rasterized to an empty mask", cfg.text);
        return 0;
    }
    let points = sample_mask(&mask, cfg.sample_stride, cfg.coverage_threshold);

    let mut rng = rand::thread_rng();
    let half = viewport * 0.5;
    for point in &points {
        let base = mask_to_world(*point, &mask);
        let size = if cfg.size_range.min < cfg.size_range.max {
            rng.gen_range(cfg.size_range.min..cfg.size_range.max)
        } else {
            cfg.size_range.min
        };
        let color = random_particle_color(&mut rng);
        let start = Vec2::new(
            rng.gen_range(-half.x..half.x),
            rng.gen_range(-half.y..half.y),
        );
        commands.spawn((
            Particle { base, size, color },
            Sprite {
                color,
                custom_size: Some(Vec2::splat(size * 2.0)),
                ..default()
            },
            Transform::from_translation(start.extend(1.0)),
        ));
    }
    info!(
        target: "field",
        "spawned {} particles for '{}' (font {font_px:.0}px, stride {})",
        points.len(),
        cfg.text,
        cfg.sample_stride
    );
    points.len()
}

/// Per-frame particle motion: repelled while the pointer is near, easing
/// back toward the glyph base otherwise.
pub fn move_particles(
    pointer: Res<PointerState>,
    cfg: Res<IntroConfig>,
    mut q_particles: Query<(&Particle, &mut Transform)>,
) {
    for (particle, mut tf) in q_particles.iter_mut() {
        let pos = tf.translation.truncate();
        let next = match repel_step(pos, pointer.position, pointer.radius, cfg.field.repel_gain)
        {
            Some(pushed) => pushed,
            None => relax_step(pos, particle.base, cfg.field.return_divisor),
        };
        tf.translation.x = next.x;
        tf.translation.y = next.y;
    }
}

/// Particles within the proximity radius of an agent adopt that agent's
/// color at HDR intensity (bloom halo); everyone else keeps their own color.
/// When both agents are in range the later one wins, matching trail draw
/// order.
pub fn recolor_particles(
    cfg: Res<IntroConfig>,
    q_agents: Query<(&Agent, &Transform)>,
    mut q_particles: Query<(&Particle, &Transform, &mut Sprite)>,
) {
    let prox_sq = cfg.agents.proximity_radius * cfg.agents.proximity_radius;
    let agents: Vec<(Vec2, Color)> = q_agents
        .iter()
        .map(|(agent, tf)| (tf.translation.truncate(), agent.color))
        .collect();

    for (particle, tf, mut sprite) in q_particles.iter_mut() {
        let pos = tf.translation.truncate();
        let mut active: Option<Color> = None;
        for (agent_pos, color) in &agents {
            if pos.distance_squared(*agent_pos) < prox_sq {
                active = Some(*color);
            }
        }
        sprite.color = match active {
            Some(color) => boosted(color, cfg.agents.glow_boost),
            None => particle.color,
        };
    }
}
