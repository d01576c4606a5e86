//! Particle field animator: text-silhouette particles, two orbiting agent
//! streams, pointer repulsion. Owns the drawing surface; rebuilt wholesale
//! on window resize.

pub mod agents;
pub mod mask;
pub mod particles;
pub mod pointer;

use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::core::components::{Agent, Particle};
use crate::core::config::IntroConfig;
use crate::core::system::system_order::{FieldMotionSet, FieldRenderSet};
use agents::FieldClock;
use pointer::PointerState;

/// Current window size in logical pixels; the agent ellipse and the glyph
/// mask layout both derive from it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FieldViewport {
    pub size: Vec2,
}

/// Rasterization font, if any candidate loaded. `None` is a degraded but
/// valid state: agents animate over an empty field.
#[derive(Resource, Default)]
pub struct FieldFont(pub Option<fontdue::Font>);

pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldClock>()
            .init_resource::<FieldFont>()
            .add_systems(Startup, (init_field, load_font, spawn_field).chain())
            .add_systems(
                Update,
                (
                    (
                        regenerate_on_resize,
                        pointer::track_pointer,
                        agents::advance_agents,
                        particles::move_particles,
                    )
                        .chain()
                        .in_set(FieldMotionSet),
                    (particles::recolor_particles, agents::draw_trails)
                        .in_set(FieldRenderSet),
                ),
            );
    }
}

fn init_field(
    mut commands: Commands,
    cfg: Res<IntroConfig>,
    windows_q: Query<&Window>,
    mut gizmo_store: ResMut<GizmoConfigStore>,
) {
    let size = windows_q
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height));
    commands.insert_resource(FieldViewport { size });
    commands.insert_resource(PointerState::off_screen(cfg.field.pointer_radius));

    let (gizmo_config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    gizmo_config.line.width = cfg.agents.trail_width;
    gizmo_config.line.joints = GizmoLineJoint::Round(8);
}

fn load_font(mut font: ResMut<FieldFont>, cfg: Res<IntroConfig>) {
    match mask::load_first_font(&cfg.field.font_paths) {
        Ok(f) => font.0 = Some(f),
        Err(e) => warn!(target: "field", "text particles disabled: {e:#}"),
    }
}

fn spawn_field(
    mut commands: Commands,
    cfg: Res<IntroConfig>,
    font: Res<FieldFont>,
    viewport: Res<FieldViewport>,
) {
    particles::spawn_particles(&mut commands, &cfg.field, font.0.as_ref(), viewport.size);
    agents::spawn_agents(&mut commands, &cfg.agents);
}

/// Resize regenerates the whole field: every particle is despawned and
/// resampled from a fresh mask, agents restart with empty trails, the clock
/// rewinds. Pointer state survives.
fn regenerate_on_resize(
    mut resize_events: EventReader<WindowResized>,
    mut commands: Commands,
    cfg: Res<IntroConfig>,
    font: Res<FieldFont>,
    mut viewport: ResMut<FieldViewport>,
    mut clock: ResMut<FieldClock>,
    q_particles: Query<Entity, With<Particle>>,
    q_agents: Query<Entity, With<Agent>>,
) {
    let Some(last) = resize_events.read().last() else {
        return;
    };
    let size = Vec2::new(last.width, last.height);
    if (size - viewport.size).length_squared() < 1.0 {
        return;
    }
    info!(target: "field", "viewport {}x{} -> rebuilding field", size.x, size.y);
    viewport.size = size;
    clock.t = 0.0;
    for e in q_particles.iter().chain(q_agents.iter()) {
        commands.entity(e).despawn();
    }
    particles::spawn_particles(&mut commands, &cfg.field, font.0.as_ref(), size);
    agents::spawn_agents(&mut commands, &cfg.agents);
}
