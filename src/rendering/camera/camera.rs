use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use crate::rendering::palette::palette::BACKGROUND;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    // HDR target + bloom replaces the canvas shadow-blur glow; trails and
    // near-agent particles render above 1.0 and bleed into a halo.
    commands.spawn((
        Camera2d,
        Camera {
            hdr: true,
            clear_color: ClearColorConfig::Custom(BACKGROUND),
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom::default(),
    ));
}
