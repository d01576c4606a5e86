use bevy::prelude::*;

/// Interaction origin in world coordinates. Starts far off-screen so the
/// field is untouched until the pointer first moves over the window.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerState {
    pub position: Vec2,
    pub radius: f32,
}

impl PointerState {
    pub fn off_screen(radius: f32) -> Self {
        Self {
            position: Vec2::new(-1000.0, -1000.0),
            radius,
        }
    }
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// Mirror the primary pointer (mouse cursor, or first active touch) into
/// `PointerState` every frame it is over the window.
pub fn track_pointer(
    windows_q: Query<&Window>,
    touches: Res<Touches>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows_q.single() else {
        return;
    };
    let screen_pos = touches
        .iter()
        .next()
        .map(|touch| touch.position())
        .or_else(|| window.cursor_position());
    let Some(screen_pos) = screen_pos else {
        return;
    };
    if let Some(world) = cursor_world_pos(&camera_q, screen_pos) {
        pointer.position = world;
    }
}
