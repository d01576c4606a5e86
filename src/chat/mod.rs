pub mod provider;
pub mod widget;

use bevy::prelude::*;

pub struct ChatPlugin;

impl Plugin for ChatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, widget::setup_chat).add_systems(
            Update,
            (
                widget::handle_chat_keyboard,
                widget::poll_pending_reply,
                widget::refresh_chat_ui,
            )
                .chain(),
        );
    }
}
