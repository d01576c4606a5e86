use bevy::prelude::*;

use crate::app::captions::spawn_captions;
use crate::chat::ChatPlugin;
use crate::core::config::config::ConfigReport;
use crate::core::system::system_order::{FieldMotionSet, FieldRenderSet};
use crate::debug::DebugPlugin;
use crate::field::FieldPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::rendering::camera::camera::CameraPlugin;

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (FieldMotionSet, FieldRenderSet.after(FieldMotionSet)),
        )
        .add_plugins((
            CameraPlugin,
            FieldPlugin,
            ChatPlugin,
            AutoClosePlugin,
            DebugPlugin,
        ))
        .add_systems(Startup, (report_config, spawn_captions));
    }
}

/// Config load outcome is logged here rather than in `main` so it goes
/// through the app's logger.
fn report_config(report: Option<Res<ConfigReport>>) {
    let Some(report) = report else {
        return;
    };
    if let Some(err) = &report.source_error {
        warn!(target: "config", "falling back to defaults: {err}");
    }
    for warning in &report.warnings {
        warn!(target: "config", "{warning}");
    }
}
