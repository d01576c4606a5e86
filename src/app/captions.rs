use bevy::prelude::*;

use crate::core::config::IntroConfig;
use crate::rendering::palette::palette::AGENT_COLORS;

/// Static shell overlays: the status tag top-left, the subtitle strip
/// centered near the bottom. Pure decoration; never interacted with.
pub fn spawn_captions(mut commands: Commands, cfg: Res<IntroConfig>) {
    commands.spawn((
        Text::new(cfg.captions.top.clone()),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(AGENT_COLORS[0]),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            left: Val::Px(40.0),
            ..default()
        },
    ));
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Percent(15.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(cfg.captions.bottom.clone()),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgba(0.7, 0.7, 0.75, 0.8)),
            ));
        });
}
