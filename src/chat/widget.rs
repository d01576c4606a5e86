//! Chat overlay: transcript panel, status line and a single-line input
//! driven by raw keyboard events. Replies resolve on the IO task pool so the
//! frame loop never waits on the network.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{IoTaskPool, Task};

use crate::chat::provider::{self, ProviderStatus, Turn};
use crate::core::config::IntroConfig;
use crate::rendering::palette::palette::AGENT_COLORS;

/// How many transcript turns the panel renders; older turns scroll away.
const VISIBLE_TURNS: usize = 8;

#[derive(Resource)]
pub struct ChatState {
    pub transcript: Vec<Turn>,
    pub input: String,
    pub visible: bool,
    pub status: ProviderStatus,
    pub pending: Option<Task<String>>,
}

#[derive(Component)]
pub struct ChatRoot;

#[derive(Component)]
pub struct ChatStatusText;

#[derive(Component)]
pub struct ChatLogText;

#[derive(Component)]
pub struct ChatInputText;

pub fn setup_chat(mut commands: Commands) {
    let status = provider::status();
    let greeting = match status {
        ProviderStatus::Online => {
            "System online. Neural link established. How can I assist you today?"
        }
        ProviderStatus::Offline => {
            "System warning: cloud uplink offline. Running in simulation mode."
        }
    };
    info!(target: "chat", "provider status: {status:?}");

    commands.insert_resource(ChatState {
        transcript: vec![Turn::model(greeting)],
        input: String::new(),
        visible: true,
        status,
        pending: None,
    });

    let accent = AGENT_COLORS[0];
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(24.0),
                bottom: Val::Px(24.0),
                width: Val::Px(420.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.03, 0.07, 0.85)),
            ChatRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(status_line(status)),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(accent),
                ChatStatusText,
            ));
            parent.spawn((
                Text::new(String::new()),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.90, 0.95)),
                ChatLogText,
            ));
            parent.spawn((
                Text::new("> _"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(accent),
                ChatInputText,
            ));
        });
}

fn status_line(status: ProviderStatus) -> String {
    let word = match status {
        ProviderStatus::Online => "ONLINE",
        ProviderStatus::Offline => "OFFLINE",
    };
    format!("NEXUS  ·  LINK {word}")
}

/// Tab toggles the panel; while visible, printable keys edit the input line
/// and Enter submits. Submissions are ignored while a reply is pending.
pub fn handle_chat_keyboard(
    mut key_events: EventReader<KeyboardInput>,
    mut state: ResMut<ChatState>,
    cfg: Res<IntroConfig>,
) {
    for ev in key_events.read() {
        if !ev.state.is_pressed() {
            continue;
        }
        match &ev.logical_key {
            Key::Tab => state.visible = !state.visible,
            _ if !state.visible => {}
            Key::Enter => submit_message(&mut state, &cfg),
            Key::Backspace => {
                state.input.pop();
            }
            Key::Space => state.input.push(' '),
            Key::Character(typed) => {
                for ch in typed.chars().filter(|c| !c.is_control()) {
                    state.input.push(ch);
                }
            }
            _ => {}
        }
    }
}

fn submit_message(state: &mut ChatState, cfg: &IntroConfig) {
    let message = state.input.trim().to_string();
    if message.is_empty() || state.pending.is_some() {
        return;
    }
    state.input.clear();
    // History snapshot excludes the turn being submitted.
    let history = state.transcript.clone();
    state.transcript.push(Turn::user(message.clone()));

    let chat_cfg = cfg.chat.clone();
    let task = IoTaskPool::get()
        .spawn(async move { provider::generate_reply(&chat_cfg, &history, &message) });
    state.pending = Some(task);
}

/// Collect a finished reply task, if any. A request in flight when the app
/// quits is simply dropped.
pub fn poll_pending_reply(mut state: ResMut<ChatState>) {
    // Immutable probe first so an idle frame does not trip change detection.
    if state.pending.is_none() {
        return;
    }
    let Some(task) = state.pending.as_mut() else {
        return;
    };
    if let Some(reply) = future::block_on(future::poll_once(task)) {
        state.pending = None;
        state.transcript.push(Turn::model(reply));
    }
}

pub fn refresh_chat_ui(
    state: Res<ChatState>,
    mut q_root: Query<&mut Visibility, With<ChatRoot>>,
    mut q_log: Query<&mut Text, (With<ChatLogText>, Without<ChatInputText>)>,
    mut q_input: Query<&mut Text, (With<ChatInputText>, Without<ChatLogText>)>,
) {
    if !state.is_changed() {
        return;
    }
    if let Ok(mut visibility) = q_root.single_mut() {
        *visibility = if state.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut log) = q_log.single_mut() {
        let start = state.transcript.len().saturating_sub(VISIBLE_TURNS);
        let mut lines: Vec<String> = state.transcript[start..]
            .iter()
            .map(|turn| {
                let label = match turn.speaker {
                    provider::Speaker::User => "You",
                    provider::Speaker::Model => "Nexus",
                };
                format!("{label}: {}", turn.text)
            })
            .collect();
        if state.pending.is_some() {
            lines.push("Nexus: ...".into());
        }
        log.0 = lines.join("\n");
    }
    if let Ok(mut input) = q_input.single_mut() {
        input.0 = format!("> {}_", state.input);
    }
}
