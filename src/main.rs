use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use agent_nexus::core::config::config::ConfigReport;
use agent_nexus::{IntroConfig, IntroPlugin};

/// Animated agent-convergence intro with a chat overlay.
#[derive(Parser, Debug)]
#[command(name = "agent_nexus", version)]
struct Cli {
    /// Path to the RON configuration file.
    #[arg(long, default_value = "assets/config/intro.ron")]
    config: PathBuf,
    /// Override the text the particle field reconstructs.
    #[arg(long)]
    text: Option<String>,
    /// Exit after this many seconds (unattended runs).
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() {
    let cli = Cli::parse();
    let (mut cfg, source_error) = IntroConfig::load_or_default(&cli.config);
    if let Some(text) = cli.text {
        cfg.field.text = text;
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    let warnings = cfg.validate();

    App::new()
        .insert_resource(ConfigReport {
            source_error,
            warnings,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(cfg)
        .add_plugins(IntroPlugin)
        .run();
}
