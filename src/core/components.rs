use bevy::prelude::*;
use std::collections::VecDeque;

/// A text-silhouette particle. `base` is the glyph-mask sample point the
/// particle relaxes toward; it never changes after spawn.
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub base: Vec2,
    pub size: f32,
    /// Inherent color used whenever no agent is nearby.
    pub color: Color,
}

/// One orbiting energy stream. Two exist, with phases offset by pi.
#[derive(Component, Debug, Clone)]
pub struct Agent {
    pub phase: f32,
    pub color: Color,
    /// Most recent positions, oldest first. Bounded by the configured
    /// history limit; eviction happens on push.
    pub history: VecDeque<Vec2>,
}

impl Agent {
    pub fn new(phase: f32, color: Color) -> Self {
        Self {
            phase,
            color,
            history: VecDeque::new(),
        }
    }

    /// Record a position, evicting the oldest entry past `limit`.
    pub fn push_history(&mut self, pos: Vec2, limit: usize) {
        self.history.push_back(pos);
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}
