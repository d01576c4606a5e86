#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::field::agents::FieldClock;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    clock: Res<FieldClock>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "FIELD frame={} fps={:.1} ft_ms={:.1} particles={} trail={} t={:.2}",
            state.frame_counter,
            stats.fps,
            stats.frame_time_ms,
            stats.particle_count,
            stats.trail_len,
            clock.t
        );
    }
}
