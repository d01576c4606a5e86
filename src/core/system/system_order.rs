use bevy::prelude::*;

/// Clock advance, agent motion and particle displacement for the frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldMotionSet;

/// Recoloring and trail/gizmo emission; runs after all motion has settled so
/// a frame renders one consistent snapshot.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldRenderSet;
