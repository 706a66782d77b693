use bevy::prelude::*;

/// Per-frame pipeline. Counter mutation must land before objective
/// recompute, which must land before completion resolution.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    Tick,
    ApplyProgress,
    RecomputeObjectives,
    ResolveCompletion,
    FrameEnd,
}
