use {
    bevy::prelude::*,
    catalog_assets::{ObjectiveSpec, QuestDefinition},
};

/// Associates an entity with a quest definition.
#[derive(Component)]
pub struct QuestNode {
    pub id: String,
    pub handle: Handle<QuestDefinition>,
}

/// Per-quest objective state. `current` is a projection of the external
/// progress counters; it is only ever written by the recompute system.
#[derive(Component, Debug, Default)]
pub struct ObjectiveProgress {
    pub objectives: Vec<ObjectiveState>,
}

#[derive(Debug, Clone)]
pub struct ObjectiveState {
    pub spec: ObjectiveSpec,
    pub current: u32,
}

impl ObjectiveProgress {
    pub fn from_specs(specs: &[ObjectiveSpec]) -> Self {
        Self {
            objectives: specs
                .iter()
                .map(|spec| ObjectiveState { spec: spec.clone(), current: 0 })
                .collect(),
        }
    }

    /// True once every objective's projection has reached its target.
    pub fn all_met(&self) -> bool {
        self.objectives
            .iter()
            .all(|o| o.current >= o.spec.target)
    }
}
