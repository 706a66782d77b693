//! Quest objective state machine.
//!
//! Quests are entities carrying a [`QuestNode`] (id + definition handle),
//! an [`ObjectiveProgress`] snapshot and exactly one status marker from
//! `quest_states`. Objective progress is recomputed from the progression
//! ledgers, never incremented in place, so replays and re-evaluations are
//! idempotent by construction.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    states::GameState,
    system_schedule::GameSchedule,
    thiserror::Error,
};

pub mod systems;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("quest '{quest_id}' is not available for activation")]
    QuestNotAvailable { quest_id: String },
}

/// O(1) lookup of quest entities by id. Populated during loading.
#[derive(Resource, Default)]
pub struct QuestIndex {
    pub entities: HashMap<String, Entity>,
}

pub struct QuestsPlugin;

impl Plugin for QuestsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<QuestIndex>()
            .add_observer(systems::on_activate_request)
            .add_observer(systems::on_quest_completed)
            .add_systems(
                Update,
                (
                    (systems::watch_level_unlocks, systems::recompute_objectives)
                        .chain()
                        .in_set(GameSchedule::RecomputeObjectives),
                    systems::resolve_completed_quests.in_set(GameSchedule::ResolveCompletion),
                )
                    .run_if(in_state(GameState::Running)),
            );
    }
}
