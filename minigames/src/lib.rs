//! Mini-game session lifecycle: one shared state machine parameterized by
//! [`GameKind`]. A session is an entity whose field entities are `ChildOf`
//! children, so the whole game despawns as one unit. Only a session whose
//! countdown completes naturally reports a [`GameCompleted`]; abandoning a
//! session (leaving the running state, or starting another game) commits
//! nothing.

use {
    bevy::prelude::*,
    shared_components::GameKind,
    states::GameState,
    system_schedule::GameSchedule,
};

pub mod systems;

/// Request to launch a mini-game. Any session already live is discarded.
#[derive(Event, Debug, Clone, Copy)]
pub struct StartGameRequest {
    pub kind: GameKind,
}

pub struct MinigamesPlugin;

impl Plugin for MinigamesPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(systems::start_game);
        app.add_systems(
            Update,
            (
                systems::tick_sessions,
                systems::tick_hazard_spawners,
                systems::tick_combo_trackers,
            )
                .in_set(GameSchedule::Tick)
                .run_if(in_state(GameState::Running)),
        );
        app.add_systems(
            Update,
            (
                systems::apply_node_interactions,
                systems::apply_quiz_answers,
                systems::apply_bin_selections,
            )
                .in_set(GameSchedule::ApplyProgress)
                .run_if(in_state(GameState::Running)),
        );
        app.add_systems(OnExit(GameState::Running), systems::teardown_sessions);
    }
}
