use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Running,
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    #[default]
    Assets,      // Wait for catalog folders, merge builtin seed definitions
    SpawnQuests, // Spawn quest entities from loaded definitions
    Ready,       // All done
}
