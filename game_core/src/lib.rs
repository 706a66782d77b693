use bevy::prelude::*;
use catalog_assets::CatalogAssetsPlugin;
use crafting::CraftingPlugin;
use inventory::InventoryPlugin;
use loading::LoadingManagerPlugin;
use messages::MessagesPlugin;
use minigame_components::MinigameComponentsPlugin;
use minigames::MinigamesPlugin;
use progression::ProgressionPlugin;
use quest_states::QuestStatesPlugin;
use quests::QuestsPlugin;
use shared_components::SharedComponentsPlugin;
use states::GameState;
use system_schedule::GameSchedule;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(
                Update,
                (
                    GameSchedule::Tick,
                    GameSchedule::ApplyProgress,
                    GameSchedule::RecomputeObjectives,
                    GameSchedule::ResolveCompletion,
                    GameSchedule::FrameEnd,
                )
                    .chain(),
            )
            .add_plugins((
                SharedComponentsPlugin,
                QuestStatesPlugin,
                MinigameComponentsPlugin,
                MessagesPlugin,
                CatalogAssetsPlugin,
                InventoryPlugin,
                ProgressionPlugin,
                CraftingPlugin,
                QuestsPlugin,
                MinigamesPlugin,
                LoadingManagerPlugin,
            ));
    }
}
