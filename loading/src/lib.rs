mod resources;

use {
    crate::resources::CatalogsFolderHandle,
    bevy::{asset::LoadState, prelude::*},
    catalog_assets::{builtin, QuestDefinition, RecipeDefinition, ResourceDefinition},
    crafting::RecipeIndex,
    states::{GameState, LoadingPhase},
};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LoadingPhase>()
            // Phase: Assets - seed builtin catalogs and load the overrides folder
            .add_systems(Startup, (seed_builtin_catalogs, load_catalog_assets))
            .add_systems(
                Update,
                check_assets_loaded
                    .run_if(in_state(GameState::Loading).and(in_state(LoadingPhase::Assets))),
            )
            // Phase: SpawnQuests - index recipes and spawn quest entities
            .add_systems(
                OnEnter(LoadingPhase::SpawnQuests),
                (
                    index_recipes,
                    quests::systems::spawn_quest_entities,
                    advance_to_ready,
                )
                    .chain(),
            )
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading);
    }
}

// --- Phase: Assets ---

/// Inserts the builtin definitions so the game is playable with an empty
/// assets directory. Definitions loaded from `catalogs/` add to these.
fn seed_builtin_catalogs(
    mut resource_defs: ResMut<Assets<ResourceDefinition>>,
    mut recipe_defs: ResMut<Assets<RecipeDefinition>>,
    mut quest_defs: ResMut<Assets<QuestDefinition>>,
) {
    for def in builtin::resources() {
        resource_defs.add(def);
    }
    for def in builtin::recipes() {
        recipe_defs.add(def);
    }
    for def in builtin::quests() {
        quest_defs.add(def);
    }
    info!("seeded builtin catalog definitions");
}

fn load_catalog_assets(mut cmd: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load_folder("catalogs");
    cmd.insert_resource(CatalogsFolderHandle(handle));
}

fn check_assets_loaded(
    asset_server: Res<AssetServer>,
    catalogs: Res<CatalogsFolderHandle>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    let id = catalogs.0.id();
    // A missing catalogs directory is fine, the builtin seeds carry the game.
    let failed = matches!(asset_server.get_load_state(id), Some(LoadState::Failed(_)));
    if asset_server.is_loaded_with_dependencies(id) || failed {
        if failed {
            warn!("catalogs folder failed to load, continuing with builtin definitions");
        } else {
            info!("catalog assets loaded");
        }
        next_phase.set(LoadingPhase::SpawnQuests);
    }
}

// --- Phase: SpawnQuests ---

fn index_recipes(mut recipe_index: ResMut<RecipeIndex>, mut assets: ResMut<Assets<RecipeDefinition>>) {
    let ids: Vec<_> = assets.ids().collect();
    for id in ids {
        let def_id = {
            let Some(def) = assets.get(id) else {
                continue;
            };
            if recipe_index.handles.contains_key(&def.id) {
                continue;
            }
            def.id.clone()
        };
        let Some(handle) = assets.get_strong_handle(id) else {
            continue;
        };
        recipe_index.handles.insert(def_id, handle);
    }
    debug!("indexed {} recipes", recipe_index.handles.len());
}

fn advance_to_ready(mut next_phase: ResMut<NextState<LoadingPhase>>) {
    next_phase.set(LoadingPhase::Ready);
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Loading complete, transitioning to Running");
    next_state.set(GameState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_seeds_populate_catalogs() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(AssetPlugin::default())
            .init_asset::<ResourceDefinition>()
            .init_asset::<RecipeDefinition>()
            .init_asset::<QuestDefinition>();

        app.world_mut()
            .run_system_cached(seed_builtin_catalogs)
            .unwrap();

        assert_eq!(app.world().resource::<Assets<ResourceDefinition>>().len(), 4);
        assert!(!app.world().resource::<Assets<RecipeDefinition>>().is_empty());
        assert!(!app.world().resource::<Assets<QuestDefinition>>().is_empty());
    }

    #[test]
    fn test_index_recipes_is_idempotent() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(AssetPlugin::default())
            .init_asset::<ResourceDefinition>()
            .init_asset::<RecipeDefinition>()
            .init_asset::<QuestDefinition>()
            .init_resource::<RecipeIndex>();

        app.world_mut()
            .run_system_cached(seed_builtin_catalogs)
            .unwrap();
        app.world_mut().run_system_cached(index_recipes).unwrap();
        let count = app.world().resource::<RecipeIndex>().handles.len();
        assert_eq!(count, builtin::recipes().len());

        app.world_mut().run_system_cached(index_recipes).unwrap();
        assert_eq!(app.world().resource::<RecipeIndex>().handles.len(), count);
    }
}
