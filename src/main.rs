use {
    bevy::{log::LogPlugin, prelude::*, state::app::StatesPlugin},
    game_core::CorePlugin,
};

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin {
            filter: "error,loading=debug,\
                inventory=debug,\
                crafting=debug,\
                quests=info,\
                progression=debug,\
                minigames=debug"
                .into(),
            level: bevy::log::Level::TRACE,
            ..Default::default()
        })
        .add_plugins((StatesPlugin, AssetPlugin::default()))
        .add_plugins(CorePlugin)
        .run();
}
