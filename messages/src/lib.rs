use {bevy::prelude::*, minigame_components::WasteKind};

pub struct MessagesPlugin;

impl Plugin for MessagesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NodeInteraction>()
            .add_message::<QuizAnswer>()
            .add_message::<BinSelection>()
            .register_type::<NodeInteraction>()
            .register_type::<QuizAnswer>()
            .register_type::<BinSelection>();
    }
}

/// A tap on a field entity of the running mini-game session.
/// Unknown or already-consumed targets are ignored.
#[derive(Message, Reflect)]
#[reflect(Default)]
pub struct NodeInteraction {
    pub target: Entity,
}

impl Default for NodeInteraction {
    fn default() -> Self {
        Self {
            target: Entity::PLACEHOLDER,
        }
    }
}

/// An answer pick for the current quiz question, by option index.
#[derive(Message, Reflect, Default)]
#[reflect(Default)]
pub struct QuizAnswer {
    pub answer: usize,
}

/// A bin pick for the waste item currently up for sorting.
#[derive(Message, Reflect, Default)]
#[reflect(Default)]
pub struct BinSelection {
    pub bin: WasteKind,
}
