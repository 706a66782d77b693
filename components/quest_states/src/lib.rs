//! Quest status marker components.
//!
//! A quest entity carries exactly one of these at a time. Transitions are
//! monotonic: Locked -> Available -> Active -> Completed, with no regression.

use bevy::prelude::*;

pub struct QuestStatesPlugin;

impl Plugin for QuestStatesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Locked>()
            .register_type::<Available>()
            .register_type::<Active>()
            .register_type::<Completed>();
    }
}

/// Gated behind an unlock level the player has not reached yet.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct Locked;

/// Visible to the player, waiting to be accepted.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct Available;

/// Accepted; objectives are being tracked.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct Active;

/// All objectives met and rewards applied. Terminal.
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct Completed;
