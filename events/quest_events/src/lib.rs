use bevy::prelude::*;

/// Fired exactly once, on the `Active -> Completed` transition of a quest.
///
/// This **Observer** event is edge-triggered: completion resolution only
/// looks at quests still marked `Active`, so re-evaluating a completed quest
/// can never re-fire it.
///
/// # Observers
/// - `quests::systems::on_quest_completed`: applies the quest's rewards to
///   the progression counters and the inventory/crafted-items ledgers.
#[derive(Event, Debug)]
pub struct QuestCompleted {
    pub quest: Entity,
    pub quest_id: String,
}

/// Represents a request to accept an `Available` quest.
///
/// Triggered via `commands.trigger()` by the presentation layer. Activation
/// of a quest that is locked, already active or completed is reported with
/// `QuestError::QuestNotAvailable` and changes nothing.
#[derive(Event)]
pub struct ActivateQuestRequest(
    /// The quest definition id (matches `QuestDefinition.id`).
    pub String,
);
