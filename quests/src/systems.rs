use {
    crate::{QuestError, QuestIndex},
    bevy::prelude::*,
    catalog_assets::{ObjectiveGoal, QuestDefinition, RewardSpec},
    inventory::{CraftedItems, Inventory},
    progress_events::RewardClaimed,
    progression::{LevelCurve, PlayerProfile, ProgressCounters},
    quest_components::{ObjectiveProgress, QuestNode},
    quest_events::{ActivateQuestRequest, QuestCompleted},
    quest_states::{Active, Available, Completed, Locked},
};

/// Spawns entities for loaded QuestDefinition assets. Runs once during the
/// loading phase; definitions already present in the index are skipped.
///
/// The initial status marker depends on the definition and the profile:
/// seeded-active quests (dailies, weeklies) spawn `Active`; gated quests
/// spawn `Locked` until the profile reaches their unlock level, or `Active`
/// right away if it already has; everything else spawns `Available`.
pub fn spawn_quest_entities(
    mut commands: Commands,
    mut quest_index: ResMut<QuestIndex>,
    mut assets: ResMut<Assets<QuestDefinition>>,
    profile: Res<PlayerProfile>,
) {
    let ids: Vec<_> = assets.ids().collect();

    for id in ids {
        // Clone what we need first, get_strong_handle needs the mutable borrow
        let (def_id, objectives, unlock_level, starts_active) = {
            let Some(def) = assets.get(id) else {
                continue;
            };
            if quest_index.entities.contains_key(&def.id) {
                continue;
            }
            (
                def.id.clone(),
                ObjectiveProgress::from_specs(&def.objectives),
                def.unlock_level,
                def.starts_active,
            )
        };

        let Some(handle) = assets.get_strong_handle(id) else {
            continue;
        };

        let mut entity = commands.spawn((
            QuestNode {
                id: def_id.clone(),
                handle,
            },
            objectives,
        ));

        match unlock_level {
            Some(level) if profile.level < level => {
                entity.insert(Locked);
            }
            Some(_) => {
                entity.insert(Active);
            }
            None if starts_active => {
                entity.insert(Active);
            }
            None => {
                entity.insert(Available);
            }
        }

        let entity = entity.id();
        quest_index.entities.insert(def_id.clone(), entity);
        debug!("Spawned quest entity: {} -> {:?}", def_id, entity);
    }
}

/// Observer that activates an `Available` quest. Anything else (unknown id,
/// locked, already active or completed) is a reported no-op.
pub fn on_activate_request(
    trigger: On<ActivateQuestRequest>,
    quest_index: Res<QuestIndex>,
    available: Query<(), With<Available>>,
    mut commands: Commands,
) {
    let quest_id = &trigger.event().0;

    let Some(&entity) = quest_index.entities.get(quest_id) else {
        warn!("Quest '{}' not found in QuestIndex", quest_id);
        return;
    };

    if available.get(entity).is_ok() {
        commands.entity(entity).remove::<Available>().insert(Active);
        info!("Quest '{}' activated", quest_id);
    } else {
        warn!(
            "{}",
            QuestError::QuestNotAvailable {
                quest_id: quest_id.clone(),
            }
        );
    }
}

/// Auto-activates level-gated quests once the profile reaches their
/// unlock level.
pub fn watch_level_unlocks(
    profile: Res<PlayerProfile>,
    assets: Res<Assets<QuestDefinition>>,
    locked: Query<(Entity, &QuestNode), With<Locked>>,
    mut commands: Commands,
) {
    if !profile.is_changed() {
        return;
    }

    for (entity, node) in locked.iter() {
        let Some(def) = assets.get(&node.handle) else {
            continue;
        };
        if def.unlock_level.is_none_or(|level| profile.level >= level) {
            commands.entity(entity).remove::<Locked>().insert(Active);
            info!("Quest '{}' unlocked at level {}", node.id, profile.level);
        }
    }
}

/// Projects objective progress for active quests from the progression
/// ledgers. Pure recomputation: `current` is always derived fresh, never
/// incremented, so this system can run any number of times.
pub fn recompute_objectives(
    counters: Res<ProgressCounters>,
    profile: Res<PlayerProfile>,
    mut active: Query<&mut ObjectiveProgress, With<Active>>,
    newly_active: Query<(), Added<Active>>,
) {
    // Newly activated quests need a projection even when the ledgers are
    // quiet, e.g. a quest activated after its targets were already met.
    if !counters.is_changed() && !profile.is_changed() && newly_active.is_empty() {
        return;
    }

    for mut progress in active.iter_mut() {
        for state in progress.objectives.iter_mut() {
            state.current = match &state.spec.goal {
                ObjectiveGoal::CompleteGames(kind) => counters.games(*kind),
                ObjectiveGoal::EarnCredits => profile.bio_credits,
                ObjectiveGoal::ReachLevel => profile.level,
                ObjectiveGoal::CollectResources(id) => counters.collected(id),
                ObjectiveGoal::CraftItems(id) => counters.crafted(id),
            };
        }
    }
}

/// Swaps `Active` for `Completed` once every objective target is met and
/// reports the completion. Completed quests no longer match the `Active`
/// filter, so each quest completes exactly once.
pub fn resolve_completed_quests(
    active: Query<(Entity, &QuestNode, &ObjectiveProgress), With<Active>>,
    mut commands: Commands,
) {
    for (entity, node, progress) in active.iter() {
        if progress.all_met() {
            commands.entity(entity).remove::<Active>().insert(Completed);
            commands.trigger(QuestCompleted {
                quest: entity,
                quest_id: node.id.clone(),
            });
            info!("Quest completed: {}", node.id);
        }
    }
}

/// Observer that applies a completed quest's reward bundle to the
/// progression ledgers.
pub fn on_quest_completed(
    trigger: On<QuestCompleted>,
    nodes: Query<&QuestNode>,
    assets: Res<Assets<QuestDefinition>>,
    curve: Res<LevelCurve>,
    mut profile: ResMut<PlayerProfile>,
    mut ledger: ResMut<Inventory>,
    mut items: ResMut<CraftedItems>,
    mut counters: ResMut<ProgressCounters>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(node) = nodes.get(event.quest) else {
        warn!("Completed quest entity {:?} has no QuestNode", event.quest);
        return;
    };
    let Some(def) = assets.get(&node.handle) else {
        warn!("Quest definition not loaded for '{}'", node.id);
        return;
    };

    let mut credits = 0;
    let mut xp = 0;
    for reward in &def.rewards {
        match reward {
            RewardSpec::BioCredits(amount) => {
                profile.grant_credits(*amount);
                credits += amount;
            }
            RewardSpec::Xp(amount) => {
                let gained = profile.grant_xp(*amount, &curve.0);
                xp += amount;
                if gained > 0 {
                    info!("Level up! Now level {}", profile.level);
                }
            }
            RewardSpec::Resource { id, amount } => {
                ledger.add(id, *amount);
                counters.record_resources(id, *amount);
            }
            RewardSpec::Item { id } => items.add(id, 1),
            RewardSpec::Achievement { id } => {
                if profile.grant_achievement(id) {
                    info!("Achievement earned: {}", id);
                }
            }
        }
    }

    commands.trigger(RewardClaimed {
        description: def.title.clone(),
        bio_credits: credits,
        xp,
    });
}
