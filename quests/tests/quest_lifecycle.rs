use {
    bevy::{prelude::*, state::app::StatesPlugin},
    catalog_assets::{
        ObjectiveGoal, ObjectiveSpec, QuestCategory, QuestDefinition, QuestKind, RewardSpec,
    },
    inventory::{CraftedItems, Inventory},
    progression::{LevelCurve, PlayerProfile, ProgressCounters},
    quest_events::QuestCompleted,
    quest_states::{Active, Completed, Locked},
    quests::{systems::spawn_quest_entities, QuestsPlugin},
    shared_components::GameKind,
    states::GameState,
    system_schedule::GameSchedule,
};

#[derive(Resource, Default)]
struct CompletionLog(Vec<String>);

fn track_completions(trigger: On<QuestCompleted>, mut log: ResMut<CompletionLog>) {
    log.0.push(trigger.event().quest_id.clone());
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .add_plugins(AssetPlugin::default())
        .init_asset::<QuestDefinition>()
        .init_state::<GameState>()
        .init_resource::<PlayerProfile>()
        .init_resource::<ProgressCounters>()
        .init_resource::<Inventory>()
        .init_resource::<CraftedItems>()
        .init_resource::<LevelCurve>()
        .init_resource::<CompletionLog>()
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
        .add_plugins(QuestsPlugin)
        .add_observer(track_completions)
        // Normally run during the loading phase; idempotent via QuestIndex.
        .add_systems(Update, spawn_quest_entities);
    app.insert_state(GameState::Running);
    app
}

fn daily_decontamination() -> QuestDefinition {
    QuestDefinition {
        id: "daily-decontamination".to_string(),
        title: "Decontamination Duty".to_string(),
        description: "Complete 3 decontamination protocols".to_string(),
        kind: QuestKind::Daily,
        category: QuestCategory::MiniGames,
        objectives: vec![ObjectiveSpec {
            id: "decon-runs".to_string(),
            description: "Complete decontamination protocols".to_string(),
            goal: ObjectiveGoal::CompleteGames(GameKind::Decontaminate),
            target: 3,
        }],
        rewards: vec![
            RewardSpec::BioCredits(150),
            RewardSpec::Xp(50),
            RewardSpec::Resource {
                id: "bio-material".to_string(),
                amount: 2,
            },
        ],
        unlock_level: None,
        expires_in_hours: Some(24),
        starts_active: true,
    }
}

fn completed_count(app: &mut App, id: &str) -> usize {
    let world = app.world_mut();
    world
        .query_filtered::<&quest_components::QuestNode, With<Completed>>()
        .iter(world)
        .filter(|node| node.id == id)
        .count()
}

#[test]
fn quest_completes_exactly_once_with_rewards_applied_once() {
    let mut app = test_app();
    // Keep the handle alive for the whole test; dropping it would let the
    // asset system garbage-collect the definition before any system runs.
    let _def = app
        .world_mut()
        .resource_mut::<Assets<QuestDefinition>>()
        .add(daily_decontamination());
    app.update();

    let credits_before = app.world().resource::<PlayerProfile>().bio_credits;
    let xp_before = app.world().resource::<PlayerProfile>().xp;

    // Two completed games: objective at 2 of 3, nothing fires.
    for _ in 0..2 {
        app.world_mut()
            .resource_mut::<ProgressCounters>()
            .record_game(GameKind::Decontaminate);
        app.update();
    }
    assert!(app.world().resource::<CompletionLog>().0.is_empty());

    // Third game crosses the target.
    app.world_mut()
        .resource_mut::<ProgressCounters>()
        .record_game(GameKind::Decontaminate);
    app.update();

    assert_eq!(
        app.world().resource::<CompletionLog>().0,
        vec!["daily-decontamination".to_string()]
    );
    assert_eq!(completed_count(&mut app, "daily-decontamination"), 1);

    let profile = app.world().resource::<PlayerProfile>();
    assert_eq!(profile.bio_credits, credits_before + 150);
    assert_eq!(profile.xp, xp_before + 50);
    assert_eq!(
        app.world().resource::<Inventory>().quantity("bio-material"),
        2
    );

    // A fourth game must not re-fire the quest or re-apply rewards.
    app.world_mut()
        .resource_mut::<ProgressCounters>()
        .record_game(GameKind::Decontaminate);
    app.update();
    app.update();

    assert_eq!(app.world().resource::<CompletionLog>().0.len(), 1);
    let profile = app.world().resource::<PlayerProfile>();
    assert_eq!(profile.bio_credits, credits_before + 150);
    assert_eq!(
        app.world().resource::<Inventory>().quantity("bio-material"),
        2
    );
}

#[test]
fn level_gated_quest_unlocks_and_resolves() {
    let mut app = test_app();
    // Keep the handle alive for the whole test (see above).
    let _def = app
        .world_mut()
        .resource_mut::<Assets<QuestDefinition>>()
        .add(QuestDefinition {
            id: "story-guardian-awakening".to_string(),
            title: "Guardian Awakening".to_string(),
            description: "Reach level 5".to_string(),
            kind: QuestKind::Story,
            category: QuestCategory::Progression,
            objectives: vec![ObjectiveSpec {
                id: "reach-level".to_string(),
                description: "Reach guardian level 5".to_string(),
                goal: ObjectiveGoal::ReachLevel,
                target: 5,
            }],
            rewards: vec![RewardSpec::Achievement {
                id: "guardian-awakened".to_string(),
            }],
            unlock_level: Some(5),
            expires_in_hours: None,
            starts_active: false,
        });
    app.update();

    // Seeded profile is level 3, so the quest spawns locked.
    {
        let world = app.world_mut();
        assert_eq!(
            world.query_filtered::<(), With<Locked>>().iter(world).count(),
            1
        );
    }

    // Enough XP for levels 3 and 4 (300 + 400).
    {
        let mut profile = app.world_mut().resource_mut::<PlayerProfile>();
        let curve = LevelCurve::default();
        profile.grant_xp(700, &curve.0);
        assert_eq!(profile.level, 5);
    }
    app.update();
    app.update();

    {
        let world = app.world_mut();
        assert_eq!(
            world.query_filtered::<(), With<Active>>().iter(world).count(),
            0
        );
    }
    assert_eq!(
        app.world().resource::<CompletionLog>().0,
        vec!["story-guardian-awakening".to_string()]
    );
    assert!(app
        .world()
        .resource::<PlayerProfile>()
        .achievements
        .contains("guardian-awakened"));
}
