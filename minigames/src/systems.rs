use {
    crate::StartGameRequest,
    bevy::{
        ecs::entity::{EntityHashMap, EntityHashSet},
        prelude::*,
    },
    messages::{BinSelection, NodeInteraction, QuizAnswer},
    minigame_components::{
        ComboTracker, FieldPosition, FragmentKind, FragmentNode, GameSession, HazardKind,
        HazardNode, HazardSpawner, NodeSize, PatrolNode, QuizBoard, QuizQuestion,
        SelectedFragment, SortBoard, WasteKind,
    },
    progress_events::GameCompleted,
    rand::{Rng, seq::SliceRandom},
    shared_components::GameKind,
};

/// Point values a patrol threat can carry, by severity.
const THREAT_POINTS: [u32; 3] = [5, 10, 15];

/// Score penalty for hitting protected wildlife.
const WILDLIFE_PENALTY: u32 = 10;

/// Score for sorting a waste item into the right bin.
const SORT_SCORE: u32 = 10;

/// Score for a correct quiz answer.
const QUIZ_SCORE: u32 = 15;

/// Observer that launches a mini-game session. A session already live is
/// despawned first, without reporting completion.
pub fn start_game(
    trigger: On<StartGameRequest>,
    live: Query<Entity, With<GameSession>>,
    mut commands: Commands,
) {
    for stale in live.iter() {
        debug!("Discarding live session {stale} for a new game");
        commands.entity(stale).despawn();
    }

    let kind = trigger.event().kind;
    let session = commands.spawn(GameSession::new(kind)).id();
    let mut rng = rand::rng();

    match kind {
        GameKind::Decontaminate => {
            commands
                .entity(session)
                .insert((HazardSpawner::default(), ComboTracker::default()));
            for _ in 0..12 {
                spawn_hazard(&mut commands, session, &mut rng);
            }
        }
        GameKind::BioForge => {
            for _ in 0..16 {
                let kind = FragmentKind::ALL[rng.random_range(0..FragmentKind::ALL.len())];
                commands.spawn((
                    ChildOf(session),
                    FragmentNode { kind },
                    random_position(&mut rng),
                ));
            }
        }
        GameKind::WildlifePatrol => {
            for _ in 0..10 {
                let node = if rng.random_bool(0.7) {
                    PatrolNode::Threat {
                        points: THREAT_POINTS[rng.random_range(0..THREAT_POINTS.len())],
                    }
                } else {
                    PatrolNode::Wildlife
                };
                commands.spawn((ChildOf(session), node, random_position(&mut rng)));
            }
        }
        GameKind::DataStream => {
            commands.entity(session).insert(QuizBoard {
                questions: quiz_questions(),
                current: 0,
            });
        }
        GameKind::RecycleSort => {
            let mut items: Vec<WasteKind> = WasteKind::ALL
                .into_iter()
                .flat_map(|kind| [kind, kind])
                .collect();
            items.shuffle(&mut rng);
            commands.entity(session).insert(SortBoard { items, current: 0 });
        }
    }

    info!("Started {kind:?} session");
}

fn spawn_hazard(commands: &mut Commands, session: Entity, rng: &mut impl Rng) {
    commands.spawn((
        ChildOf(session),
        HazardNode {
            kind: HazardKind::ALL[rng.random_range(0..HazardKind::ALL.len())],
            size: NodeSize::ALL[rng.random_range(0..NodeSize::ALL.len())],
        },
        random_position(rng),
    ));
}

fn random_position(rng: &mut impl Rng) -> FieldPosition {
    FieldPosition {
        x: rng.random_range(10.0..=90.0),
        y: rng.random_range(15.0..=85.0),
    }
}

/// Ticks session countdowns. On expiry the final score is reported and the
/// session despawns together with its field entities.
pub fn tick_sessions(
    time: Res<Time>,
    mut sessions: Query<(Entity, &mut GameSession)>,
    mut commands: Commands,
) {
    for (entity, mut session) in sessions.iter_mut() {
        if session.countdown.tick(time.delta()).just_finished() {
            info!("{:?} session finished with score {}", session.kind, session.score);
            commands.trigger(GameCompleted {
                kind: session.kind,
                score: session.score,
            });
            commands.entity(entity).despawn();
        }
    }
}

/// Trickles extra contamination onto the field, 60% chance every cycle.
pub fn tick_hazard_spawners(
    time: Res<Time>,
    mut spawners: Query<(Entity, &mut HazardSpawner)>,
    mut commands: Commands,
) {
    let mut rng = rand::rng();
    for (session, mut spawner) in spawners.iter_mut() {
        if spawner.0.tick(time.delta()).just_finished() && rng.random_bool(0.6) {
            spawn_hazard(&mut commands, session, &mut rng);
        }
    }
}

/// Resets the combo multiplier after 3 seconds without a hit.
pub fn tick_combo_trackers(time: Res<Time>, mut combos: Query<&mut ComboTracker>) {
    for mut combo in combos.iter_mut() {
        if combo.idle.tick(time.delta()).just_finished() {
            combo.count = 0;
        }
    }
}

/// Applies taps on field entities. A target that is not a live field entity
/// is ignored. Despawns and selection changes issued here are deferred
/// commands, so later messages in the same batch consult the local
/// `consumed` and `selection` overlays instead of stale query state.
pub fn apply_node_interactions(
    mut reader: MessageReader<NodeInteraction>,
    mut sessions: Query<&mut GameSession>,
    mut combos: Query<&mut ComboTracker>,
    hazards: Query<(&HazardNode, &ChildOf)>,
    fragments: Query<(Entity, &FragmentNode, &ChildOf, Has<SelectedFragment>)>,
    patrols: Query<(&PatrolNode, &ChildOf)>,
    mut commands: Commands,
) {
    let mut consumed = EntityHashSet::default();
    let mut selection = EntityHashMap::<bool>::default();

    for interaction in reader.read() {
        let target = interaction.target;
        if consumed.contains(&target) {
            continue;
        }

        if let Ok((hazard, child_of)) = hazards.get(target) {
            let parent = child_of.parent();
            let Ok(mut session) = sessions.get_mut(parent) else {
                continue;
            };
            let mut points = hazard.size.base_score();
            if let Ok(mut combo) = combos.get_mut(parent) {
                points *= combo.multiplier();
                combo.register_hit();
            }
            session.score += points;
            consumed.insert(target);
            commands.entity(target).despawn();
            continue;
        }

        if let Ok((entity, fragment, child_of, was_selected)) = fragments.get(target) {
            let parent = child_of.parent();
            if selection.get(&entity).copied().unwrap_or(was_selected) {
                // Tapping the selected fragment again clears the selection.
                selection.insert(entity, false);
                commands.entity(entity).remove::<SelectedFragment>();
                continue;
            }
            let prior = fragments
                .iter()
                .find(|(other, _, other_child, other_selected)| {
                    *other != entity
                        && other_child.parent() == parent
                        && !consumed.contains(other)
                        && selection.get(other).copied().unwrap_or(*other_selected)
                });
            match prior {
                None => {
                    selection.insert(entity, true);
                    commands.entity(entity).insert(SelectedFragment);
                }
                Some((other, other_fragment, _, _)) => {
                    if other_fragment.kind != fragment.kind {
                        if let Ok(mut session) = sessions.get_mut(parent) {
                            session.score += 25;
                        }
                        consumed.insert(entity);
                        consumed.insert(other);
                        commands.entity(entity).despawn();
                        commands.entity(other).despawn();
                    } else {
                        // Incompatible pair: clear the selection, no score.
                        selection.insert(other, false);
                        commands.entity(other).remove::<SelectedFragment>();
                    }
                }
            }
            continue;
        }

        if let Ok((node, child_of)) = patrols.get(target) {
            if let Ok(mut session) = sessions.get_mut(child_of.parent()) {
                match node {
                    PatrolNode::Threat { points } => session.score += points,
                    PatrolNode::Wildlife => {
                        session.score = session.score.saturating_sub(WILDLIFE_PENALTY);
                    }
                }
            }
            consumed.insert(target);
            commands.entity(target).despawn();
        }
    }
}

/// Advances the quiz. Correct answers score 15; the board moves on either
/// way, and answering the last question finishes the session early.
pub fn apply_quiz_answers(
    mut reader: MessageReader<QuizAnswer>,
    mut boards: Query<(Entity, &mut GameSession, &mut QuizBoard)>,
    mut commands: Commands,
) {
    let Ok((entity, mut session, mut board)) = boards.single_mut() else {
        reader.clear();
        return;
    };
    for answer in reader.read() {
        if board.finished() {
            break;
        }
        if answer.answer == board.questions[board.current].correct {
            session.score += QUIZ_SCORE;
        }
        board.current += 1;
    }
    if board.finished() {
        info!("Quiz finished with score {}", session.score);
        commands.trigger(GameCompleted {
            kind: session.kind,
            score: session.score,
        });
        commands.entity(entity).despawn();
    }
}

/// Sorts the current waste item into the picked bin. A matching bin scores;
/// either way the next item comes up, and sorting the last one finishes the
/// session early.
pub fn apply_bin_selections(
    mut reader: MessageReader<BinSelection>,
    mut boards: Query<(Entity, &mut GameSession, &mut SortBoard)>,
    mut commands: Commands,
) {
    let Ok((entity, mut session, mut board)) = boards.single_mut() else {
        reader.clear();
        return;
    };
    for pick in reader.read() {
        if board.finished() {
            break;
        }
        if pick.bin == board.items[board.current] {
            session.score += SORT_SCORE;
        }
        board.current += 1;
    }
    if board.finished() {
        info!("Sorting finished with score {}", session.score);
        commands.trigger(GameCompleted {
            kind: session.kind,
            score: session.score,
        });
        commands.entity(entity).despawn();
    }
}

/// Leaving the running state abandons any live session without credit.
pub fn teardown_sessions(live: Query<Entity, With<GameSession>>, mut commands: Commands) {
    for session in live.iter() {
        commands.entity(session).despawn();
    }
}

fn quiz_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            prompt: "Which bio-synthetic process most efficiently converts solar energy into system power?".into(),
            options: vec![
                "Photovoltaic cell arrays".into(),
                "Bio-luminescent energy capture".into(),
                "Hybrid organic-synthetic photosynthesis".into(),
                "All integrated systems combined".into(),
            ],
            correct: 3,
        },
        QuizQuestion {
            prompt: "How long does digital contamination persist in bio-synthetic memory cores?".into(),
            options: vec![
                "50 processing cycles".into(),
                "100 cycles".into(),
                "450 cycles".into(),
                "Indefinitely without purging".into(),
            ],
            correct: 3,
        },
        QuizQuestion {
            prompt: "What percentage of Terra Nova's energy grid is powered by renewable bio-synthesis?".into(),
            options: vec!["30%".into(), "60%".into(), "85%".into(), "99.7%".into()],
            correct: 3,
        },
        QuizQuestion {
            prompt: "Which system component is most critical for maintaining ecosystem data integrity?".into(),
            options: vec![
                "Bio-sensors".into(),
                "Neural networks".into(),
                "Quantum processors".into(),
                "All components working in harmony".into(),
            ],
            correct: 3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct CompletedLog(Vec<(GameKind, u32)>);

    fn track_completed(trigger: On<GameCompleted>, mut log: ResMut<CompletedLog>) {
        log.0.push((trigger.event().kind, trigger.event().score));
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<CompletedLog>()
            .add_message::<NodeInteraction>()
            .add_message::<QuizAnswer>()
            .add_message::<BinSelection>()
            .add_observer(start_game)
            .add_observer(track_completed)
            .add_systems(
                Update,
                (
                    tick_sessions,
                    tick_hazard_spawners,
                    tick_combo_trackers,
                    apply_node_interactions,
                    apply_quiz_answers,
                    apply_bin_selections,
                ),
            );
        app
    }

    fn advance(app: &mut App, secs: f32) {
        let mut time = app.world().resource::<Time>().clone();
        time.advance_by(Duration::from_secs_f32(secs));
        app.insert_resource(time);
        app.update();
    }

    #[test]
    fn test_start_spawns_decontamination_field() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::Decontaminate,
        });
        app.update();

        let world = app.world_mut();
        let sessions: Vec<_> = world
            .query::<(&GameSession, &HazardSpawner, &ComboTracker)>()
            .iter(world)
            .collect();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].0.kind, GameKind::Decontaminate);
        assert_eq!(sessions[0].0.score, 0);

        let hazards = world.query::<&HazardNode>().iter(world).count();
        assert_eq!(hazards, 12);
    }

    #[test]
    fn test_new_game_replaces_live_session() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::Decontaminate,
        });
        app.update();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::BioForge,
        });
        app.update();

        let world = app.world_mut();
        let sessions: Vec<_> = world.query::<&GameSession>().iter(world).collect();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].kind, GameKind::BioForge);
        assert_eq!(world.query::<&HazardNode>().iter(world).count(), 0);
        assert_eq!(world.query::<&FragmentNode>().iter(world).count(), 16);
        // Replacement is not completion.
        assert!(app.world().resource::<CompletedLog>().0.is_empty());
    }

    #[test]
    fn test_hazard_hits_score_with_combo() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::Decontaminate,
        });
        app.update();

        let world = app.world_mut();
        let targets: Vec<Entity> = world
            .query_filtered::<Entity, With<HazardNode>>()
            .iter(world)
            .take(2)
            .collect();
        let sizes: Vec<NodeSize> = targets
            .iter()
            .map(|t| world.entity(*t).get::<HazardNode>().unwrap().size)
            .collect();

        world.write_message(NodeInteraction { target: targets[0] });
        app.update();
        app.world_mut().write_message(NodeInteraction { target: targets[1] });
        app.update();

        let world = app.world_mut();
        let session = world.query::<&GameSession>().single(world).unwrap();
        // First hit at 1x, second at 2x.
        let expected = sizes[0].base_score() + sizes[1].base_score() * 2;
        assert_eq!(session.score, expected);
        assert_eq!(world.query::<&HazardNode>().iter(world).count(), 10);
    }

    #[test]
    fn test_consumed_target_is_ignored() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::Decontaminate,
        });
        app.update();

        let world = app.world_mut();
        let target = world
            .query_filtered::<Entity, With<HazardNode>>()
            .iter(world)
            .next()
            .unwrap();
        world.write_message(NodeInteraction { target });
        app.update();
        let score_after_first = {
            let world = app.world_mut();
            world.query::<&GameSession>().single(world).unwrap().score
        };

        // Same target again: the node is gone, so nothing changes.
        app.world_mut().write_message(NodeInteraction { target });
        app.update();
        let world = app.world_mut();
        let session = world.query::<&GameSession>().single(world).unwrap();
        assert_eq!(session.score, score_after_first);
    }

    #[test]
    fn test_countdown_expiry_reports_once_and_despawns() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::BioForge,
        });
        app.update();

        advance(&mut app, 61.0);
        advance(&mut app, 1.0);

        let log = app.world().resource::<CompletedLog>();
        assert_eq!(log.0, vec![(GameKind::BioForge, 0)]);
        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().iter(world).count(), 0);
        assert_eq!(world.query::<&FragmentNode>().iter(world).count(), 0);
    }

    #[test]
    fn test_quiz_finishes_early_with_correct_answers() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::DataStream,
        });
        app.update();

        // All four seeded questions share the same correct index.
        for _ in 0..4 {
            app.world_mut().write_message(QuizAnswer { answer: 3 });
            app.update();
        }

        let log = app.world().resource::<CompletedLog>();
        assert_eq!(log.0, vec![(GameKind::DataStream, 60)]);
        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().iter(world).count(), 0);
    }

    #[test]
    fn test_wrong_quiz_answer_scores_nothing() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::DataStream,
        });
        app.update();

        app.world_mut().write_message(QuizAnswer { answer: 0 });
        app.update();

        let world = app.world_mut();
        let (session, board) = world
            .query::<(&GameSession, &QuizBoard)>()
            .single(world)
            .unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(board.current, 1);
    }

    #[test]
    fn test_fragment_pairing() {
        let mut app = test_app();
        let session = app.world_mut().spawn(GameSession::new(GameKind::BioForge)).id();
        let bio = app
            .world_mut()
            .spawn((ChildOf(session), FragmentNode { kind: FragmentKind::Bio }))
            .id();
        let synth = app
            .world_mut()
            .spawn((ChildOf(session), FragmentNode { kind: FragmentKind::Synth }))
            .id();
        let bio2 = app
            .world_mut()
            .spawn((ChildOf(session), FragmentNode { kind: FragmentKind::Bio }))
            .id();

        // Same-kind pair clears the selection without scoring.
        app.world_mut().write_message(NodeInteraction { target: bio });
        app.update();
        app.world_mut().write_message(NodeInteraction { target: bio2 });
        app.update();
        {
            let world = app.world_mut();
            assert_eq!(world.query::<&GameSession>().single(world).unwrap().score, 0);
            assert_eq!(world.query::<&FragmentNode>().iter(world).count(), 3);
            assert_eq!(
                world
                    .query_filtered::<Entity, With<SelectedFragment>>()
                    .iter(world)
                    .count(),
                0
            );
        }

        // Different-kind pair scores and consumes both fragments.
        app.world_mut().write_message(NodeInteraction { target: bio });
        app.update();
        app.world_mut().write_message(NodeInteraction { target: synth });
        app.update();
        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().single(world).unwrap().score, 25);
        assert_eq!(world.query::<&FragmentNode>().iter(world).count(), 1);
    }

    #[test]
    fn test_wildlife_penalty_floors_at_zero() {
        let mut app = test_app();
        let session = app
            .world_mut()
            .spawn(GameSession::new(GameKind::WildlifePatrol))
            .id();
        let wildlife = app
            .world_mut()
            .spawn((ChildOf(session), PatrolNode::Wildlife))
            .id();
        let threat = app
            .world_mut()
            .spawn((ChildOf(session), PatrolNode::Threat { points: 15 }))
            .id();

        app.world_mut().write_message(NodeInteraction { target: wildlife });
        app.update();
        {
            let world = app.world_mut();
            assert_eq!(world.query::<&GameSession>().single(world).unwrap().score, 0);
        }

        app.world_mut().write_message(NodeInteraction { target: threat });
        app.update();
        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().single(world).unwrap().score, 15);
        assert_eq!(world.query::<&PatrolNode>().iter(world).count(), 0);
    }

    #[test]
    fn test_same_frame_double_tap_scores_once() {
        let mut app = test_app();
        let session = app
            .world_mut()
            .spawn((GameSession::new(GameKind::Decontaminate), ComboTracker::default()))
            .id();
        let hazard = app
            .world_mut()
            .spawn((
                ChildOf(session),
                HazardNode {
                    kind: HazardKind::Viral,
                    size: NodeSize::Medium,
                },
            ))
            .id();

        // Both taps land in one frame, before the despawn command applies.
        app.world_mut().write_message(NodeInteraction { target: hazard });
        app.world_mut().write_message(NodeInteraction { target: hazard });
        app.update();

        let world = app.world_mut();
        let session = world.query::<&GameSession>().single(world).unwrap();
        assert_eq!(session.score, NodeSize::Medium.base_score());
        assert_eq!(world.query::<&HazardNode>().iter(world).count(), 0);
    }

    #[test]
    fn test_same_frame_patrol_double_tap_applies_once() {
        let mut app = test_app();
        let session = app
            .world_mut()
            .spawn(GameSession::new(GameKind::WildlifePatrol))
            .id();
        let threat = app
            .world_mut()
            .spawn((ChildOf(session), PatrolNode::Threat { points: 10 }))
            .id();

        app.world_mut().write_message(NodeInteraction { target: threat });
        app.world_mut().write_message(NodeInteraction { target: threat });
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().single(world).unwrap().score, 10);
    }

    #[test]
    fn test_start_spawns_sorting_board() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::RecycleSort,
        });
        app.update();

        let world = app.world_mut();
        let (session, board) = world
            .query::<(&GameSession, &SortBoard)>()
            .single(world)
            .unwrap();
        assert_eq!(session.kind, GameKind::RecycleSort);
        assert_eq!(board.items.len(), 8);
        for kind in WasteKind::ALL {
            assert_eq!(board.items.iter().filter(|i| **i == kind).count(), 2);
        }
    }

    #[test]
    fn test_sorting_scores_correct_bins_and_finishes_early() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::RecycleSort,
        });
        app.update();

        let items = {
            let world = app.world_mut();
            world.query::<&SortBoard>().single(world).unwrap().items.clone()
        };
        // Sort the first item into a wrong bin, the rest correctly.
        let wrong = WasteKind::ALL
            .into_iter()
            .find(|kind| *kind != items[0])
            .unwrap();
        app.world_mut().write_message(BinSelection { bin: wrong });
        app.update();
        for item in &items[1..] {
            app.world_mut().write_message(BinSelection { bin: *item });
            app.update();
        }

        let log = app.world().resource::<CompletedLog>();
        assert_eq!(log.0, vec![(GameKind::RecycleSort, 70)]);
        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().iter(world).count(), 0);
    }

    #[test]
    fn test_teardown_abandons_without_credit() {
        let mut app = test_app();
        app.world_mut().trigger(StartGameRequest {
            kind: GameKind::Decontaminate,
        });
        app.update();

        let _ = app
            .world_mut()
            .run_system_cached(teardown_sessions);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&GameSession>().iter(world).count(), 0);
        assert_eq!(world.query::<&HazardNode>().iter(world).count(), 0);
        assert!(app.world().resource::<CompletedLog>().0.is_empty());
    }
}
