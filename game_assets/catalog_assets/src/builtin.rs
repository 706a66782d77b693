//! Builtin seed catalogs.
//!
//! Inserted into the asset collections at load so the core is playable with
//! an empty assets directory; RON files with the same ids take precedence.

use {
    crate::{
        ObjectiveGoal, ObjectiveSpec, QuestCategory, QuestDefinition,
        QuestKind, Rarity, RecipeCategory, RecipeDefinition, Requirement,
        ResourceCategory, ResourceDefinition, RewardSpec,
    },
    shared_components::GameKind,
};

pub fn resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            id: "bio-material".into(),
            name: "Bio-Material".into(),
            description: "Organic compounds essential for bio-synthesis".into(),
            rarity: Rarity::Common,
            category: ResourceCategory::BioMaterial,
        },
        ResourceDefinition {
            id: "energy-core".into(),
            name: "Energy Core".into(),
            description: "Concentrated bio-energy for powering systems".into(),
            rarity: Rarity::Uncommon,
            category: ResourceCategory::EnergyCore,
        },
        ResourceDefinition {
            id: "data-fragment".into(),
            name: "Data Fragment".into(),
            description: "Processed environmental data packets".into(),
            rarity: Rarity::Common,
            category: ResourceCategory::DataFragment,
        },
        ResourceDefinition {
            id: "synthetic-component".into(),
            name: "Synthetic Component".into(),
            description: "Advanced synthetic materials for crafting".into(),
            rarity: Rarity::Rare,
            category: ResourceCategory::SyntheticComponent,
        },
    ]
}

pub fn recipes() -> Vec<RecipeDefinition> {
    vec![
        RecipeDefinition {
            id: "bio-enhancer".into(),
            name: "Bio-Enhancer".into(),
            description: "Boosts bio-synthesis efficiency by 25% for 10 minutes"
                .into(),
            result_item: "bio-enhancer".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement { resource_id: "bio-material".into(), quantity: 3 },
                Requirement { resource_id: "energy-core".into(), quantity: 1 },
            ],
            category: RecipeCategory::Consumable,
            unlock_level: 3,
        },
        RecipeDefinition {
            id: "data-amplifier".into(),
            name: "Data Amplifier".into(),
            description: "Increases data processing rewards by 50% for 15 minutes"
                .into(),
            result_item: "data-amplifier".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement { resource_id: "data-fragment".into(), quantity: 5 },
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 1,
                },
            ],
            category: RecipeCategory::Consumable,
            unlock_level: 4,
        },
        RecipeDefinition {
            id: "drone-upgrade-speed".into(),
            name: "Speed Upgrade Module".into(),
            description: "Permanently increases Eco-Drone movement speed by 30%"
                .into(),
            result_item: "drone-upgrade-speed".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 2,
                },
                Requirement { resource_id: "energy-core".into(), quantity: 2 },
                Requirement { resource_id: "data-fragment".into(), quantity: 3 },
            ],
            category: RecipeCategory::DroneUpgrade,
            unlock_level: 5,
        },
        RecipeDefinition {
            id: "drone-upgrade-efficiency".into(),
            name: "Efficiency Upgrade Module".into(),
            description: "Increases Eco-Drone task completion efficiency by 40%"
                .into(),
            result_item: "drone-upgrade-efficiency".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement { resource_id: "bio-material".into(), quantity: 4 },
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 1,
                },
                Requirement { resource_id: "energy-core".into(), quantity: 1 },
            ],
            category: RecipeCategory::DroneUpgrade,
            unlock_level: 4,
        },
        RecipeDefinition {
            id: "sanctuary-fountain".into(),
            name: "Bio-Fountain".into(),
            description: "A beautiful fountain that generates passive bio-energy"
                .into(),
            result_item: "sanctuary-fountain".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement { resource_id: "bio-material".into(), quantity: 5 },
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 2,
                },
                Requirement { resource_id: "data-fragment".into(), quantity: 2 },
            ],
            category: RecipeCategory::SanctuaryDecoration,
            unlock_level: 6,
        },
        RecipeDefinition {
            id: "sanctuary-garden".into(),
            name: "Quantum Garden".into(),
            description: "Advanced garden that attracts rare digital wildlife"
                .into(),
            result_item: "sanctuary-garden".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement { resource_id: "bio-material".into(), quantity: 8 },
                Requirement { resource_id: "energy-core".into(), quantity: 3 },
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 1,
                },
            ],
            category: RecipeCategory::SanctuaryDecoration,
            unlock_level: 7,
        },
        RecipeDefinition {
            id: "system-scanner".into(),
            name: "System Scanner".into(),
            description: "Tool that reveals hidden resources in mini-games".into(),
            result_item: "system-scanner".into(),
            result_quantity: 1,
            requirements: vec![
                Requirement {
                    resource_id: "data-fragment".into(),
                    quantity: 10,
                },
                Requirement {
                    resource_id: "synthetic-component".into(),
                    quantity: 3,
                },
            ],
            category: RecipeCategory::Tool,
            unlock_level: 5,
        },
    ]
}

pub fn quests() -> Vec<QuestDefinition> {
    vec![
        QuestDefinition {
            id: "daily-decontamination".into(),
            title: "Daily System Purge".into(),
            description: "Complete 3 decontamination protocols to maintain system integrity"
                .into(),
            kind: QuestKind::Daily,
            category: QuestCategory::MiniGames,
            objectives: vec![ObjectiveSpec {
                id: "decontaminate-3".into(),
                description: "Complete 3 Decontamination Protocols".into(),
                goal: ObjectiveGoal::CompleteGames(GameKind::Decontaminate),
                target: 3,
            }],
            rewards: vec![
                RewardSpec::BioCredits(150),
                RewardSpec::Xp(50),
                RewardSpec::Resource { id: "bio-material".into(), amount: 2 },
            ],
            unlock_level: None,
            expires_in_hours: Some(24),
            starts_active: true,
        },
        QuestDefinition {
            id: "daily-data-stream".into(),
            title: "Data Stream Analysis".into(),
            description: "Process environmental data to earn system credits".into(),
            kind: QuestKind::Daily,
            category: QuestCategory::MiniGames,
            objectives: vec![ObjectiveSpec {
                id: "data-stream-2".into(),
                description: "Complete 2 Data Stream Duels".into(),
                goal: ObjectiveGoal::CompleteGames(GameKind::DataStream),
                target: 2,
            }],
            rewards: vec![
                RewardSpec::BioCredits(100),
                RewardSpec::Resource { id: "data-fragment".into(), amount: 3 },
            ],
            unlock_level: None,
            expires_in_hours: Some(24),
            starts_active: true,
        },
        QuestDefinition {
            id: "weekly-bio-synthesis".into(),
            title: "Master Bio-Synthesist".into(),
            description: "Demonstrate mastery of bio-synthesis protocols".into(),
            kind: QuestKind::Weekly,
            category: QuestCategory::MiniGames,
            objectives: vec![ObjectiveSpec {
                id: "bioforge-10".into(),
                description: "Complete 10 Bio-Forge Synthesis sessions".into(),
                goal: ObjectiveGoal::CompleteGames(GameKind::BioForge),
                target: 10,
            }],
            rewards: vec![
                RewardSpec::BioCredits(500),
                RewardSpec::Xp(200),
                RewardSpec::Resource { id: "energy-core".into(), amount: 1 },
            ],
            unlock_level: None,
            expires_in_hours: Some(24 * 7),
            starts_active: true,
        },
        QuestDefinition {
            id: "story-guardian-awakening".into(),
            title: "Guardian Awakening".into(),
            description: "Begin your journey as a Bio-Synth Guardian of Terra Nova"
                .into(),
            kind: QuestKind::Story,
            category: QuestCategory::Progression,
            objectives: vec![
                ObjectiveSpec {
                    id: "reach-level-5".into(),
                    description: "Reach Guardian Level 5".into(),
                    goal: ObjectiveGoal::ReachLevel,
                    target: 5,
                },
                ObjectiveSpec {
                    id: "earn-1000-credits".into(),
                    description: "Earn 1000 Bio-Credits".into(),
                    goal: ObjectiveGoal::EarnCredits,
                    target: 1000,
                },
            ],
            rewards: vec![
                RewardSpec::Item { id: "guardian-badge".into() },
                RewardSpec::BioCredits(300),
                RewardSpec::Achievement { id: "guardian-awakened".into() },
            ],
            unlock_level: Some(3),
            expires_in_hours: None,
            starts_active: false,
        },
        QuestDefinition {
            id: "story-system-restoration".into(),
            title: "System Restoration Initiative".into(),
            description: "Help restore Terra Nova's critical bio-synthetic systems"
                .into(),
            kind: QuestKind::Story,
            category: QuestCategory::Collection,
            objectives: vec![
                ObjectiveSpec {
                    id: "collect-bio-materials".into(),
                    description: "Collect 20 Bio-Materials".into(),
                    goal: ObjectiveGoal::CollectResources("bio-material".into()),
                    target: 20,
                },
                ObjectiveSpec {
                    id: "collect-energy-cores".into(),
                    description: "Collect 5 Energy Cores".into(),
                    goal: ObjectiveGoal::CollectResources("energy-core".into()),
                    target: 5,
                },
            ],
            rewards: vec![
                RewardSpec::BioCredits(750),
                RewardSpec::Item { id: "system-key".into() },
                RewardSpec::Xp(300),
            ],
            unlock_level: Some(5),
            expires_in_hours: None,
            starts_active: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let mut ids: Vec<String> = resources().into_iter().map(|r| r.id).collect();
        ids.extend(recipes().into_iter().map(|r| r.id));
        ids.extend(quests().into_iter().map(|q| q.id));
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_recipe_requirements_reference_seed_resources() {
        let known: Vec<String> =
            resources().into_iter().map(|r| r.id).collect();
        for recipe in recipes() {
            for req in &recipe.requirements {
                assert!(
                    known.contains(&req.resource_id),
                    "{} references unknown resource {}",
                    recipe.id,
                    req.resource_id
                );
            }
        }
    }
}
