//! Guardian progression: level, XP, bio-credits, daily streak, and the
//! counters the quest objectives project from.

use {
    bevy::prelude::*,
    growth::{Curve, XpCurve},
    shared_components::GameKind,
    std::collections::{HashMap, HashSet},
};

pub mod systems;

/// XP thresholds used for automatic level-ups.
#[derive(Resource, Debug, Clone)]
pub struct LevelCurve(pub Curve);

impl Default for LevelCurve {
    fn default() -> Self {
        Self(growth::guardian_curve())
    }
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct PlayerProfile {
    /// Guardian level, always >= 1
    pub level: u32,
    /// XP towards the next level; overflow carries on level-up
    pub xp: u32,
    pub bio_credits: u32,
    pub daily_streak: u32,
    /// Set semantics: granting a held achievement is a no-op
    pub achievements: HashSet<String>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        // The seeded guardian profile from the session start.
        Self {
            level: 3,
            xp: 150,
            bio_credits: 750,
            daily_streak: 5,
            achievements: [
                "system-online",
                "decontamination-expert",
                "data-stream-champion",
                "daily-operative",
                "corruption-purger",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl PlayerProfile {
    pub fn grant_credits(&mut self, amount: u32) {
        self.bio_credits += amount;
    }

    /// Adds XP and resolves any level-ups against the curve, carrying the
    /// remainder. Returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: u32, curve: &Curve) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        loop {
            let threshold = curve.xp_to_next(self.level);
            if self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            self.level += 1;
            gained += 1;
        }
        gained
    }

    /// Returns false if the achievement was already held.
    pub fn grant_achievement(&mut self, id: &str) -> bool {
        self.achievements.insert(id.to_string())
    }
}

/// Monotone counters the quest objectives are projected from.
/// Written only by the reward/completion paths.
#[derive(Resource, Reflect, Default, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct ProgressCounters {
    pub games_completed: HashMap<GameKind, u32>,
    pub resources_collected: HashMap<String, u32>,
    pub items_crafted: HashMap<String, u32>,
}

impl ProgressCounters {
    pub fn record_game(&mut self, kind: GameKind) {
        *self.games_completed.entry(kind).or_insert(0) += 1;
    }

    pub fn record_resources(&mut self, resource_id: &str, amount: u32) {
        *self
            .resources_collected
            .entry(resource_id.to_string())
            .or_insert(0) += amount;
    }

    pub fn record_crafted(&mut self, item_id: &str, amount: u32) {
        *self.items_crafted.entry(item_id.to_string()).or_insert(0) += amount;
    }

    pub fn games(&self, kind: GameKind) -> u32 {
        self.games_completed.get(&kind).copied().unwrap_or(0)
    }

    pub fn collected(&self, resource_id: &str) -> u32 {
        self.resources_collected
            .get(resource_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn crafted(&self, item_id: &str) -> u32 {
        self.items_crafted.get(item_id).copied().unwrap_or(0)
    }
}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlayerProfile>()
            .register_type::<ProgressCounters>()
            .init_resource::<PlayerProfile>()
            .init_resource::<ProgressCounters>()
            .init_resource::<LevelCurve>()
            .add_observer(systems::on_game_completed)
            .add_observer(systems::on_claim_daily_reward);
    }
}
