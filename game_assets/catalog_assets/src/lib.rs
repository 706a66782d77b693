//! Static catalog definitions for the Terra Nova core.
//!
//! Resources, recipes and quests are loaded from `.resource.ron`,
//! `.recipe.ron` and `.quest.ron` asset files. The `builtin` module carries
//! the seed catalogs so the core runs without an asset directory.

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    serde::Deserialize,
    shared_components::GameKind,
};

pub mod builtin;

pub struct CatalogAssetsPlugin;

impl Plugin for CatalogAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<ResourceDefinition>::new(&[
            "resource.ron",
        ]))
        .add_plugins(RonAssetPlugin::<RecipeDefinition>::new(&["recipe.ron"]))
        .add_plugins(RonAssetPlugin::<QuestDefinition>::new(&["quest.ron"]))
        .register_type::<Rarity>()
        .register_type::<ResourceCategory>()
        .register_type::<RecipeCategory>()
        .register_type::<QuestKind>()
        .register_type::<QuestCategory>();
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Resource kind loaded from `.resource.ron` asset files.
/// Immutable; instances only ever exist as quantities in the inventory.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct ResourceDefinition {
    /// Stable identifier (e.g. "bio-material")
    pub id: String,
    /// Display name shown in UI
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub category: ResourceCategory,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ResourceCategory {
    #[default]
    BioMaterial,
    EnergyCore,
    DataFragment,
    SyntheticComponent,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Craftable item definition loaded from `.recipe.ron` asset files.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct RecipeDefinition {
    /// Unique identifier (e.g. "bio-enhancer")
    pub id: String,
    pub name: String,
    pub description: String,
    /// Item id credited to the crafted-items ledger on success
    pub result_item: String,
    pub result_quantity: u32,
    /// Resource costs. A resource id may appear more than once; costs are
    /// summed before checking.
    pub requirements: Vec<Requirement>,
    /// Category for tab-based organization
    pub category: RecipeCategory,
    /// Minimum guardian level before the recipe shows up at the bench
    pub unlock_level: u32,
}

#[derive(Reflect, Debug, Clone, Deserialize)]
pub struct Requirement {
    pub resource_id: String,
    pub quantity: u32,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum RecipeCategory {
    #[default]
    Consumable,
    DroneUpgrade,
    SanctuaryDecoration,
    Tool,
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// Quest definition loaded from `.quest.ron` asset files.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct QuestDefinition {
    /// Unique identifier (e.g. "daily-decontamination")
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub category: QuestCategory,
    pub objectives: Vec<ObjectiveSpec>,
    pub rewards: Vec<RewardSpec>,
    /// Guardian level required before the quest leaves `Locked`
    #[serde(default)]
    pub unlock_level: Option<u32>,
    /// Nominal expiry window for dailies/weeklies. Displayed only; no
    /// scheduler retires expired quests.
    #[serde(default)]
    pub expires_in_hours: Option<u64>,
    /// Seeded dailies/weeklies spawn directly `Active` instead of
    /// `Available`.
    #[serde(default)]
    pub starts_active: bool,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum QuestKind {
    #[default]
    Daily,
    Weekly,
    Story,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum QuestCategory {
    #[default]
    MiniGames,
    Progression,
    Collection,
    Social,
}

/// One typed counter-vs-target check inside a quest.
#[derive(Reflect, Debug, Clone, Deserialize)]
pub struct ObjectiveSpec {
    /// Unique within the quest
    pub id: String,
    pub description: String,
    pub goal: ObjectiveGoal,
    pub target: u32,
}

/// Selects the external counter an objective's `current` is projected from.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ObjectiveGoal {
    /// `games_completed[kind]`
    CompleteGames(GameKind),
    /// Current bio-credit balance
    EarnCredits,
    /// Current guardian level
    ReachLevel,
    /// `resources_collected[resource id]`
    CollectResources(String),
    /// `items_crafted[item id]`
    CraftItems(String),
}

/// Reward granted when a quest completes.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum RewardSpec {
    BioCredits(u32),
    Xp(u32),
    Resource { id: String, amount: u32 },
    Item { id: String },
    /// Set semantics: granting an already-held achievement is a no-op.
    Achievement { id: String },
}
