//! Crafting evaluator: availability and craftability are pure predicates
//! over the recipe, the inventory ledger and the guardian level; `craft`
//! consumes requirements all-or-nothing.

use {
    bevy::{platform::collections::HashMap as PlatformHashMap, prelude::*},
    catalog_assets::RecipeDefinition,
    inventory::{Inventory, LedgerError},
    std::collections::HashMap,
    thiserror::Error,
};

pub mod systems;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CraftError {
    #[error("guardian level {level} below required {required}")]
    LevelTooLow { required: u32, level: u32 },
    #[error("insufficient {resource_id}: need {required}, held {held}")]
    InsufficientResources {
        resource_id: String,
        required: u32,
        held: u32,
    },
}

impl From<LedgerError> for CraftError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientResources {
                resource_id,
                requested,
                held,
            } => CraftError::InsufficientResources {
                resource_id,
                required: requested,
                held,
            },
        }
    }
}

/// The stack produced by a successful craft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftedStack {
    pub item_id: String,
    pub quantity: u32,
}

/// A recipe shows up at the bench once the guardian level reaches its
/// unlock level. Monotone: never regresses as level only increases.
pub fn recipe_available(recipe: &RecipeDefinition, level: u32) -> bool {
    level >= recipe.unlock_level
}

/// Requirement quantities summed per resource id, so a resource listed
/// twice is checked as one combined requirement against the snapshot.
fn combined_requirements(recipe: &RecipeDefinition) -> HashMap<&str, u32> {
    let mut needs: HashMap<&str, u32> = HashMap::new();
    for req in &recipe.requirements {
        *needs.entry(req.resource_id.as_str()).or_insert(0) += req.quantity;
    }
    needs
}

/// Pure predicate: available AND every combined requirement is covered by
/// the current inventory.
pub fn can_craft(
    recipe: &RecipeDefinition,
    ledger: &Inventory,
    level: u32,
) -> bool {
    recipe_available(recipe, level)
        && combined_requirements(recipe)
            .iter()
            .all(|(id, need)| ledger.quantity(id) >= *need)
}

/// Revalidates, then consumes every requirement. Validation runs against a
/// snapshot taken before any mutation, so failure leaves the ledger
/// untouched.
pub fn craft(
    recipe: &RecipeDefinition,
    ledger: &mut Inventory,
    level: u32,
) -> Result<CraftedStack, CraftError> {
    if !recipe_available(recipe, level) {
        return Err(CraftError::LevelTooLow {
            required: recipe.unlock_level,
            level,
        });
    }

    let needs = combined_requirements(recipe);
    for (id, need) in &needs {
        let held = ledger.quantity(id);
        if held < *need {
            return Err(CraftError::InsufficientResources {
                resource_id: (*id).to_string(),
                required: *need,
                held,
            });
        }
    }

    // Checked above against the combined sums; consumption cannot fail.
    for (id, need) in &needs {
        ledger.consume(id, *need)?;
    }

    Ok(CraftedStack {
        item_id: recipe.result_item.clone(),
        quantity: recipe.result_quantity,
    })
}

/// O(1) lookup of recipe definition handles by id. Populated during loading.
#[derive(Resource, Default)]
pub struct RecipeIndex {
    pub handles: PlatformHashMap<String, Handle<RecipeDefinition>>,
}

pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RecipeIndex>()
            .add_observer(systems::on_craft_request);
    }
}
