use {
    crate::{craft, RecipeIndex},
    bevy::prelude::*,
    catalog_assets::RecipeDefinition,
    crafting_events::{CraftItemRequest, ItemCrafted},
    inventory::{CraftedItems, Inventory},
    progression::{PlayerProfile, ProgressCounters},
};

/// Observer that handles CraftItemRequest events.
/// Validates and consumes requirements, then credits the crafted-items
/// ledger and the items-crafted counter.
pub fn on_craft_request(
    trigger: On<CraftItemRequest>,
    recipe_index: Res<RecipeIndex>,
    assets: Res<Assets<RecipeDefinition>>,
    mut ledger: ResMut<Inventory>,
    mut items: ResMut<CraftedItems>,
    mut counters: ResMut<ProgressCounters>,
    profile: Res<PlayerProfile>,
    mut commands: Commands,
) {
    let recipe_id = &trigger.event().recipe_id;

    let Some(handle) = recipe_index.handles.get(recipe_id) else {
        warn!("Recipe '{}' not found in RecipeIndex", recipe_id);
        return;
    };

    let Some(recipe) = assets.get(handle) else {
        warn!("Recipe definition not loaded for '{}'", recipe_id);
        return;
    };

    match craft(recipe, &mut ledger, profile.level) {
        Ok(stack) => {
            items.add(&stack.item_id, stack.quantity);
            counters.record_crafted(&stack.item_id, stack.quantity);
            info!("Crafted {} x {}", stack.quantity, stack.item_id);
            commands.trigger(ItemCrafted {
                item_id: stack.item_id,
                quantity: stack.quantity,
            });
        }
        Err(err) => warn!("Cannot craft '{}': {err}", recipe_id),
    }
}
