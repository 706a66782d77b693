use bevy::prelude::*;

/// Event to request crafting a recipe.
/// Used with observers via commands.trigger().
#[derive(Event)]
pub struct CraftItemRequest {
    pub recipe_id: String,
}

/// Fired when a craft succeeds and the result lands in the crafted-items
/// ledger.
#[derive(Event, Debug)]
pub struct ItemCrafted {
    pub item_id: String,
    pub quantity: u32,
}

/// Request to spend held resources (e.g. feeding a companion).
/// Fails with `LedgerError::InsufficientResources` when the held quantity is
/// short; nothing is mutated in that case.
#[derive(Event)]
pub struct UseResourceRequest {
    pub resource_id: String,
    pub quantity: u32,
}

/// Request to consume one crafted item.
#[derive(Event)]
pub struct UseItemRequest {
    pub item_id: String,
}
