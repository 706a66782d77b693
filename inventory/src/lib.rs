//! Sparse quantity ledgers: raw resources and crafted items.
//!
//! Entries that reach zero are removed; an absent entry reads as zero, so
//! `quantity() >= 0` holds for every possible call sequence.

use {
    bevy::prelude::*,
    crafting_events::{UseItemRequest, UseResourceRequest},
    std::collections::HashMap,
    thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient {resource_id}: requested {requested}, held {held}")]
    InsufficientResources {
        resource_id: String,
        requested: u32,
        held: u32,
    },
}

/// Raw resource holdings, keyed by resource id.
#[derive(Resource, Reflect, Default, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct Inventory {
    pub entries: HashMap<String, u32>,
}

/// Crafted item stacks, keyed by item id. Kept apart from raw resources:
/// recipes consume from `Inventory` and produce into this ledger.
#[derive(Resource, Reflect, Default, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct CraftedItems {
    pub entries: HashMap<String, u32>,
}

impl Inventory {
    pub fn add(&mut self, resource_id: &str, quantity: u32) {
        add_to(&mut self.entries, resource_id, quantity);
    }

    pub fn consume(
        &mut self,
        resource_id: &str,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        consume_from(&mut self.entries, resource_id, quantity)
    }

    pub fn quantity(&self, resource_id: &str) -> u32 {
        self.entries.get(resource_id).copied().unwrap_or(0)
    }
}

impl CraftedItems {
    pub fn add(&mut self, item_id: &str, quantity: u32) {
        add_to(&mut self.entries, item_id, quantity);
    }

    pub fn consume(
        &mut self,
        item_id: &str,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        consume_from(&mut self.entries, item_id, quantity)
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.entries.get(item_id).copied().unwrap_or(0)
    }
}

fn add_to(entries: &mut HashMap<String, u32>, id: &str, quantity: u32) {
    if quantity == 0 {
        return;
    }
    *entries.entry(id.to_string()).or_insert(0) += quantity;
}

fn consume_from(
    entries: &mut HashMap<String, u32>,
    id: &str,
    quantity: u32,
) -> Result<(), LedgerError> {
    let held = entries.get(id).copied().unwrap_or(0);
    if held < quantity {
        return Err(LedgerError::InsufficientResources {
            resource_id: id.to_string(),
            requested: quantity,
            held,
        });
    }
    if held == quantity {
        entries.remove(id);
    } else {
        entries.insert(id.to_string(), held - quantity);
    }
    Ok(())
}

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Inventory>()
            .register_type::<CraftedItems>()
            .init_resource::<Inventory>()
            .init_resource::<CraftedItems>()
            .add_observer(on_use_resource)
            .add_observer(on_use_item);
    }
}

/// Observer for explicit resource-spend requests from the presentation layer.
fn on_use_resource(
    trigger: On<UseResourceRequest>,
    mut inventory: ResMut<Inventory>,
) {
    let event = trigger.event();
    match inventory.consume(&event.resource_id, event.quantity) {
        Ok(()) => {
            debug!("Used {} x {}", event.quantity, event.resource_id);
        }
        Err(err) => warn!("Cannot use resource: {err}"),
    }
}

/// Observer for crafted-item consumption.
fn on_use_item(trigger: On<UseItemRequest>, mut items: ResMut<CraftedItems>) {
    let event = trigger.event();
    match items.consume(&event.item_id, 1) {
        Ok(()) => debug!("Used item {}", event.item_id),
        Err(err) => warn!("Cannot use item: {err}"),
    }
}
