//! Per-actor inventory ledger.
//!
//! Every mutating operation reports ordinary misuse (unknown actor, unknown
//! key, bad index, non-positive amount) as `false` and leaves state untouched.
//! Successful mutations are applied first and then announced on the bus.
//!
//! Operations run to completion synchronously. Each actor's inventory is owned
//! by this ledger; if actors are ever driven from several threads, wrap the
//! ledger (or each inventory) in a lock around `give`, `use_at`, `remove_at`
//! and `replace_inventory`.

use std::collections::HashMap;
use std::sync::Arc;

use satchel_core::{ActorId, ItemData};
use satchel_events::EventPublisher;

use crate::event::{
    InventoryReplaced, ItemAdded, ItemEvent, ItemRemoved, ItemRemovedCompletely, ItemUsed,
};
use crate::registry::{ItemRegistry, UseContext};
use crate::stack::{ActorInventory, InventoryStack};

pub struct InventoryLedger {
    registry: Arc<ItemRegistry>,
    publisher: EventPublisher<ItemEvent>,
    inventories: HashMap<ActorId, ActorInventory>,
}

impl InventoryLedger {
    pub fn new(registry: Arc<ItemRegistry>, publisher: EventPublisher<ItemEvent>) -> Self {
        Self {
            registry,
            publisher,
            inventories: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Host hook: an actor entered the system. Starts (or restarts) it empty.
    pub fn on_actor_join(&mut self, actor: ActorId) {
        self.inventories.insert(actor, ActorInventory::new());
        tracing::debug!(%actor, "inventory initialized");
    }

    /// Host-side discard of an actor's inventory. No event is published.
    pub fn remove_actor(&mut self, actor: ActorId) -> Option<ActorInventory> {
        self.inventories.remove(&actor)
    }

    pub fn inventory(&self, actor: ActorId) -> Option<&ActorInventory> {
        self.inventories.get(&actor)
    }

    pub fn actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.inventories.keys().copied()
    }

    /// Give `amount` units of `key` with optional `data`.
    ///
    /// Merges into the first stack with the same key and structurally equal
    /// data, otherwise appends a new stack.
    pub fn give(&mut self, actor: ActorId, key: &str, amount: i64, data: Option<ItemData>) -> bool {
        if amount < 1 {
            return false;
        }
        let Some(definition) = self.registry.lookup(key) else {
            return false;
        };
        let Some(inventory) = self.inventories.get_mut(&actor) else {
            return false;
        };

        match inventory.index_of_with_data(key, data.as_ref()) {
            Some(index) => {
                let Some(stack) = inventory.get_mut(index) else {
                    return false;
                };
                let Some(total) = stack.amount.checked_add(amount) else {
                    return false;
                };
                stack.amount = total;
            }
            None => inventory.push(InventoryStack::new(
                definition.key().clone(),
                amount,
                data.clone(),
            )),
        }

        let key = definition.key().clone();
        tracing::debug!(%actor, %key, amount, "item given");
        self.publisher.publish(ItemEvent::ItemAdded(ItemAdded {
            actor,
            key,
            amount,
            data,
        }));
        true
    }

    /// Use the stack at `index`.
    ///
    /// Publishes `itemUsed`, then runs the definition's `on_use` hook if it has
    /// one. Using never changes the amount by itself; consumption is up to the
    /// hook (or the caller), so reusable items can simply omit it.
    pub fn use_at(&mut self, actor: ActorId, index: usize) -> bool {
        let Some(stack) = self.inventories.get(&actor).and_then(|inv| inv.get(index)) else {
            return false;
        };
        let ctx = UseContext {
            actor,
            index,
            key: stack.key.clone(),
            data: stack.data.clone(),
        };
        let hook = self
            .registry
            .lookup(ctx.key.as_str())
            .and_then(|d| d.on_use().cloned());

        tracing::debug!(%actor, key = %ctx.key, index, hooked = hook.is_some(), "item used");
        self.publisher.publish(ItemEvent::ItemUsed(ItemUsed {
            actor,
            index,
            key: ctx.key.clone(),
            data: ctx.data.clone(),
        }));

        if let Some(hook) = hook {
            hook(self, &ctx);
        }
        true
    }

    /// Take `amount` units from the stack at `index`.
    ///
    /// The amount is not clamped: removing more than the stack holds still
    /// reports the full `amount` in `itemRemoved`, and the stack is dropped
    /// (`itemRemovedCompletely`) once it falls below one unit.
    pub fn remove_at(&mut self, actor: ActorId, index: usize, amount: i64) -> bool {
        if amount < 1 {
            return false;
        }
        let Some(inventory) = self.inventories.get_mut(&actor) else {
            return false;
        };
        let Some(stack) = inventory.get_mut(index) else {
            return false;
        };

        stack.amount = stack.amount.saturating_sub(amount);
        let remaining = stack.amount;
        let key = stack.key.clone();
        let data = stack.data.clone();
        let emptied = remaining < 1;
        if emptied {
            inventory.remove(index);
        }

        tracing::debug!(%actor, %key, index, amount, remaining, "item removed");
        self.publisher.publish(ItemEvent::ItemRemoved(ItemRemoved {
            actor,
            index,
            key: key.clone(),
            amount,
            data: data.clone(),
        }));
        if emptied {
            self.publisher
                .publish(ItemEvent::ItemRemovedCompletely(ItemRemovedCompletely {
                    actor,
                    key,
                    data,
                }));
        }
        true
    }

    pub fn remove_one(&mut self, actor: ActorId, index: usize) -> bool {
        self.remove_at(actor, index, 1)
    }

    /// Swap an actor's whole sequence (bulk load).
    ///
    /// A sequence holding a stack with `amount < 1` is rejected. Keys are not
    /// checked against the registry, so retired items survive a reload.
    pub fn replace_inventory(&mut self, actor: ActorId, stacks: Vec<InventoryStack>) -> bool {
        if stacks.iter().any(|s| s.amount < 1) {
            return false;
        }
        let Some(inventory) = self.inventories.get_mut(&actor) else {
            return false;
        };

        let old = inventory.replace(stacks.clone());
        tracing::debug!(%actor, old_len = old.len(), new_len = stacks.len(), "inventory replaced");
        self.publisher
            .publish(ItemEvent::InventoryReplaced(InventoryReplaced {
                actor,
                old,
                new: stacks,
            }));
        true
    }

    /// Display name of the stack at `index`, resolved through its data.
    pub fn display_name_at(&self, actor: ActorId, index: usize) -> Option<String> {
        let stack = self.inventory(actor)?.get(index)?;
        Some(self.registry.display_name(stack.key.as_str(), stack.data.as_ref()))
    }

    pub fn description_at(&self, actor: ActorId, index: usize) -> Option<String> {
        let stack = self.inventory(actor)?.get(index)?;
        Some(
            self.registry
                .display_description(stack.key.as_str(), stack.data.as_ref()),
        )
    }
}

impl core::fmt::Debug for InventoryLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryLedger")
            .field("registry_len", &self.registry.len())
            .field("inventories", &self.inventories)
            .finish_non_exhaustive()
    }
}
