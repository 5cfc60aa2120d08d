//! Item registry and per-actor inventory ledger.
//!
//! Pure in-memory domain logic: no IO, no persistence, no transport. The
//! registry is the catalog of item types; the ledger tracks the stacks each
//! actor holds and announces every change on the injected event bus.

pub mod event;
pub mod ledger;
pub mod registry;
pub mod stack;

pub use event::{
    InventoryReplaced, ItemAdded, ItemDefined, ItemEvent, ItemRemoved, ItemRemovedCompletely,
    ItemUsed,
};
pub use ledger::InventoryLedger;
pub use registry::{
    INVALID_ITEM_NAME, ItemBuilder, ItemDefinition, ItemRegistry, RegistryError, TextHook,
    UseContext, UseHook,
};
pub use stack::{ActorInventory, InventoryStack};
