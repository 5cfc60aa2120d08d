use serde::{Deserialize, Serialize};

use satchel_core::{ActorId, ItemData, ItemKey};
use satchel_events::Event;

use crate::stack::InventoryStack;

/// Event: an item type was registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefined {
    pub key: ItemKey,
    pub name: String,
    pub description: String,
}

/// Event: units were given to an actor (merged or appended).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub actor: ActorId,
    pub key: ItemKey,
    pub amount: i64,
    pub data: Option<ItemData>,
}

/// Event: the stack at `index` was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUsed {
    pub actor: ActorId,
    pub index: usize,
    pub key: ItemKey,
    pub data: Option<ItemData>,
}

/// Event: `amount` units were taken from the stack at `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub actor: ActorId,
    pub index: usize,
    pub key: ItemKey,
    pub amount: i64,
    pub data: Option<ItemData>,
}

/// Event: a stack dropped below one unit and left the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemovedCompletely {
    pub actor: ActorId,
    pub key: ItemKey,
    pub data: Option<ItemData>,
}

/// Event: an actor's whole stack sequence was swapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReplaced {
    pub actor: ActorId,
    pub old: Vec<InventoryStack>,
    pub new: Vec<InventoryStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ItemEvent {
    ItemDefined(ItemDefined),
    ItemAdded(ItemAdded),
    ItemUsed(ItemUsed),
    ItemRemoved(ItemRemoved),
    ItemRemovedCompletely(ItemRemovedCompletely),
    InventoryReplaced(InventoryReplaced),
}

impl ItemEvent {
    /// Notification name as seen by subscribers (`itemAdded`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            ItemEvent::ItemDefined(_) => "itemDefined",
            ItemEvent::ItemAdded(_) => "itemAdded",
            ItemEvent::ItemUsed(_) => "itemUsed",
            ItemEvent::ItemRemoved(_) => "itemRemoved",
            ItemEvent::ItemRemovedCompletely(_) => "itemRemovedCompletely",
            ItemEvent::InventoryReplaced(_) => "inventoryReplaced",
        }
    }

    /// Actor concerned, if any (`itemDefined` is catalog-wide).
    pub fn actor(&self) -> Option<ActorId> {
        match self {
            ItemEvent::ItemDefined(_) => None,
            ItemEvent::ItemAdded(e) => Some(e.actor),
            ItemEvent::ItemUsed(e) => Some(e.actor),
            ItemEvent::ItemRemoved(e) => Some(e.actor),
            ItemEvent::ItemRemovedCompletely(e) => Some(e.actor),
            ItemEvent::InventoryReplaced(e) => Some(e.actor),
        }
    }
}

impl Event for ItemEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ItemEvent::ItemDefined(_) => "item.defined",
            ItemEvent::ItemAdded(_) => "inventory.item.added",
            ItemEvent::ItemUsed(_) => "inventory.item.used",
            ItemEvent::ItemRemoved(_) => "inventory.item.removed",
            ItemEvent::ItemRemovedCompletely(_) => "inventory.item.removed_completely",
            ItemEvent::InventoryReplaced(_) => "inventory.replaced",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
