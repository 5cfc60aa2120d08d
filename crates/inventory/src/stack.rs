//! Per-actor stack sequences.

use serde::{Deserialize, Serialize};

use satchel_core::{ItemData, ItemKey, data_eq};

/// A quantity of one item key plus optional distinguishing data.
///
/// Stacks held in an [`ActorInventory`] always have `amount >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStack {
    pub key: ItemKey,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ItemData>,
}

impl InventoryStack {
    pub fn new(key: ItemKey, amount: i64, data: Option<ItemData>) -> Self {
        Self { key, amount, data }
    }

    /// Same stack identity: equal key and structurally equal data.
    pub fn matches(&self, key: &str, data: Option<&ItemData>) -> bool {
        self.key == key && data_eq(self.data.as_ref(), data)
    }
}

/// Ordered stack sequence owned by a single actor.
///
/// Indices are positions in this sequence; removing a stack shifts every later
/// index down by one, so an index must be re-resolved after any removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorInventory {
    stacks: Vec<InventoryStack>,
}

impl ActorInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stacks(&self) -> &[InventoryStack] {
        &self.stacks
    }

    pub fn get(&self, index: usize) -> Option<&InventoryStack> {
        self.stacks.get(index)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Any stack with `key`, whatever its data.
    pub fn has_item(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn has_item_with_data(&self, key: &str, data: Option<&ItemData>) -> bool {
        self.index_of_with_data(key, data).is_some()
    }

    /// First stack with `key`, whatever its data.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.stacks.iter().position(|s| s.key == key)
    }

    pub fn index_of_with_data(&self, key: &str, data: Option<&ItemData>) -> Option<usize> {
        self.stacks.iter().position(|s| s.matches(key, data))
    }

    /// Units of `key` across every stack, whatever its data.
    pub fn amount_of(&self, key: &str) -> i64 {
        saturating_total(self.stacks.iter().filter(|s| s.key == key))
    }

    pub fn amount_of_with_data(&self, key: &str, data: Option<&ItemData>) -> i64 {
        saturating_total(self.stacks.iter().filter(|s| s.matches(key, data)))
    }

    /// Units across every stack. Sums clamp at `i64::MAX`.
    pub fn total_amount(&self) -> i64 {
        saturating_total(self.stacks.iter())
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut InventoryStack> {
        self.stacks.get_mut(index)
    }

    pub(crate) fn push(&mut self, stack: InventoryStack) {
        self.stacks.push(stack);
    }

    pub(crate) fn remove(&mut self, index: usize) -> InventoryStack {
        self.stacks.remove(index)
    }

    pub(crate) fn replace(&mut self, stacks: Vec<InventoryStack>) -> Vec<InventoryStack> {
        core::mem::replace(&mut self.stacks, stacks)
    }
}

fn saturating_total<'a>(stacks: impl Iterator<Item = &'a InventoryStack>) -> i64 {
    stacks.fold(0i64, |total, s| total.saturating_add(s.amount))
}

impl From<Vec<InventoryStack>> for ActorInventory {
    fn from(stacks: Vec<InventoryStack>) -> Self {
        Self { stacks }
    }
}
