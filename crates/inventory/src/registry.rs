//! Item-definition registry.
//!
//! The catalog of item types an inventory may hold. Definitions are registered
//! during startup and are immutable afterwards; there is no update or
//! unregister operation. The registry is constructed explicitly and shared with
//! the ledger (typically behind an `Arc`), so tests can build isolated catalogs.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use satchel_core::{ActorId, ItemData, ItemKey};
use satchel_events::EventPublisher;

use crate::event::{ItemDefined, ItemEvent};
use crate::ledger::InventoryLedger;

/// Display name returned for keys that are not registered.
pub const INVALID_ITEM_NAME: &str = "Invalid Item";

/// What an `on_use` hook is told about the stack being used.
#[derive(Debug, Clone, PartialEq)]
pub struct UseContext {
    pub actor: ActorId,
    pub index: usize,
    pub key: ItemKey,
    pub data: Option<ItemData>,
}

/// Hook invoked when a stack is used. It may mutate the ledger (e.g. call
/// `remove_at` on `ctx.index`); those effects are visible once `use_at` returns.
pub type UseHook = Arc<dyn Fn(&mut InventoryLedger, &UseContext) + Send + Sync>;

/// Computes a dynamic name or description from a stack's data.
pub type TextHook = Arc<dyn Fn(Option<&ItemData>) -> String + Send + Sync>;

/// Registered template describing one item type.
#[derive(Clone)]
pub struct ItemDefinition {
    key: ItemKey,
    name: String,
    description: String,
    on_use: Option<UseHook>,
    name_fn: Option<TextHook>,
    description_fn: Option<TextHook>,
}

impl ItemDefinition {
    pub fn builder(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ItemBuilder {
        ItemBuilder {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            on_use: None,
            name_fn: None,
            description_fn: None,
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn on_use(&self) -> Option<&UseHook> {
        self.on_use.as_ref()
    }

    /// Name for a stack carrying `data`: the dynamic name if a hook exists,
    /// otherwise the static one.
    pub fn display_name(&self, data: Option<&ItemData>) -> String {
        match &self.name_fn {
            Some(hook) => hook(data),
            None => self.name.clone(),
        }
    }

    pub fn display_description(&self, data: Option<&ItemData>) -> String {
        match &self.description_fn {
            Some(hook) => hook(data),
            None => self.description.clone(),
        }
    }
}

impl core::fmt::Debug for ItemDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemDefinition")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("on_use", &self.on_use.is_some())
            .field("name_fn", &self.name_fn.is_some())
            .field("description_fn", &self.description_fn.is_some())
            .finish()
    }
}

/// Unvalidated definition input; validated by [`ItemRegistry::register_definition`].
pub struct ItemBuilder {
    key: String,
    name: String,
    description: String,
    on_use: Option<UseHook>,
    name_fn: Option<TextHook>,
    description_fn: Option<TextHook>,
}

impl ItemBuilder {
    pub fn on_use(
        mut self,
        hook: impl Fn(&mut InventoryLedger, &UseContext) + Send + Sync + 'static,
    ) -> Self {
        self.on_use = Some(Arc::new(hook));
        self
    }

    pub fn name_fn(mut self, hook: impl Fn(Option<&ItemData>) -> String + Send + Sync + 'static) -> Self {
        self.name_fn = Some(Arc::new(hook));
        self
    }

    pub fn description_fn(
        mut self,
        hook: impl Fn(Option<&ItemData>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.description_fn = Some(Arc::new(hook));
        self
    }
}

/// Why a registration was rejected. The registry is unchanged in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("item key cannot be empty")]
    EmptyKey,

    #[error("item name cannot be empty (key: {0})")]
    EmptyName(ItemKey),

    #[error("item already registered: {0}")]
    DuplicateKey(ItemKey),
}

/// Process-wide item catalog.
#[derive(Debug)]
pub struct ItemRegistry {
    definitions: Vec<ItemDefinition>,
    by_key: HashMap<ItemKey, usize>,
    publisher: EventPublisher<ItemEvent>,
}

impl ItemRegistry {
    pub fn new(publisher: EventPublisher<ItemEvent>) -> Self {
        Self {
            definitions: Vec::new(),
            by_key: HashMap::new(),
            publisher,
        }
    }

    /// Register a definition without hooks.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&ItemDefinition, RegistryError> {
        self.register_definition(ItemDefinition::builder(key, name, description))
    }

    /// Validate and store a definition, then announce it with `itemDefined`.
    ///
    /// Rejections are logged and leave the registry untouched.
    pub fn register_definition(
        &mut self,
        builder: ItemBuilder,
    ) -> Result<&ItemDefinition, RegistryError> {
        let definition = match Self::validate(&self.by_key, builder) {
            Ok(definition) => definition,
            Err(err) => {
                tracing::warn!(error = %err, "item registration rejected");
                return Err(err);
            }
        };

        let event = ItemDefined {
            key: definition.key.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
        };
        tracing::info!(key = %event.key, name = %event.name, "item defined");

        let index = self.definitions.len();
        self.by_key.insert(definition.key.clone(), index);
        self.definitions.push(definition);
        self.publisher.publish(ItemEvent::ItemDefined(event));
        Ok(&self.definitions[index])
    }

    fn validate(
        by_key: &HashMap<ItemKey, usize>,
        builder: ItemBuilder,
    ) -> Result<ItemDefinition, RegistryError> {
        let key = ItemKey::parse(builder.key).map_err(|_| RegistryError::EmptyKey)?;
        if builder.name.trim().is_empty() {
            return Err(RegistryError::EmptyName(key));
        }
        if by_key.contains_key(&key) {
            return Err(RegistryError::DuplicateKey(key));
        }

        Ok(ItemDefinition {
            key,
            name: builder.name,
            description: builder.description,
            on_use: builder.on_use,
            name_fn: builder.name_fn,
            description_fn: builder.description_fn,
        })
    }

    pub fn exists(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn lookup(&self, key: &str) -> Option<&ItemDefinition> {
        self.by_key.get(key).map(|&i| &self.definitions[i])
    }

    /// All registered keys, in registration order.
    pub fn list_keys(&self) -> Vec<&ItemKey> {
        self.definitions.iter().map(|d| &d.key).collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Display name for `key`, or [`INVALID_ITEM_NAME`] when unregistered.
    pub fn display_name(&self, key: &str, data: Option<&ItemData>) -> String {
        self.lookup(key)
            .map(|d| d.display_name(data))
            .unwrap_or_else(|| INVALID_ITEM_NAME.to_string())
    }

    /// Display description for `key`, or an empty string when unregistered.
    pub fn display_description(&self, key: &str, data: Option<&ItemData>) -> String {
        self.lookup(key)
            .map(|d| d.display_description(data))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription};
    use serde_json::json;

    fn test_registry() -> (ItemRegistry, Subscription<EventEnvelope<ItemEvent>>) {
        let bus = Arc::new(InMemoryEventBus::<EventEnvelope<ItemEvent>>::new());
        let sub = bus.subscribe();
        (ItemRegistry::new(EventPublisher::new(bus)), sub)
    }

    #[test]
    fn register_stores_definition_and_emits_item_defined() {
        let (mut registry, sub) = test_registry();

        let def = registry.register("item_medkit", "Medkit", "Heals 10 HP").unwrap();
        assert_eq!(def.key(), &ItemKey::parse("item_medkit").unwrap());
        assert_eq!(def.name(), "Medkit");
        assert!(registry.exists("item_medkit"));

        let events = sub.drain();
        assert_eq!(events.len(), 1);
        match events[0].payload() {
            ItemEvent::ItemDefined(e) => {
                assert_eq!(e.key, "item_medkit");
                assert_eq!(e.name, "Medkit");
                assert_eq!(e.description, "Heals 10 HP");
            }
            other => panic!("Expected ItemDefined event, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_key_is_rejected_and_first_definition_kept() {
        let (mut registry, sub) = test_registry();
        registry.register("item_medkit", "Medkit", "Heals 10 HP").unwrap();

        let err = registry.register("item_medkit", "Other", "Other").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey(k) if k == "item_medkit"));

        assert_eq!(registry.lookup("item_medkit").unwrap().name(), "Medkit");
        assert_eq!(registry.len(), 1);
        assert_eq!(sub.drain().len(), 1);
    }

    #[test]
    fn blank_key_or_name_is_rejected() {
        let (mut registry, sub) = test_registry();

        assert_eq!(registry.register("", "Name", "").unwrap_err(), RegistryError::EmptyKey);
        assert!(matches!(
            registry.register("item_x", "  ", "").unwrap_err(),
            RegistryError::EmptyName(_)
        ));
        assert!(registry.is_empty());
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn empty_description_is_allowed() {
        let (mut registry, _sub) = test_registry();
        let def = registry.register("item_rock", "Rock", "").unwrap();
        assert_eq!(def.description(), "");
    }

    #[test]
    fn list_keys_preserves_registration_order() {
        let (mut registry, _sub) = test_registry();
        for key in ["zeta", "alpha", "mid"] {
            registry.register(key, key, "").unwrap();
        }

        let keys: Vec<&str> = registry.list_keys().into_iter().map(ItemKey::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn display_text_uses_hooks_when_present() {
        let (mut registry, _sub) = test_registry();
        registry
            .register_definition(
                ItemDefinition::builder("item_sword", "Sword", "A blade")
                    .name_fn(|data| match data.and_then(|d| d["enchant"].as_str()) {
                        Some(enchant) => format!("Sword of {enchant}"),
                        None => "Plain Sword".to_string(),
                    })
                    .description_fn(|data| {
                        let durability = data.and_then(|d| d["durability"].as_i64()).unwrap_or(0);
                        format!("Durability {durability}")
                    }),
            )
            .unwrap();

        let data = json!({ "enchant": "Fire", "durability": 7 });
        assert_eq!(registry.display_name("item_sword", Some(&data)), "Sword of Fire");
        assert_eq!(registry.display_name("item_sword", None), "Plain Sword");
        assert_eq!(registry.display_description("item_sword", Some(&data)), "Durability 7");
    }

    #[test]
    fn display_text_falls_back_to_static_and_sentinels() {
        let (mut registry, _sub) = test_registry();
        registry.register("item_medkit", "Medkit", "Heals 10 HP").unwrap();

        assert_eq!(registry.display_name("item_medkit", Some(&json!(1))), "Medkit");
        assert_eq!(registry.display_description("item_medkit", None), "Heals 10 HP");
        assert_eq!(registry.display_name("missing", None), INVALID_ITEM_NAME);
        assert_eq!(registry.display_description("missing", None), "");
    }
}
