// SPDX-License-Identifier: MIT OR Apache-2.0
//! Collectible items and the authoring-time item registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Create a new random item ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// A collectible item referenced by node details.
///
/// Items are created once at authoring time and never mutated afterwards.
/// Two items are equal iff their ids match; the display name carries no
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique item ID
    pub id: ItemId,
    /// Display name
    pub name: String,
}

impl Item {
    /// Create a new item with a fresh ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

/// Registry of authored items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRegistry {
    /// Registered items by ID
    items: IndexMap<ItemId, Item>,
}

impl ItemRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Register an item, returning its ID
    pub fn register(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.insert(id, item);
        id
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Check whether an item is registered
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Get all registered items in registration order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Get the number of registered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
