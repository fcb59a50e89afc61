use crate::models::{Item, ItemId};
use crate::notify::Event;
use serde_json::{Map, Value};

/// Owns every item of the session in insertion order
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Wrap raw records as items, all visible.
    /// Records are taken as-is; a missing facet key just means "no value".
    pub fn initialize<I>(raw_items: I) -> Self
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(idx, attributes)| Item::new(ItemId(idx), attributes))
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Visible items in insertion order
    pub fn get_visible(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.visible).collect()
    }

    pub fn visible_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.visible)
            .map(|item| item.id)
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.items.iter().filter(|item| item.visible).count()
    }

    /// Set an item's visibility.
    /// Returns the notification to emit, or `None` when nothing changed.
    pub fn set_visibility(&mut self, id: ItemId, visible: bool) -> Option<Event> {
        let item = self.items.get_mut(id.0)?;
        if item.visible == visible {
            return None;
        }

        item.visible = visible;
        log::trace!("item {} visible={}", id, visible);
        Some(Event::VisibilityChanged { item: id, visible })
    }
}
