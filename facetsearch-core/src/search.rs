use crate::engine;
use crate::filtering::Filters;
use crate::models::{Dataset, FacetSpec, Item, ItemId, SearchOptions};
use crate::notify::{Listener, Notifier, SubscriptionId};
use crate::pagination::Pager;
use crate::registry::{Facet, FacetRegistry};
use crate::render::Renderer;
use crate::sorting::{ordered_values, ValueOrder};
use crate::store::ItemStore;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Match counts per facet, per value
pub type CountMap = BTreeMap<String, BTreeMap<String, usize>>;

/// A faceted search session over a fixed dataset.
///
/// Every toggle runs a full recompute before returning, then dispatches the
/// resulting notifications to subscribed listeners.
#[derive(Debug)]
pub struct FacetedSearch {
    store: ItemStore,
    registry: FacetRegistry,
    notifier: Notifier,
    options: SearchOptions,
}

impl FacetedSearch {
    pub fn new(dataset: Dataset) -> Self {
        let store = ItemStore::initialize(dataset.items);
        let registry = FacetRegistry::initialize(&dataset.facets, &store);

        let mut search = Self {
            store,
            registry,
            notifier: Notifier::new(),
            options: dataset.options,
        };
        // Nobody is subscribed yet, the initial pass only fills in the counts
        engine::recompute(&mut search.store, &mut search.registry);
        search
    }

    pub fn from_parts(facets: Vec<FacetSpec>, items: Vec<Map<String, Value>>) -> Self {
        Self::new(Dataset::new(facets, items))
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn pager(&self) -> Pager {
        Pager::from_options(&self.options)
    }

    pub fn subscribe(&mut self, listener: impl Listener + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Flip a facet value and recompute.
    /// Returns false, after logging, when the facet value does not exist.
    pub fn toggle(&mut self, facet: &str, value: &str) -> bool {
        match self.registry.toggle(facet, value) {
            Some(event) => {
                self.notifier.emit(&event);
                self.recompute();
                true
            }
            None => {
                log::warn!("toggle ignored: unknown facet value {}={}", facet, value);
                false
            }
        }
    }

    /// Switch a facet value to a given state.
    /// Returns whether anything changed; setting the current state is a no-op.
    pub fn set_active(&mut self, facet: &str, value: &str, active: bool) -> bool {
        if !self.registry.contains(facet, value) {
            log::warn!("set_active ignored: unknown facet value {}={}", facet, value);
            return false;
        }

        match self.registry.set_active(facet, value, active) {
            Some(event) => {
                self.notifier.emit(&event);
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// Make `filters` the exact active set, with a single recompute.
    /// Unknown entries are logged and skipped. Returns how many values flipped.
    pub fn apply_filters(&mut self, filters: &Filters) -> usize {
        for (facet, values) in filters {
            for value in values {
                if !self.registry.contains(facet, value) {
                    log::warn!("filter ignored: unknown facet value {}={}", facet, value);
                }
            }
        }

        let mut events = Vec::new();
        let targets: Vec<(String, String, bool)> = self
            .registry
            .facets()
            .iter()
            .flat_map(|facet| {
                let wanted = filters.get(&facet.name);
                facet.values().iter().map(move |value| {
                    let active = wanted.is_some_and(|values| values.contains(&value.name));
                    (facet.name.clone(), value.name.clone(), active)
                })
            })
            .collect();

        for (facet, value, active) in targets {
            if let Some(event) = self.registry.set_active(&facet, &value, active) {
                events.push(event);
            }
        }

        let flipped = events.len();
        if flipped > 0 {
            self.notifier.emit_all(&events);
            self.recompute();
        }
        flipped
    }

    /// Deactivate every facet value
    pub fn clear(&mut self) -> usize {
        self.apply_filters(&Filters::new())
    }

    /// Run the filter engine and dispatch whatever changed
    pub fn recompute(&mut self) {
        let events = engine::recompute(&mut self.store, &mut self.registry);
        self.notifier.emit_all(&events);
    }

    pub fn items(&self) -> &ItemStore {
        &self.store
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn facets(&self) -> &[Facet] {
        self.registry.facets()
    }

    pub fn registry(&self) -> &FacetRegistry {
        &self.registry
    }

    pub fn visible_items(&self) -> Vec<&Item> {
        self.store.get_visible()
    }

    pub fn visible_ids(&self) -> Vec<ItemId> {
        self.store.visible_ids()
    }

    /// Number of items passing the current filters
    pub fn active_count(&self) -> usize {
        self.store.visible_len()
    }

    pub fn counts(&self) -> CountMap {
        self.registry
            .facets()
            .iter()
            .map(|facet| {
                let values = facet
                    .values()
                    .iter()
                    .map(|v| (v.name.clone(), v.count))
                    .collect();
                (facet.name.clone(), values)
            })
            .collect()
    }

    /// Snapshot of the active values, constrained facets only
    pub fn active_filters(&self) -> Filters {
        self.registry
            .facets()
            .iter()
            .filter(|facet| facet.has_active())
            .map(|facet| {
                let values = facet.active_values().map(|v| v.name.clone()).collect();
                (facet.name.clone(), values)
            })
            .collect()
    }

    pub fn render_facets(&self, renderer: &mut dyn Renderer, order: ValueOrder) {
        for facet in self.registry.facets() {
            renderer.render_facet(facet);
            for value in ordered_values(facet, order) {
                renderer.render_facet_value(facet, value);
            }
        }
    }

    /// Render the visible items that fit in the pager's window
    pub fn render_items(&self, renderer: &mut dyn Renderer, pager: &Pager) {
        let visible = self.store.get_visible();
        for item in pager.window(&visible) {
            renderer.render_item(item);
        }
    }
}
