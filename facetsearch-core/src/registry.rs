use crate::models::{FacetSpec, Item};
use crate::notify::Event;
use crate::store::ItemStore;
use std::collections::HashMap;

/// One selectable value of a facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetValue {
    pub name: String,
    pub active: bool,
    /// Number of visible items carrying this value, as of the last recompute
    pub count: usize,
}

impl FacetValue {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: false,
            count: 0,
        }
    }
}

/// A filter group: the distinct values items carry under one facet key
#[derive(Debug, Clone)]
pub struct Facet {
    pub name: String,
    pub label: String,
    values: Vec<FacetValue>,
    index: HashMap<String, usize>,
}

impl Facet {
    /// Collect the distinct values of `spec.name` across all items, first-seen order
    fn scan(spec: &FacetSpec, store: &ItemStore) -> Self {
        let mut facet = Facet {
            name: spec.name.clone(),
            label: spec.label.clone(),
            values: Vec::new(),
            index: HashMap::new(),
        };

        for item in store.iter() {
            for value in item.get_facet_as_vec(&spec.name) {
                if !facet.index.contains_key(value) {
                    facet.index.insert(value.to_string(), facet.values.len());
                    facet.values.push(FacetValue::new(value));
                }
            }
        }

        facet
    }

    pub fn values(&self) -> &[FacetValue] {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FacetValue> {
        self.index.get(name).map(|&idx| &self.values[idx])
    }

    fn value_mut(&mut self, name: &str) -> Option<&mut FacetValue> {
        let idx = *self.index.get(name)?;
        Some(&mut self.values[idx])
    }

    pub fn has_active(&self) -> bool {
        self.values.iter().any(|v| v.active)
    }

    pub fn active_values(&self) -> impl Iterator<Item = &FacetValue> {
        self.values.iter().filter(|v| v.active)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (value, count) pairs in registry order
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.values
            .iter()
            .map(|v| (v.name.clone(), v.count))
            .collect()
    }

    pub fn reset_counts(&mut self) {
        for value in self.values.iter_mut() {
            value.count = 0;
        }
    }

    /// Count one visible item against this facet.
    /// An unconstrained facet counts every value the item carries; a
    /// constrained one only counts its active values.
    pub fn tally(&mut self, item: &Item) {
        let constrained = self.has_active();
        for value in self.values.iter_mut() {
            if (!constrained || value.active) && item.has_value(&self.name, &value.name) {
                value.count += 1;
            }
        }
    }
}

/// Owns the facets in the order they were specified
#[derive(Debug, Clone, Default)]
pub struct FacetRegistry {
    facets: Vec<Facet>,
    index: HashMap<String, usize>,
}

impl FacetRegistry {
    /// Build one facet per spec entry. A repeated facet name keeps its first entry.
    pub fn initialize(specs: &[FacetSpec], store: &ItemStore) -> Self {
        let mut registry = FacetRegistry::default();

        for spec in specs {
            if registry.index.contains_key(&spec.name) {
                log::warn!("facet '{}' specified twice, keeping the first", spec.name);
                continue;
            }

            let facet = Facet::scan(spec, store);
            log::debug!("facet '{}': {} distinct values", facet.name, facet.values.len());
            registry.index.insert(spec.name.clone(), registry.facets.len());
            registry.facets.push(facet);
        }

        registry
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub(crate) fn facets_mut(&mut self) -> &mut [Facet] {
        &mut self.facets
    }

    pub fn facet(&self, name: &str) -> Option<&Facet> {
        self.index.get(name).map(|&idx| &self.facets[idx])
    }

    fn facet_mut(&mut self, name: &str) -> Option<&mut Facet> {
        let idx = *self.index.get(name)?;
        Some(&mut self.facets[idx])
    }

    pub fn contains(&self, facet: &str, value: &str) -> bool {
        self.facet(facet)
            .is_some_and(|f| f.value(value).is_some())
    }

    /// Flip a value's active flag. `None` when no such facet value exists.
    pub fn toggle(&mut self, facet: &str, value: &str) -> Option<Event> {
        let current = self.facet(facet)?.value(value)?.active;
        self.set_active(facet, value, !current)
    }

    /// Set a value's active flag. `None` when it is unknown or already in that state.
    pub fn set_active(&mut self, facet: &str, value: &str, active: bool) -> Option<Event> {
        let facet_value = self.facet_mut(facet)?.value_mut(value)?;
        if facet_value.active == active {
            return None;
        }

        facet_value.active = active;
        Some(Event::ActiveChanged {
            facet: facet.to_string(),
            value: value.to_string(),
            active,
        })
    }

    /// False for unknown facets as well as unconstrained ones
    pub fn has_active_constraint(&self, facet: &str) -> bool {
        self.facet(facet).is_some_and(Facet::has_active)
    }

    pub fn reset_counts(&mut self, facet: &str) {
        if let Some(facet) = self.facet_mut(facet) {
            facet.reset_counts();
        }
    }

    pub fn increment_count(&mut self, facet: &str, value: &str) {
        if let Some(facet_value) = self.facet_mut(facet).and_then(|f| f.value_mut(value)) {
            facet_value.count += 1;
        }
    }
}
