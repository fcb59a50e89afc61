use crate::filtering::passes_facets;
use crate::notify::Event;
use crate::registry::FacetRegistry;
use crate::store::ItemStore;

/// Re-derive item visibility and facet counts from the current toggles.
///
/// All mutation happens first; the returned events describe what changed,
/// visibility changes in item order followed by one `CountsChanged` per facet
/// whose counts differ from before the pass.
pub fn recompute(store: &mut ItemStore, registry: &mut FacetRegistry) -> Vec<Event> {
    let previous_counts: Vec<Vec<(String, usize)>> =
        registry.facets().iter().map(|facet| facet.counts()).collect();

    let mut events = update_visibility(store, registry);
    update_counts(store, registry);

    for (facet, before) in registry.facets().iter().zip(previous_counts) {
        let after = facet.counts();
        if after != before {
            events.push(Event::CountsChanged {
                facet: facet.name.clone(),
                counts: after,
            });
        }
    }

    log::debug!(
        "recompute: {}/{} items visible, {} notifications",
        store.visible_len(),
        store.len(),
        events.len()
    );

    events
}

/// Pass 1: an item is visible iff every constrained facet applies to it
fn update_visibility(store: &mut ItemStore, registry: &FacetRegistry) -> Vec<Event> {
    let decisions: Vec<_> = store
        .iter()
        .map(|item| (item.id, passes_facets(item, registry.facets())))
        .collect();

    decisions
        .into_iter()
        .filter_map(|(id, visible)| store.set_visibility(id, visible))
        .collect()
}

/// Pass 2: counts over the visible items only
fn update_counts(store: &ItemStore, registry: &mut FacetRegistry) {
    let visible = store.get_visible();
    for facet in registry.facets_mut() {
        facet.reset_counts();
        for item in &visible {
            facet.tally(item);
        }
    }
}
