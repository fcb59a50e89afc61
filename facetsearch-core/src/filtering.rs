use crate::models::Item;
use crate::registry::Facet;
use std::collections::BTreeMap;

/// Active values per facet name
pub type Filters = BTreeMap<String, Vec<String>>;

/// Parse facet filter strings in the format "key=value" into a filter map
/// Multiple values for the same key are collected into a vector
pub fn parse_facet_filters(facet_strings: &[String]) -> Filters {
    let mut facet_map = Filters::new();

    for facet_str in facet_strings {
        if let Some((key, value)) = facet_str.split_once('=') {
            facet_map
                .entry(key.trim().to_string())
                .or_insert_with(Vec::new)
                .push(value.trim().to_string());
        } else {
            log::warn!("ignoring facet filter '{}': expected 'name=value'", facet_str);
        }
    }

    facet_map
}

/// True when at least one active value of the facet matches the item
pub fn facet_applies(item: &Item, facet: &Facet) -> bool {
    facet
        .active_values()
        .any(|value| item.has_value(&facet.name, &value.name))
}

/// AND across constrained facets, facets without an active value never veto
pub fn passes_facets(item: &Item, facets: &[Facet]) -> bool {
    facets
        .iter()
        .filter(|facet| facet.has_active())
        .all(|facet| facet_applies(item, facet))
}

/// Same rule as [`passes_facets`], over a plain filter map.
/// An entry with no values imposes no constraint.
pub fn matches_filters(item: &Item, filters: &Filters) -> bool {
    filters
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .all(|(facet_name, values)| values.iter().any(|v| item.has_value(facet_name, v)))
}

/// Check if filters constrain anything
pub fn has_filters(filters: &Filters) -> bool {
    filters.values().any(|values| !values.is_empty())
}
