use crate::models::Item;
use std::collections::BTreeMap;

/// Group name for items that carry no value for the grouping facet
pub const UNSPECIFIED_GROUP: &str = "_unspecified_";

/// Group items by a facet name
/// Items with multiple values for the facet appear in multiple groups
/// Groups are keyed by value and iterate in value order; items keep their order
pub fn group_items_by_facet<'a>(
    items: &[&'a Item],
    group_field: &str,
) -> BTreeMap<String, Vec<&'a Item>> {
    let mut groups: BTreeMap<String, Vec<&'a Item>> = BTreeMap::new();

    for &item in items {
        let facet_values = item.get_facet_as_vec(group_field);

        if facet_values.is_empty() {
            groups
                .entry(UNSPECIFIED_GROUP.to_string())
                .or_default()
                .push(item);
        } else {
            for value in facet_values {
                let group = groups.entry(value.to_string()).or_default();
                // a list attribute repeating a value still lists the item once
                if !group.last().is_some_and(|last| last.id == item.id) {
                    group.push(item);
                }
            }
        }
    }

    groups
}
