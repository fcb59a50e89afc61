use colored::Colorize;
use facetsearch_core::{Facet, FacetValue, Item};

/// Format an item's facet attributes on one line, in facet order
/// Facets the item has no value for are left out
pub fn format_facets(item: &Item, facets: &[Facet]) -> String {
    facets
        .iter()
        .filter_map(|facet| {
            item.get_facet_as_string(&facet.name)
                .map(|value| format!("{}: {}", facet.label, value))
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

/// One line of a facet group: selection marker, value name and match count
pub fn format_facet_value(value: &FacetValue) -> String {
    let marker = if value.active { "[x]" } else { "[ ]" };
    let line = format!("{} {} ({})", marker, value.name, value.count);

    if value.active {
        line.green().bold().to_string()
    } else if value.count == 0 {
        line.dimmed().to_string()
    } else {
        line
    }
}

pub fn format_facet_header(facet: &Facet) -> String {
    if facet.is_empty() {
        format!("{} {}", facet.label.bold(), "(no values)".dimmed())
    } else {
        facet.label.bold().to_string()
    }
}

pub fn format_item(item: &Item, facets: &[Facet]) -> String {
    let details = format_facets(item, facets);
    if details.is_empty() {
        format!("• {}", item.label())
    } else {
        format!("• {}  {}", item.label(), details.dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetsearch_core::{FacetSpec, FacetedSearch};
    use serde_json::json;

    fn search() -> FacetedSearch {
        colored::control::set_override(false);
        let items = json!([
            {"name": "Mug", "color": "red", "size": ["S", "M"]},
            {"name": "Cap"}
        ]);
        FacetedSearch::from_parts(
            vec![
                FacetSpec::new("size", "Size"),
                FacetSpec::new("color", "Color"),
                FacetSpec::new("brand", "Brand"),
            ],
            items
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r.as_object().cloned().unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_format_item_follows_facet_order() {
        let search = search();
        let items = search.visible_items();

        assert_eq!(
            format_item(items[0], search.facets()),
            "• Mug  Size: S, M · Color: red"
        );
        assert_eq!(format_item(items[1], search.facets()), "• Cap");
    }

    #[test]
    fn test_format_facet_value() {
        let mut search = search();
        search.toggle("color", "red");
        let color = search.registry().facet("color").unwrap();

        assert_eq!(format_facet_value(color.value("red").unwrap()), "[x] red (1)");
        assert_eq!(format_facet_header(&search.facets()[2]), "Brand (no values)");
    }
}
