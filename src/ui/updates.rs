use colored::Colorize;
use facetsearch_core::{group_items_by_facet, CountMap, Event, Filters, Item, Renderer};
use serde::Serialize;

use super::formatting::format_item;
use super::terminal::TerminalRenderer;
use crate::state::AppState;

/// Machine-readable view of the session outputs
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub visible: Vec<usize>,
    pub counts: CountMap,
    pub active: Filters,
}

impl Snapshot {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            visible: state.search.visible_ids().iter().map(|id| id.0).collect(),
            counts: state.search.counts(),
            active: state.search.active_filters(),
        }
    }
}

/// Render the whole screen: title, facet groups, shown items, "show more" hint
pub fn render_view(state: &AppState) -> String {
    let facets = state.search.facets();
    let mut out = format!("{}\n\n", state.get_title().bold());

    let mut facet_renderer = TerminalRenderer::new(facets);
    state
        .search
        .render_facets(&mut facet_renderer, state.view.value_order);
    out.push_str(&facet_renderer.finish());
    out.push('\n');

    let items = state.displayed_items();
    if items.is_empty() {
        out.push_str(&format!("{}\n", "No items match the active filters.".italic()));
    } else if let Some(ref group_field) = state.view.group_by {
        out.push_str(&render_grouped(&items, group_field, state));
    } else {
        let mut item_renderer = TerminalRenderer::new(facets);
        for item in &items {
            item_renderer.render_item(item);
        }
        out.push_str(&item_renderer.finish());
    }

    if state.has_more() {
        let shown = state.pager.visible_count(state.search.active_count());
        out.push_str(&format!(
            "{}\n",
            format!(
                "Showing {} of {}. Type 'more' for the next {}.",
                shown,
                state.search.active_count(),
                state.pager.page_size()
            )
            .dimmed()
        ));
    }

    out
}

fn render_grouped(items: &[&Item], group_field: &str, state: &AppState) -> String {
    let facets = state.search.facets();
    let label = state
        .search
        .registry()
        .facet(group_field)
        .map(|f| f.label.as_str())
        .unwrap_or(group_field);

    let mut out = String::new();
    for (group_name, group_items) in group_items_by_facet(items, group_field) {
        out.push_str(&format!("{}\n", format!("{}: {}", label, group_name).bold()));

        let mut renderer = TerminalRenderer::new(facets).with_indent(1);
        for item in group_items {
            renderer.render_item(item);
        }
        out.push_str(&renderer.finish());
    }
    out
}

/// Describe only what changed, one line per notification
pub fn format_changes(state: &AppState, events: &[Event]) -> String {
    let facets = state.search.facets();
    let mut lines = Vec::new();

    for event in events {
        match event {
            Event::ActiveChanged {
                facet,
                value,
                active,
            } => {
                let verb = if *active { "selected" } else { "deselected" };
                lines.push(format!("{} {}={}", verb.cyan(), facet, value));
            }
            Event::VisibilityChanged { item, visible } => {
                if let Some(item) = state.search.item(*item) {
                    let sign = if *visible { "+".green() } else { "-".red() };
                    lines.push(format!("{} {}", sign, format_item(item, facets)));
                }
            }
            Event::CountsChanged { facet, counts } => {
                let summary = counts
                    .iter()
                    .map(|(value, count)| format!("{} {}", value, count))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("{} {}: {}", "#".yellow(), facet, summary));
            }
        }
    }

    if lines.is_empty() {
        return format!("{}\n", "nothing changed".dimmed());
    }
    lines.push(state.get_title());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewSettings;
    use facetsearch_core::Dataset;
    use serde_json::json;

    fn state(view: ViewSettings) -> AppState {
        colored::control::set_override(false);
        let dataset: Dataset = serde_json::from_value(json!({
            "facets": {"color": "Color", "size": "Size"},
            "items": [
                {"name": "Red S", "color": "red", "size": "S"},
                {"name": "Red M", "color": "red", "size": "M"},
                {"name": "Blue S", "color": "blue", "size": "S"}
            ],
            "pagination_count": 2
        }))
        .unwrap();
        AppState::new(dataset, view, None)
    }

    #[test]
    fn test_render_view() {
        let state = state(ViewSettings::default());
        let out = render_view(&state);

        assert!(out.starts_with("dataset (3 of 3 items match)"));
        assert!(out.contains("Color\n  [ ] red (2)\n  [ ] blue (1)\nSize\n"));
        assert!(out.contains("• Red S  Color: red · Size: S\n• Red M"));
        assert!(!out.contains("• Blue S"));
        assert!(out.contains("Showing 2 of 3. Type 'more' for the next 2."));
    }

    #[test]
    fn test_render_grouped() {
        let view = ViewSettings {
            group_by: Some("size".to_string()),
            ..ViewSettings::default()
        };
        let mut state = state(view);
        state.pager.show_more();
        let out = render_view(&state);

        assert!(out.contains("Size: M\n  • Red M"));
        assert!(out.contains("Size: S\n  • Red S  Color: red · Size: S\n  • Blue S"));
        assert!(!out.contains("Showing"));
    }

    #[test]
    fn test_render_empty_result() {
        let mut state = state(ViewSettings::default());
        state.search.toggle("color", "blue");
        state.search.toggle("size", "M");
        assert!(render_view(&state).contains("No items match the active filters."));
    }

    #[test]
    fn test_format_changes() {
        let mut state = state(ViewSettings::default());
        state.search.toggle("color", "blue");
        let events = state.take_events();
        let out = format_changes(&state, &events);

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "selected color=blue");
        assert_eq!(lines[1], "- • Red S  Color: red · Size: S");
        assert_eq!(lines[2], "- • Red M  Color: red · Size: M");
        assert_eq!(lines[3], "# color: red 0, blue 1");
        assert_eq!(lines[4], "# size: S 1, M 0");
        assert_eq!(lines[5], "dataset (1 of 3 items match)");
        assert_eq!(format_changes(&state, &[]), "nothing changed\n");
    }

    #[test]
    fn test_snapshot() {
        let mut state = state(ViewSettings::default());
        state.search.toggle("size", "S");
        let snapshot = serde_json::to_value(Snapshot::from_state(&state)).unwrap();

        assert_eq!(snapshot["visible"], json!([0, 2]));
        assert_eq!(snapshot["counts"]["size"], json!({"M": 0, "S": 2}));
        assert_eq!(snapshot["active"], json!({"size": ["S"]}));
    }
}
