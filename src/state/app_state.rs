use anyhow::Context;
use facetsearch_core::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// How results are laid out; none of this affects filtering
#[derive(Debug, Clone, Default)]
pub struct ViewSettings {
    /// "name" or a facet name
    pub sort_by: Option<String>,
    /// Facet to group the shown items by
    pub group_by: Option<String>,
    pub value_order: ValueOrder,
}

/// Application state: the search session plus what the terminal shows of it
#[derive(Debug)]
pub struct AppState {
    pub search: FacetedSearch,
    pub pager: Pager,
    pub view: ViewSettings,
    /// Path of the loaded dataset, if it came from a file
    pub dataset_file: Option<PathBuf>,
    /// Notifications received since the last `take_events`
    pending: Rc<RefCell<Vec<Event>>>,
}

impl AppState {
    /// `page_size` overrides the dataset's own pagination count
    pub fn new(dataset: Dataset, view: ViewSettings, page_size: Option<usize>) -> Self {
        let mut search = FacetedSearch::new(dataset);
        let pager = page_size
            .map(Pager::new)
            .unwrap_or_else(|| search.pager());

        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = pending.clone();
        search.subscribe(move |event: &Event| sink.borrow_mut().push(event.clone()));

        Self {
            search,
            pager,
            view,
            dataset_file: None,
            pending,
        }
    }

    /// Load a dataset file and start a session over it
    pub fn load_from_file(
        path: &Path,
        view: ViewSettings,
        page_size: Option<usize>,
    ) -> anyhow::Result<Self> {
        let dataset = load_dataset(path)
            .with_context(|| format!("could not load dataset {}", path.display()))?;

        let mut state = Self::new(dataset, view, page_size);
        state.dataset_file = Some(path.to_path_buf());
        Ok(state)
    }

    /// Apply "name=value" filters given on the command line as the active set
    pub fn apply_initial_filters(&mut self, facet_strings: &[String]) {
        if facet_strings.is_empty() {
            return;
        }
        let filters = parse_facet_filters(facet_strings);
        self.search.apply_filters(&filters);
        // the initial state is rendered in full, the notifications are not needed
        self.take_events();
    }

    /// Drain the notifications collected so far
    pub fn take_events(&self) -> Vec<Event> {
        self.pending.borrow_mut().drain(..).collect()
    }

    /// Visible items in display order
    pub fn sorted_items(&self) -> Vec<&Item> {
        let mut items = self.search.visible_items();
        if let Some(ref sort_field) = self.view.sort_by {
            sort_items(&mut items, sort_field);
        }
        items
    }

    /// The part of [`Self::sorted_items`] that fits in the pager's window
    pub fn displayed_items(&self) -> Vec<&Item> {
        let items = self.sorted_items();
        self.pager.window(&items).to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.search.active_count())
    }

    /// Header line with file name and match totals
    pub fn get_title(&self) -> String {
        let file_name = self
            .dataset_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("dataset");

        format!(
            "{} ({} of {} items match)",
            file_name,
            self.search.active_count(),
            self.search.items().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "facets": {"color": "Color", "size": "Size"},
            "items": [
                {"name": "Red S", "color": "red", "size": "S"},
                {"name": "Red M", "color": "red", "size": "M"},
                {"name": "Blue S", "color": "blue", "size": "S"}
            ],
            "pagination_count": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_pager_comes_from_dataset_unless_overridden() {
        let state = AppState::new(dataset(), ViewSettings::default(), None);
        assert_eq!(state.pager.page_size(), 2);
        assert_eq!(state.displayed_items().len(), 2);
        assert!(state.has_more());

        let state = AppState::new(dataset(), ViewSettings::default(), Some(10));
        assert_eq!(state.displayed_items().len(), 3);
        assert!(!state.has_more());
    }

    #[test]
    fn test_events_are_collected_and_drained() {
        let mut state = AppState::new(dataset(), ViewSettings::default(), None);
        assert!(state.take_events().is_empty());

        state.search.toggle("color", "blue");
        let events = state.take_events();
        assert!(matches!(events[0], Event::ActiveChanged { active: true, .. }));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_initial_filters_and_sorting() {
        let view = ViewSettings {
            sort_by: Some("size".to_string()),
            ..ViewSettings::default()
        };
        let mut state = AppState::new(dataset(), view, None);
        state.apply_initial_filters(&["color=red".to_string()]);

        let labels: Vec<_> = state.sorted_items().iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["Red M", "Red S"]);
        assert!(state.take_events().is_empty());
        assert_eq!(state.get_title(), "dataset (2 of 3 items match)");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&dataset()).unwrap()).unwrap();

        let state = AppState::load_from_file(file.path(), ViewSettings::default(), None).unwrap();
        assert_eq!(state.search.active_count(), 3);
        assert!(state.get_title().contains("3 of 3"));
    }

    #[test]
    fn test_load_missing_file_keeps_the_cause() {
        let err = AppState::load_from_file(
            Path::new("/no/such/dataset.json"),
            ViewSettings::default(),
            None,
        )
        .unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
    }
}
