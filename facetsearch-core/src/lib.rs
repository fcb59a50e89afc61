// Public modules
pub mod engine;
pub mod error;
pub mod filtering;
pub mod grouping;
pub mod io;
pub mod models;
pub mod notify;
pub mod pagination;
pub mod registry;
pub mod render;
pub mod schema_validation;
pub mod search;
pub mod sorting;
pub mod store;
pub mod validation;

// Re-export commonly used types for convenience
pub use engine::recompute;
pub use error::LoadError;
pub use filtering::{
    facet_applies, has_filters, matches_filters, parse_facet_filters, passes_facets, Filters,
};
pub use grouping::{group_items_by_facet, UNSPECIFIED_GROUP};
pub use io::{load_dataset, parse_dataset};
pub use models::{Dataset, FacetSpec, Item, ItemId, SearchOptions};
pub use notify::{Event, Listener, Notifier, SubscriptionId};
pub use pagination::Pager;
pub use registry::{Facet, FacetRegistry, FacetValue};
pub use render::Renderer;
pub use schema_validation::{validate_against_schema, validate_dataset_shape, DATASET_SCHEMA};
pub use search::{CountMap, FacetedSearch};
pub use sorting::{
    normalize_for_sorting, ordered_values, sort_items, strip_leading_articles, ValueOrder,
};
pub use store::ItemStore;
pub use validation::validate_dataset;
