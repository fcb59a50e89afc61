use crate::models::Item;
use crate::registry::{Facet, FacetValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

static LEADING_ARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(the|a|an|der|die|das|le|la|les|el|los|las|il|lo|i|gli|un|une|een)\s+")
        .expect("leading article pattern is valid")
});

/// Display order of the values inside a facet group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrder {
    /// Order in which values were first seen in the dataset
    #[default]
    FirstSeen,
    /// Normalized alphabetical
    Name,
    /// Highest match count first, then by name
    Count,
}

impl FromStr for ValueOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-seen" | "first_seen" | "dataset" => Ok(ValueOrder::FirstSeen),
            "name" | "alpha" => Ok(ValueOrder::Name),
            "count" => Ok(ValueOrder::Count),
            other => Err(format!(
                "unknown value order '{}' (expected first-seen, name or count)",
                other
            )),
        }
    }
}

impl fmt::Display for ValueOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueOrder::FirstSeen => "first-seen",
            ValueOrder::Name => "name",
            ValueOrder::Count => "count",
        };
        f.write_str(name)
    }
}

/// The facet's values in display order. The facet itself is left untouched.
pub fn ordered_values(facet: &Facet, order: ValueOrder) -> Vec<&FacetValue> {
    let mut values: Vec<&FacetValue> = facet.values().iter().collect();

    match order {
        ValueOrder::FirstSeen => {}
        ValueOrder::Name => values.sort_by(|a, b| compare_names(&a.name, &b.name)),
        ValueOrder::Count => values.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| compare_names(&a.name, &b.name))
        }),
    }

    values
}

/// Sort items by the specified field (either "name" or a facet name)
pub fn sort_items(items: &mut [&Item], sort_field: &str) {
    items.sort_by(|a, b| {
        if sort_field == "name" {
            compare_names(&a.label(), &b.label())
        } else {
            // Items without the facet sort first, like an empty string would
            let a_val = a.get_facet_as_string(sort_field).unwrap_or_default();
            let b_val = b.get_facet_as_string(sort_field).unwrap_or_default();

            normalize_for_sorting(&a_val)
                .cmp(&normalize_for_sorting(&b_val))
                .then_with(|| compare_names(&a.label(), &b.label()))
        }
    });
}

/// Normalized comparison, falling back to the raw strings for ties
fn compare_names(a: &str, b: &str) -> Ordering {
    normalize_for_sorting(a)
        .cmp(&normalize_for_sorting(b))
        .then_with(|| a.cmp(b))
}

/// Normalize string for library science sorting
/// - Strip leading articles (a, an, the)
/// - Normalize unicode (NFD then lowercase)
/// - Collapse whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let without_articles = strip_leading_articles(s);

    let normalized: String = without_articles.nfd().collect::<String>().to_lowercase();

    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip leading articles following library science conventions
/// Supports: a, an, the (English) and common articles in other languages
pub fn strip_leading_articles(s: &str) -> String {
    LEADING_ARTICLE.replace(s, "").to_string()
}
