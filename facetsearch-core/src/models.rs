use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Attribute keys tried, in order, when picking a display label for an item
const LABEL_KEYS: [&str; 3] = ["name", "title", "id"];

/// Identifier of an item: its position in the dataset it was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A facet key together with its human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub name: String,
    pub label: String,
}

impl FacetSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// One record of the dataset plus its derived visibility flag
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub attributes: Map<String, Value>,
    pub visible: bool,
}

impl Item {
    pub fn new(id: ItemId, attributes: Map<String, Value>) -> Self {
        Self {
            id,
            attributes,
            visible: true,
        }
    }

    /// Values the item carries for a facet.
    /// A string attribute yields one value, a list yields its string elements,
    /// anything else (including a missing key) yields nothing.
    pub fn get_facet_as_vec(&self, facet_name: &str) -> Vec<&str> {
        match self.attributes.get(facet_name) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Facet values joined for display, `None` when the item has none
    pub fn get_facet_as_string(&self, facet_name: &str) -> Option<String> {
        let values = self.get_facet_as_vec(facet_name);
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Equality for string attributes, membership for list attributes
    pub fn has_value(&self, facet_name: &str, value: &str) -> bool {
        match self.attributes.get(facet_name) {
            Some(Value::String(s)) => s == value,
            Some(Value::Array(arr)) => arr.iter().any(|v| v.as_str() == Some(value)),
            _ => false,
        }
    }

    pub fn label(&self) -> String {
        LABEL_KEYS
            .iter()
            .find_map(|key| match self.attributes.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Tunables carried alongside the data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Page size of the "show more" window; absent means everything is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_count: Option<usize>,
}

/// Input of a faceted search: the facets to offer and the raw item records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, with = "facet_spec_map")]
    pub facets: Vec<FacetSpec>,
    #[serde(default)]
    pub items: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub options: SearchOptions,
}

impl Dataset {
    pub fn new(facets: Vec<FacetSpec>, items: Vec<Map<String, Value>>) -> Self {
        Self {
            facets,
            items,
            options: SearchOptions::default(),
        }
    }
}

/// `facets` is written as a JSON object (name -> label) whose key order is
/// the display order of the facet groups.
mod facet_spec_map {
    use super::FacetSpec;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(specs: &[FacetSpec], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(specs.len()))?;
        for spec in specs {
            map.serialize_entry(&spec.name, &spec.label)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FacetSpec>, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = Vec<FacetSpec>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of facet name to display label")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut specs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, label)) = access.next_entry::<String, String>()? {
                    specs.push(FacetSpec { name, label });
                }
                Ok(specs)
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}
