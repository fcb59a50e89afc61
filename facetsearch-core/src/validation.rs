use crate::models::Dataset;
use serde_json::Value;
use std::collections::HashSet;

/// Lint a dataset for things the engine tolerates but that are probably mistakes.
/// Returns Ok(()) if clean, or Err(Vec<String>) with one message per finding
pub fn validate_dataset(dataset: &Dataset) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for spec in &dataset.facets {
        if spec.name.trim().is_empty() {
            errors.push("Facet names cannot be empty".to_string());
        }
        if spec.label.trim().is_empty() {
            errors.push(format!("Facet '{}' has an empty label", spec.name));
        }
        if !seen.insert(spec.name.as_str()) {
            errors.push(format!("Facet '{}' is specified more than once", spec.name));
            continue;
        }

        let carried = dataset
            .items
            .iter()
            .any(|record| record.contains_key(&spec.name));
        if !carried {
            errors.push(format!("Facet '{}' is not carried by any item", spec.name));
        }
    }

    for (idx, record) in dataset.items.iter().enumerate() {
        for spec in &dataset.facets {
            if let Some(value) = record.get(&spec.name) {
                validate_facet_value(value, idx, &spec.name, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_facet_value(value: &Value, idx: usize, facet_name: &str, errors: &mut Vec<String>) {
    let item_ref = format!("Item #{}", idx + 1);

    match value {
        Value::String(_) => {}
        Value::Array(arr) => {
            if arr.iter().any(|v| !v.is_string()) {
                errors.push(format!(
                    "{}: facet '{}' array contains non-string values, they are ignored",
                    item_ref, facet_name
                ));
            }
        }
        _ => {
            errors.push(format!(
                "{}: facet '{}' must be a string or array of strings, it is ignored",
                item_ref, facet_name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacetSpec;
    use serde_json::json;

    fn dataset(facets: Vec<FacetSpec>, items: Value) -> Dataset {
        let items = items
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect();
        Dataset::new(facets, items)
    }

    #[test]
    fn test_clean_dataset() {
        let data = dataset(
            vec![FacetSpec::new("color", "Color")],
            json!([{"color": "red"}, {"color": ["red", "blue"]}, {}]),
        );
        assert!(validate_dataset(&data).is_ok());
    }

    #[test]
    fn test_empty_dataset_is_clean() {
        assert!(validate_dataset(&Dataset::default()).is_ok());
    }

    #[test]
    fn test_reports_unusable_values() {
        let data = dataset(
            vec![FacetSpec::new("color", "Color"), FacetSpec::new("size", "")],
            json!([{"color": 3, "size": ["S", 1]}]),
        );
        let errors = validate_dataset(&data).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("empty label"));
        assert!(errors[1].contains("'color' must be a string"));
        assert!(errors[2].contains("non-string"));
    }

    #[test]
    fn test_reports_unused_and_duplicate_facets() {
        let data = dataset(
            vec![
                FacetSpec::new("color", "Color"),
                FacetSpec::new("color", "Colour"),
                FacetSpec::new("brand", "Brand"),
            ],
            json!([{"color": "red"}]),
        );
        let errors = validate_dataset(&data).unwrap_err();

        assert_eq!(
            errors,
            vec![
                "Facet 'color' is specified more than once".to_string(),
                "Facet 'brand' is not carried by any item".to_string(),
            ]
        );
    }
}
