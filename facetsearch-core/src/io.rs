use crate::error::LoadError;
use crate::models::Dataset;
use crate::schema_validation::validate_dataset_shape;
use crate::validation::validate_dataset;
use std::fs;
use std::path::Path;

/// Load a dataset from a JSON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_dataset(&contents)?;
    log::info!(
        "loaded {} items and {} facets from {}",
        dataset.items.len(),
        dataset.facets.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset from JSON text.
///
/// The document must have the dataset shape. Lint findings from
/// [`validate_dataset`] are logged as warnings and do not fail the load.
pub fn parse_dataset(contents: &str) -> Result<Dataset, LoadError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    validate_dataset_shape(&value).map_err(LoadError::Schema)?;

    let dataset: Dataset = serde_json::from_value(value)?;
    if let Err(warnings) = validate_dataset(&dataset) {
        for warning in warnings {
            log::warn!("{}", warning);
        }
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "facets": {"color": "Color", "size": "Size"},
        "items": [
            {"id": 1, "color": "red", "size": "S"},
            {"id": 2, "color": ["red", "blue"], "size": 42}
        ],
        "pagination_count": 1
    }"#;

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.items.len(), 2);
        assert_eq!(dataset.facets[0].name, "color");
        assert_eq!(dataset.options.pagination_count, Some(1));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_dataset("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_wrong_shape() {
        let err = parse_dataset(r#"{"facets": [], "items": {}}"#).unwrap_err();
        match err {
            LoadError::Schema(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_lint_findings_do_not_fail_the_load() {
        let dataset = parse_dataset(r#"{"facets": {"brand": "Brand"}, "items": [{"brand": 7}]}"#)
            .unwrap();
        assert_eq!(dataset.items.len(), 1);
    }
}
