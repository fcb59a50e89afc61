use facetsearch_core::LoadError;
use std::io::ErrorKind;
use std::path::Path;

/// Map errors from a run to user-friendly messages, dataset loading ones in detail
/// Returns (title, message, details)
pub fn map_load_error(error: &anyhow::Error, path: &Path) -> (String, String, String) {
    match error.downcast_ref::<LoadError>() {
        Some(LoadError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The dataset file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        Some(LoadError::Io { source, .. }) if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        Some(LoadError::Json(e)) => (
            "Invalid JSON".to_string(),
            "The dataset file is not valid JSON.".to_string(),
            format!("{} (line {}, column {})", e, e.line(), e.column()),
        ),
        Some(LoadError::Schema(errors)) => (
            "Invalid Dataset".to_string(),
            "The dataset does not have the expected shape.".to_string(),
            errors
                .iter()
                .enumerate()
                .map(|(i, e)| format!("  {}. {}", i + 1, e))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => (
            "Error".to_string(),
            "facetsearch stopped unexpectedly.".to_string(),
            format!("{:#}", error),
        ),
    }
}
