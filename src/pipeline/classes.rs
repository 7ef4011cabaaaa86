//! Class-id-to-name table, loaded once and read-only afterwards.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Placeholder class name substituted when a decoded class id falls outside
/// the table. Keeps a single malformed record from aborting a whole batch.
pub const FALLBACK_CLASS_NAME: &str = "vehicle";

/// Ordered sequence of class names; index = class id.
///
/// Loaded once at startup and never mutated afterwards, so a single table can
/// be shared across concurrent pipeline invocations without locking.
#[derive(Debug, Clone)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    /// Build a table from an in-memory list of names.
    pub fn from_names(names: Vec<String>) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::EmptyClassTable);
        }
        Ok(Self { names })
    }

    /// Load a table from a newline-separated class list (line index = id).
    ///
    /// Blank lines are skipped; surrounding whitespace is trimmed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ClassTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self::from_names(names)
    }

    /// Resolve a class id, or `None` when it is out of range.
    pub fn name(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// Resolve a class id, substituting [`FALLBACK_CLASS_NAME`] when it falls
    /// outside the table.
    pub fn name_or_fallback(&self, class_id: usize) -> &str {
        match self.name(class_id) {
            Some(name) => name,
            None => {
                log::debug!(
                    "class id {} exceeds table length {}, substituting {:?}",
                    class_id,
                    self.names.len(),
                    FALLBACK_CLASS_NAME
                );
                FALLBACK_CLASS_NAME
            }
        }
    }

    /// Number of known classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coco_subset() -> ClassTable {
        ClassTable::from_names(vec![
            "person".to_owned(),
            "bicycle".to_owned(),
            "car".to_owned(),
            "motorcycle".to_owned(),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_in_range() {
        let table = coco_subset();
        assert_eq!(table.name(3), Some("motorcycle"));
        assert_eq!(table.name_or_fallback(0), "person");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let table = coco_subset();
        assert_eq!(table.name(4), None);
        assert_eq!(table.name_or_fallback(99), FALLBACK_CLASS_NAME);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = ClassTable::from_names(vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyClassTable));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClassTable::load("/nonexistent/coco.names").unwrap_err();
        assert!(matches!(err, ConfigError::ClassTableIo { .. }));
    }
}
