//! Localization editing operations
//!
//! Provides the key/value view of a localization and importing edited
//! values back into it.

use indexmap::IndexMap;

use super::Localization;

/// Progress callback for imports: `(processed, total)`
pub type ImportProgress<'a> = &'a dyn Fn(usize, usize);

/// Result of importing a key/value map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Number of entries whose value was overwritten
    pub updated: usize,
    /// Number of keys not found in the localization
    pub not_found: usize,
    /// Keys that were not found
    pub missing_keys: Vec<String>,
}

/// Report progress every this many keys
const PROGRESS_INTERVAL: usize = 100;

impl Localization {
    /// Key/value view of the string table in entry order
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.data.to_map()
    }

    /// Get the value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Overwrite values from a key/value map.
    ///
    /// Keys that are not in the localization are skipped and reported.
    pub fn import_map(&mut self, values: &IndexMap<String, String>) -> ImportResult {
        self.import_map_with_progress(values, &|_, _| {})
    }

    /// Overwrite values from a key/value map, reporting progress every 100 keys
    /// and once at the end.
    pub fn import_map_with_progress(
        &mut self,
        values: &IndexMap<String, String>,
        progress: ImportProgress,
    ) -> ImportResult {
        let mut result = ImportResult::default();
        let total = values.len();

        for (i, (key, value)) in values.iter().enumerate() {
            if self.data.set_value(key, value.as_str()) {
                result.updated += 1;
            } else {
                result.not_found += 1;
                result.missing_keys.push(key.clone());
            }

            let processed = i + 1;
            if processed % PROGRESS_INTERVAL == 0 || processed == total {
                progress(processed, total);
            }
        }

        tracing::debug!(
            "imported {} values ({} keys not found)",
            result.updated,
            result.not_found
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::formats::localization::fixtures::localization_bytes;
    use crate::formats::localization::{parse_localization_bytes, serialize_localization};

    fn fixture() -> Localization {
        parse_localization_bytes(&localization_bytes()).unwrap()
    }

    #[test]
    fn test_to_map_order() {
        let map = fixture().to_map();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["LABEL_000", "NAME_001", "TALK_002"]);
    }

    #[test]
    fn test_import_partial_map() {
        let mut loc = fixture();
        let mut values = IndexMap::new();
        values.insert("TALK_002".to_string(), "Later".to_string());
        values.insert("GONE_404".to_string(), "nobody".to_string());

        let result = loc.import_map(&values);
        assert_eq!(result.updated, 1);
        assert_eq!(result.not_found, 1);
        assert_eq!(result.missing_keys, vec!["GONE_404".to_string()]);
        assert_eq!(loc.get("TALK_002"), Some("Later"));
        assert_eq!(loc.get("GONE_404"), None);
    }

    #[test]
    fn test_import_unchanged_map_roundtrips() {
        let mut loc = fixture();
        let map = loc.to_map();
        loc.import_map(&map);
        assert_eq!(serialize_localization(&mut loc).unwrap(), localization_bytes());
    }

    #[test]
    fn test_import_progress_reporting() {
        let mut loc = fixture();
        let values: IndexMap<String, String> = (0..250)
            .map(|i| (format!("KEY_{i:03}"), String::new()))
            .collect();
        let calls = RefCell::new(Vec::new());
        loc.import_map_with_progress(&values, &|done, total| {
            calls.borrow_mut().push((done, total));
        });
        assert_eq!(calls.into_inner(), vec![(100, 250), (200, 250), (250, 250)]);
    }
}
