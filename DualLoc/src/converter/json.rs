//! JSON encoding of string tables
//!
//! Tables are written as a flat object in entry order, indented with four
//! spaces, with non-ASCII text written as-is.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

const INDENT: &[u8] = b"    ";

/// Serialize a key/value map to pretty JSON
pub fn string_map_to_json(map: &IndexMap<String, String>) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    map.serialize(&mut serializer)?;
    Ok(String::from_utf8(out)?)
}

/// Write a key/value map to a JSON file
pub fn write_string_map<P: AsRef<Path>>(path: P, map: &IndexMap<String, String>) -> Result<()> {
    fs::write(path, string_map_to_json(map)?)?;
    Ok(())
}

/// Read a JSON object of strings, keeping the file's key order
pub fn read_string_map<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, String>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_json_layout() {
        let mut map = IndexMap::new();
        map.insert("B_001".to_string(), "Grüße".to_string());
        map.insert("A_000".to_string(), "こんにちは".to_string());
        assert_eq!(
            string_map_to_json(&map).unwrap(),
            "{\n    \"B_001\": \"Grüße\",\n    \"A_000\": \"こんにちは\"\n}"
        );
    }

    #[test]
    fn test_read_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"{"Z_002": "z", "A_001": "a<br>b"}"#).unwrap();

        let map = read_string_map(&path).unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Z_002", "A_001"]);
        assert_eq!(map["A_001"], "a<br>b");
    }

    #[test]
    fn test_read_rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"{"A_001": 5}"#).unwrap();
        assert!(matches!(
            read_string_map(&path),
            Err(crate::error::Error::JsonError(_))
        ));
    }
}
