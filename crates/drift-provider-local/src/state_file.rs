//! Parsing of one on-disk state file into `Resource`s.

use drift_core::{Error, Resource, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// The managed-resources array recognized inside a state file. Schema is
/// intentionally loose: each entry needs an `id` and a `type`; everything
/// else defaults to empty so collectors tolerate partially-populated state
/// written by older tooling.
pub fn parse_state_file(path: &Path) -> Result<Vec<Resource>> {
    let bytes = std::fs::read(path)?;
    let doc: Value = serde_json::from_slice(&bytes)
        .map_err(|e| Error::validation(format!("{}: invalid state JSON: {e}", path.display())))?;

    let entries = doc
        .get("resources")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    entries
        .iter()
        .map(|entry| resource_from_entry(path, entry))
        .collect()
}

fn resource_from_entry(path: &Path, entry: &Value) -> Result<Resource> {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::validation(format!("{}: managed resource missing 'id'", path.display())))?
        .to_string();
    let resource_type = entry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::validation(format!("{}: resource '{id}' missing 'type'", path.display())))?
        .to_string();
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(&id)
        .to_string();

    let configuration = object_field(entry, "configuration").unwrap_or_else(|| object_field(entry, "attributes").unwrap_or_default());
    let metadata = object_field(entry, "metadata").unwrap_or_default();
    let tags = entry
        .get("tags")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();
    let dependencies = entry
        .get("dependencies")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default();

    Ok(Resource {
        id,
        resource_type,
        name,
        provider: drift_core::providers::LOCAL_STATE.to_string(),
        region: entry.get("region").and_then(Value::as_str).unwrap_or_default().to_string(),
        namespace: entry.get("namespace").and_then(Value::as_str).unwrap_or_default().to_string(),
        configuration,
        metadata,
        tags,
        dependencies,
    })
}

fn object_field(entry: &Value, key: &str) -> Option<HashMap<String, Value>> {
    entry.get(key).and_then(Value::as_object).map(|map| map.clone().into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_minimal_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"resources": [{{"id": "i-1", "type": "compute.instance", "name": "web", "configuration": {{"size": "s"}}}}]}}"#
        )
        .unwrap();

        let resources = parse_state_file(&path).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "i-1");
        assert_eq!(resources[0].provider, drift_core::providers::LOCAL_STATE);
    }

    #[test]
    fn rejects_an_entry_missing_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"resources": [{"type": "compute.instance"}]}"#).unwrap();
        assert!(parse_state_file(&path).is_err());
    }
}
