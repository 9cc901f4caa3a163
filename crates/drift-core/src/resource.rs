//! The canonical resource model: the atomic unit of inventory.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One infrastructure object normalized into drift-kit's provider-neutral
/// shape. `(provider, type, id)` is unique within a snapshot; `name` and
/// `configuration` are never absent, though either may be empty.
///
/// Resources are immutable once placed into a `Snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub configuration: HashMap<String, Value>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Resource {
    /// The `(provider, type, id)` composite identity used for matching
    /// resources across two snapshots and for uniqueness within one.
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            provider: self.provider.clone(),
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }
}

/// Composite match key: `(provider, type, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    pub provider: String,
    pub resource_type: String,
    pub id: String,
}
