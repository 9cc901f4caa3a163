//! The outcome of one collection run: an immutable, content-addressable
//! inventory of resources.

use crate::resource::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known metadata keys recognized by the store and the diff engine.
pub mod meta_keys {
    pub const BASELINE: &str = "baseline";
    pub const BASELINE_REASON: &str = "baseline_reason";
    pub const CODEBASE: &str = "codebase";
    pub const PARTIAL_FAILURES: &str = "partial_failures";
}

/// A single collection run's output. Never mutated after creation; only
/// ever deleted explicitly by an operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub provider: String,
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Derived; not required on read, recomputed on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl Snapshot {
    pub fn new(id: String, provider: impl Into<String>, resources: Vec<Resource>) -> Self {
        let resource_count = resources.len();
        Self {
            id,
            timestamp: Utc::now(),
            provider: provider.into(),
            resources,
            metadata: HashMap::new(),
            resource_count: Some(resource_count),
            file_size: None,
        }
    }

    pub fn baseline_name(&self) -> Option<&str> {
        self.metadata.get(meta_keys::BASELINE).map(String::as_str)
    }

    pub fn is_baseline(&self) -> bool {
        self.metadata.contains_key(meta_keys::BASELINE)
    }

    pub fn codebase(&self) -> Option<&str> {
        self.metadata.get(meta_keys::CODEBASE).map(String::as_str)
    }
}

/// Cheap metadata projection of a `Snapshot`, used by `list`/`timeline`
/// without paying the cost of loading every resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub provider: String,
    pub resource_count: usize,
    pub file_size: u64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub path: std::path::PathBuf,
}

impl SnapshotInfo {
    pub fn baseline_name(&self) -> Option<&str> {
        self.tags.get(meta_keys::BASELINE).map(String::as_str)
    }
}
