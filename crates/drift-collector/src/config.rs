//! Configuration carried into a collector's `validate`/`collect` calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Free-form configuration for one collection run. Fields not relevant to
/// a given provider are simply left at their defaults; `validate` is where
/// a provider enforces which ones it actually requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default)]
    pub state_paths: Vec<PathBuf>,
    #[serde(default)]
    pub namespaces: Vec<String>,

    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub scan_id: Option<String>,
    #[serde(default)]
    pub snapshot_name: Option<String>,

    /// Anything else a specific provider wants, without growing this type.
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl CollectorConfig {
    pub fn regions(&self) -> Vec<String> {
        if !self.regions.is_empty() {
            self.regions.clone()
        } else if let Some(region) = &self.region {
            vec![region.clone()]
        } else {
            Vec::new()
        }
    }
}
