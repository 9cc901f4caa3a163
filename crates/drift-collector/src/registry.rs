//! Process-wide mapping from provider name to `Collector`.
//!
//! Populated once at startup and never hot-swapped afterwards, matching the
//! "Registry and Config initialized exactly once" design note.

use crate::collector::Collector;
use drift_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A read-only lookup table from provider name to its `Collector`.
#[derive(Clone, Default)]
pub struct Registry {
    collectors: HashMap<&'static str, Arc<dyn Collector>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            collectors: HashMap::new(),
        }
    }

    /// One-shot registration; intended to be called only while building up
    /// the registry before it is handed to the rest of the application.
    pub fn register(&mut self, collector: Arc<dyn Collector>) {
        self.collectors.insert(collector.name(), collector);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Collector>> {
        self.collectors
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("unknown provider: {name}")))
    }

    /// Provider tags available for auto-discovery banners, sorted for
    /// deterministic display.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.collectors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arc<dyn Collector>)> {
        self.collectors.iter().map(|(k, v)| (*k, v))
    }
}
