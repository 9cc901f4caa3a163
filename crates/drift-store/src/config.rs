//! Store configuration: root directory resolution.

use std::path::PathBuf;

/// Where the store keeps its files. Resolved from, in order: an explicit
/// path, the `DRIFTKIT_HOME` environment variable, or `$HOME/.driftkit`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The default root, honoring `DRIFTKIT_HOME` before falling back to
    /// the user's home directory. Matches the "configuration over defaults"
    /// guidance in the design notes for snapshot storage location.
    pub fn default_root() -> drift_core::Result<PathBuf> {
        if let Ok(home) = std::env::var("DRIFTKIT_HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::home_dir()
            .map(|home| home.join(".driftkit"))
            .ok_or_else(|| {
                drift_core::Error::internal("could not determine a home directory for the store")
            })
    }

    pub fn default() -> drift_core::Result<Self> {
        Ok(Self::new(Self::default_root()?))
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join("history")
    }

    pub fn baselines_dir(&self) -> PathBuf {
        self.root.join("baselines")
    }

    pub fn last_scan_path(&self, provider: &str) -> PathBuf {
        self.root.join(format!("last-scan-{provider}.json"))
    }
}
