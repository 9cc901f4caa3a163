//! Minimal `~/.kube/config` parsing: just enough to find the current
//! context and its name. No network I/O -- `status()` must never make one.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
    #[serde(default)]
    contexts: Vec<RawNamedContext>,
}

#[derive(Debug, Deserialize)]
struct RawNamedContext {
    name: String,
}

#[derive(Debug, Clone, Default)]
pub struct KubeConfig {
    pub current_context: Option<String>,
    pub contexts: Vec<String>,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kube").join("config"))
}

pub fn load(path: &Path) -> Option<KubeConfig> {
    let bytes = std::fs::read(path).ok()?;
    let raw: RawConfig = serde_yaml::from_slice(&bytes).ok()?;
    Some(KubeConfig {
        current_context: raw.current_context,
        contexts: raw.contexts.into_iter().map(|c| c.name).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_context_and_named_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(
            &path,
            "current-context: staging\ncontexts:\n  - name: staging\n  - name: prod\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.current_context.as_deref(), Some("staging"));
        assert_eq!(config.contexts, vec!["staging", "prod"]);
    }

    #[test]
    fn missing_file_yields_none_rather_than_panicking() {
        assert!(load(Path::new("/nonexistent/kubeconfig")).is_none());
    }
}
