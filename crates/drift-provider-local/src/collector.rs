//! The local-state collector: walks a directory tree for state files and
//! translates their managed-resources arrays into `Resource`s.

use crate::state_file::parse_state_file;
use async_trait::async_trait;
use drift_collector::{Collector, CollectorConfig, CollectorStatus};
use drift_core::{meta_keys, providers, Error, Resource, Result, Snapshot};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

/// Default glob used when a `CollectorConfig` supplies no explicit state
/// paths or a bare directory to search under. Overridable per-scan via
/// `CollectorConfig.extra["state_glob"]`.
const DEFAULT_STATE_GLOB: &str = "**/*.state.json";
const MAX_AUTO_DISCOVERED_PATHS: usize = 64;

#[derive(Default)]
pub struct LocalStateCollector;

impl LocalStateCollector {
    pub fn new() -> Self {
        Self
    }

    fn state_glob(config: &CollectorConfig) -> Result<Pattern> {
        let raw = config.extra.get("state_glob").map(String::as_str).unwrap_or(DEFAULT_STATE_GLOB);
        Pattern::new(raw).map_err(|e| {
            Error::validation(format!("invalid state_glob '{raw}': {e}")).with_provider(providers::LOCAL_STATE)
        })
    }

    fn discover_state_files(root: &Path, glob: &Pattern) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                let relative = path.strip_prefix(root).unwrap_or(path);
                glob.matches_path(relative)
            })
            .take(MAX_AUTO_DISCOVERED_PATHS)
            .collect();
        found.sort();
        found
    }

    /// Collect resources for one state-file path list, in sorted order so
    /// repeated scans of unchanged state are bit-for-bit identical.
    fn collect_from_paths(paths: &[PathBuf]) -> Result<Vec<Resource>> {
        let mut sorted = paths.to_vec();
        sorted.sort();

        let mut resources = Vec::new();
        for path in &sorted {
            resources.extend(parse_state_file(path)?);
        }
        Ok(resources)
    }
}

#[async_trait]
impl Collector for LocalStateCollector {
    fn name(&self) -> &'static str {
        providers::LOCAL_STATE
    }

    fn status(&self) -> CollectorStatus {
        CollectorStatus::Ready
    }

    async fn auto_discover(&self) -> Result<CollectorConfig> {
        let cwd = std::env::current_dir()?;
        let glob = Self::state_glob(&CollectorConfig::default())?;
        let found = Self::discover_state_files(&cwd, &glob);
        if found.is_empty() {
            return Err(Error::not_found(format!(
                "no *.state.json files found under {}",
                cwd.display()
            ))
            .with_provider(providers::LOCAL_STATE)
            .with_solutions([
                format!("pass --state-path explicitly, or run from a directory containing {DEFAULT_STATE_GLOB}"),
            ]));
        }
        Ok(CollectorConfig {
            state_paths: found,
            ..CollectorConfig::default()
        })
    }

    async fn validate(&self, config: &CollectorConfig) -> Result<()> {
        if config.state_paths.is_empty() {
            return Err(Error::validation("local-state collector requires at least one state path")
                .with_provider(providers::LOCAL_STATE)
                .with_solutions(["set CollectorConfig.state_paths, or call auto_discover() first"]));
        }
        for path in &config.state_paths {
            if !path.exists() {
                return Err(Error::validation(format!("state path does not exist: {}", path.display()))
                    .with_provider(providers::LOCAL_STATE));
            }
        }
        Ok(())
    }

    async fn collect(&self, cancel: CancellationToken, config: &CollectorConfig) -> Result<Snapshot> {
        self.validate(config).await?;
        if cancel.is_cancelled() {
            return Err(Error::timeout("local-state collection cancelled"));
        }

        let glob = Self::state_glob(config)?;
        let mut all_paths = Vec::new();
        for path in &config.state_paths {
            if path.is_dir() {
                all_paths.extend(Self::discover_state_files(path, &glob));
            } else {
                all_paths.push(path.clone());
            }
        }

        let resources = Self::collect_from_paths(&all_paths)?;
        let id = format!("{}-{}", providers::LOCAL_STATE, uuid_suffix());
        Ok(Snapshot::new(id, providers::LOCAL_STATE, resources))
    }

    /// Multi-root mode: each entry in `config.state_paths` that is a
    /// directory is treated as one codebase root and yields its own
    /// snapshot tagged `codebase=<root dir name>`.
    async fn collect_separate(
        &self,
        cancel: CancellationToken,
        config: &CollectorConfig,
    ) -> Result<Vec<Snapshot>> {
        self.validate(config).await?;

        let mut roots: Vec<PathBuf> = config
            .state_paths
            .iter()
            .filter(|p| p.is_dir())
            .cloned()
            .collect();
        if roots.is_empty() {
            return Ok(vec![self.collect(cancel, config).await?]);
        }
        roots.sort();

        let glob = Self::state_glob(config)?;
        let mut snapshots = Vec::new();
        for root in roots {
            if cancel.is_cancelled() {
                return Err(Error::timeout("local-state collection cancelled"));
            }
            let codebase = root
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("root")
                .to_string();
            let paths = Self::discover_state_files(&root, &glob);
            let resources = Self::collect_from_paths(&paths)?;

            let id = format!("{}-{}-{}", providers::LOCAL_STATE, codebase, uuid_suffix());
            let mut snapshot = Snapshot::new(id, providers::LOCAL_STATE, resources);
            snapshot.metadata.insert(meta_keys::CODEBASE.to_string(), codebase);
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}

fn uuid_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
