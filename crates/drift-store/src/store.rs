//! On-disk snapshot storage: atomic writes, enumeration, and baseline /
//! history views.

use crate::config::StoreConfig;
use crate::filename;
use crate::filter::SnapshotFilter;
use drift_core::{meta_keys, Error, Result, Snapshot, SnapshotInfo};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A store rooted at a directory with `history/` and `baselines/` subtrees.
/// Safe for concurrent readers and for concurrent writers that target
/// distinct filenames -- guaranteed here by the time+id filename scheme.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(StoreConfig::default()?))
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Persist a snapshot to `history/` and refresh the
    /// `last-scan-<provider>.json` convenience pointer. Both writes are
    /// atomic via write-to-temp + rename; the store never rewrites an
    /// existing history entry.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let history_dir = self.config.history_dir();
        fs::create_dir_all(&history_dir)?;

        let filename = filename::build(snapshot.timestamp, &snapshot.provider, &snapshot.id);
        let path = history_dir.join(&filename);
        if path.exists() {
            tracing::debug!(path = %path.display(), "snapshot already persisted, skipping");
            return Ok(path);
        }

        let mut to_write = snapshot.clone();
        to_write.resource_count = Some(snapshot.resources.len());
        atomic_write_json(&path, &to_write)?;
        tracing::info!(path = %path.display(), resources = snapshot.resources.len(), "snapshot saved");

        let pointer_path = self.config.last_scan_path(&snapshot.provider);
        atomic_write_json(&pointer_path, &to_write)?;

        Ok(path)
    }

    /// Persist a snapshot under `baselines/<name>.json`, tagging its
    /// in-memory copy with `metadata.baseline=<name>` first. The history
    /// copy (with the baseline tag) is what callers should treat as
    /// canonical; the `baselines/` entry is a convenience pointer.
    pub fn save_baseline(&self, mut snapshot: Snapshot, name: &str, reason: Option<&str>) -> Result<PathBuf> {
        snapshot
            .metadata
            .insert(meta_keys::BASELINE.to_string(), name.to_string());
        if let Some(reason) = reason {
            snapshot
                .metadata
                .insert(meta_keys::BASELINE_REASON.to_string(), reason.to_string());
        }

        self.save(&snapshot)?;

        let baselines_dir = self.config.baselines_dir();
        fs::create_dir_all(&baselines_dir)?;
        let path = baselines_dir.join(format!("{name}.json"));
        atomic_write_json(&path, &snapshot)?;
        Ok(path)
    }

    /// Load a snapshot by its history-relative path or by bare id: when
    /// `id_or_path` does not resolve to an existing file, every entry under
    /// `history/` is scanned for a matching `id` field.
    pub fn load(&self, id_or_path: &str) -> Result<Snapshot> {
        let direct = Path::new(id_or_path);
        if direct.is_file() {
            return load_json(direct);
        }
        let in_history = self.config.history_dir().join(id_or_path);
        if in_history.is_file() {
            return load_json(&in_history);
        }

        for info in self.list(&SnapshotFilter::default())? {
            if info.id == id_or_path {
                return load_json(&info.path);
            }
        }

        Err(Error::not_found(format!("no snapshot matching '{id_or_path}'")))
    }

    /// Enumerate cheap `SnapshotInfo` descriptors, ordered by timestamp
    /// ascending. Readers may observe a superset between two calls under
    /// concurrent writers, but never a torn file: each entry is read only
    /// after `read_dir` has already confirmed the rename completed.
    pub fn list(&self, filter: &SnapshotFilter) -> Result<Vec<SnapshotInfo>> {
        let history_dir = self.config.history_dir();
        if !history_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut infos = Vec::new();
        for entry in fs::read_dir(&history_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            let Some(parsed) = filename::parse(filename) else {
                continue;
            };
            if !filter.matches(&parsed.provider, parsed.timestamp) {
                continue;
            }

            let metadata = entry.metadata()?;
            let snapshot = load_json(&path)?;
            infos.push(SnapshotInfo {
                id: snapshot.id,
                timestamp: parsed.timestamp,
                provider: parsed.provider,
                resource_count: snapshot.resources.len(),
                file_size: metadata.len(),
                tags: snapshot.metadata,
                path,
            });
        }

        infos.sort_by_key(|info| info.timestamp);
        Ok(infos)
    }

    /// The most recent snapshot overall, or for a given provider.
    pub fn find_latest(&self, provider: Option<&str>) -> Result<Option<SnapshotInfo>> {
        let mut filter = SnapshotFilter::default();
        if let Some(provider) = provider {
            filter = filter.provider(provider);
        }
        Ok(self.list(&filter)?.into_iter().last())
    }

    /// The most recent snapshot tagged as a baseline (any name), or for a
    /// given provider. Ties on timestamp resolve to the entry that sorts
    /// last in the underlying listing (stable order).
    pub fn find_latest_baseline(&self, provider: Option<&str>) -> Result<Option<SnapshotInfo>> {
        let mut filter = SnapshotFilter::default();
        if let Some(provider) = provider {
            filter = filter.provider(provider);
        }
        Ok(self
            .list(&filter)?
            .into_iter()
            .filter(|info| info.baseline_name().is_some())
            .last())
    }

    /// The most recent snapshot tagged `baseline=<name>`, optionally
    /// restricted to a provider.
    pub fn find_named_baseline(&self, name: &str, provider: Option<&str>) -> Result<Option<SnapshotInfo>> {
        let mut filter = SnapshotFilter::default();
        if let Some(provider) = provider {
            filter = filter.provider(provider);
        }
        Ok(self
            .list(&filter)?
            .into_iter()
            .filter(|info| info.baseline_name() == Some(name))
            .last())
    }

    /// Ordered descriptors between two snapshot ids, inclusive of both
    /// endpoints, sorted by timestamp ascending.
    pub fn list_between(&self, id_a: &str, id_b: &str) -> Result<Vec<SnapshotInfo>> {
        let all = self.list(&SnapshotFilter::default())?;
        let idx_a = all.iter().position(|i| i.id == id_a);
        let idx_b = all.iter().position(|i| i.id == id_b);
        let (Some(idx_a), Some(idx_b)) = (idx_a, idx_b) else {
            return Err(Error::not_found(format!(
                "one or both snapshots not found: {id_a}, {id_b}"
            )));
        };
        let (lo, hi) = if idx_a <= idx_b { (idx_a, idx_b) } else { (idx_b, idx_a) };
        Ok(all[lo..=hi].to_vec())
    }
}

fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal(format!("snapshot path has no parent directory: {}", path.display()))
    })?;
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    let json = serde_json::to_vec_pretty(value)?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::from(e.error))?;
    Ok(())
}

fn load_json(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path)?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    Ok(snapshot)
}
