use drift_collector::{Collector, CollectorConfig};
use drift_provider_local::LocalStateCollector;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

fn write_state(path: &std::path::Path, id: &str) {
    std::fs::write(
        path,
        format!(
            r#"{{"resources": [{{"id": "{id}", "type": "compute.instance", "name": "{id}", "configuration": {{"size": "s"}}}}]}}"#
        ),
    )
    .unwrap();
}

#[tokio::test]
async fn collect_is_deterministic_across_back_to_back_scans() {
    let dir = tempdir().unwrap();
    write_state(&dir.path().join("a.state.json"), "i-1");
    write_state(&dir.path().join("b.state.json"), "i-2");

    let collector = LocalStateCollector::new();
    let config = CollectorConfig {
        state_paths: vec![dir.path().to_path_buf()],
        ..CollectorConfig::default()
    };

    let first = collector.collect(CancellationToken::new(), &config).await.unwrap();
    let second = collector.collect(CancellationToken::new(), &config).await.unwrap();

    let first_ids: Vec<_> = first.resources.iter().map(|r| r.id.clone()).collect();
    let second_ids: Vec<_> = second.resources.iter().map(|r| r.id.clone()).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn multi_root_mode_tags_each_snapshot_with_its_codebase() {
    let dir = tempdir().unwrap();
    let root_a = dir.path().join("root-a");
    let root_b = dir.path().join("root-b");
    std::fs::create_dir_all(&root_a).unwrap();
    std::fs::create_dir_all(&root_b).unwrap();
    write_state(&root_a.join("a.state.json"), "i-a");
    write_state(&root_b.join("b.state.json"), "i-b");

    let collector = LocalStateCollector::new();
    let config = CollectorConfig {
        state_paths: vec![root_a, root_b],
        ..CollectorConfig::default()
    };

    let snapshots = collector
        .collect_separate(CancellationToken::new(), &config)
        .await
        .unwrap();

    assert_eq!(snapshots.len(), 2);
    let codebases: Vec<_> = snapshots.iter().filter_map(|s| s.codebase()).collect();
    assert!(codebases.contains(&"root-a"));
    assert!(codebases.contains(&"root-b"));
}

#[tokio::test]
async fn state_glob_is_overridable_via_extra_config() {
    let dir = tempdir().unwrap();
    write_state(&dir.path().join("a.state.json"), "i-1");
    write_state(&dir.path().join("b.tfstate"), "i-2");

    let collector = LocalStateCollector::new();
    let mut config = CollectorConfig {
        state_paths: vec![dir.path().to_path_buf()],
        ..CollectorConfig::default()
    };
    config.extra.insert("state_glob".to_string(), "**/*.tfstate".to_string());

    let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
    assert_eq!(snapshot.resources.len(), 1);
    assert_eq!(snapshot.resources[0].id, "i-2");
}

#[tokio::test]
async fn validate_rejects_missing_state_path() {
    let collector = LocalStateCollector::new();
    let config = CollectorConfig {
        state_paths: vec!["/does/not/exist".into()],
        ..CollectorConfig::default()
    };
    assert!(collector.validate(&config).await.is_err());
}
