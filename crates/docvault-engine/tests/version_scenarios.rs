//! End-to-end version scenarios against real files on disk.
//!
//! File modification times drive recency, so tests that need two distinct
//! versions sleep past the freshness tolerance between writes.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use docvault_core::DocVaultConfig;
use docvault_embed::{EmbedderBackend, HashingEmbedder};
use docvault_engine::DocumentEngine;
use docvault_index::{IndexSnapshot, SnapshotPaths};

const DIM: usize = 256;

fn test_config(root: &std::path::Path) -> DocVaultConfig {
    let mut config = DocVaultConfig::with_root(root).unwrap();
    config.embedding_dim = DIM;
    config.seed_corpus = true;
    config
}

fn write_doc(config: &DocVaultConfig, name: &str, contents: &str) {
    let path = config.data_paths.documents.join(name);
    let mut f = std::fs::File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn embedder() -> Arc<dyn EmbedderBackend> {
    Arc::new(HashingEmbedder::new(DIM))
}

/// Sleep past the modification-time tolerance so the next write counts as
/// a distinct version.
fn step_clock() {
    std::thread::sleep(Duration::from_millis(1200));
}

#[test]
fn replaced_content_under_same_name_serves_the_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    write_doc(&config, "policy_v1.txt", "Leave is 10 days");
    let first = DocumentEngine::new(config.clone(), embedder());
    first.initialize().unwrap();
    drop(first);

    step_clock();
    write_doc(&config, "policy_v1.txt", "Leave is 15 days");

    let second = DocumentEngine::new(config, embedder());
    second.initialize().unwrap();

    let hits = second.search("how many leave days", 3);
    assert!(!hits.is_empty());
    assert!(hits[0].is_most_recent);
    assert!(hits[0].text.contains("15 days"));
    assert!(!hits.iter().any(|h| h.text.contains("10 days")));
}

#[test]
fn newer_file_outranks_older_file_up_to_quota() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    write_doc(
        &config,
        "old.txt",
        "The dress code was formal attire. Dress code questions go to HR.",
    );
    step_clock();
    write_doc(
        &config,
        "new.txt",
        "The dress code is business casual. Dress code exceptions need approval.",
    );

    let engine = DocumentEngine::new(config, embedder());
    engine.initialize().unwrap();

    let hits = engine.search("what is the dress code", 5);
    assert!(hits.len() >= 2);

    let first_old = hits
        .iter()
        .position(|h| h.source.name() == "old.txt")
        .expect("older document should still be represented");
    for hit in &hits[..first_old] {
        assert_eq!(hit.source.name(), "new.txt");
        assert!(hit.is_most_recent);
    }
    assert!(first_old <= 3);

    let summary = engine.version_context();
    let new_line = summary.lines().find(|l| l.contains("new.txt")).unwrap();
    assert!(new_line.contains("most recent"));
    let old_line = summary.lines().find(|l| l.contains("old.txt")).unwrap();
    assert!(old_line.contains("older version"));
}

#[test]
fn touched_file_forces_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_doc(&config, "policy.txt", "Remote work is allowed twice a week.");

    let first = DocumentEngine::new(config.clone(), embedder());
    first.initialize().unwrap();
    drop(first);

    let paths = SnapshotPaths::new(&config.data_paths.store);
    let before = IndexSnapshot::load_versions(&paths)
        .unwrap()
        .most_recent()
        .unwrap()
        .modified_at;

    step_clock();
    // Same content, new modification time.
    write_doc(&config, "policy.txt", "Remote work is allowed twice a week.");

    let second = DocumentEngine::new(config.clone(), embedder());
    second.initialize().unwrap();

    let after = IndexSnapshot::load_versions(&paths)
        .unwrap()
        .most_recent()
        .unwrap()
        .modified_at;
    assert!(
        after > before,
        "rebuild should have recorded the new modification time"
    );
}

#[test]
fn missing_store_directory_rebuilds_to_ready() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_doc(&config, "policy.txt", "Expense reports are due at month end.");

    // Simulate a wiped persistence directory.
    std::fs::remove_dir_all(&config.data_paths.store).unwrap();
    std::fs::create_dir_all(&config.data_paths.store).unwrap();

    let engine = DocumentEngine::new(config, embedder());
    engine.initialize().unwrap();
    assert!(engine.is_initialized());

    let status = engine.status();
    assert!(status.initialized);
    assert_eq!(status.document_count, 1);
}
