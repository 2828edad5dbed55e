//! Index orchestrator.
//!
//! On startup the engine checks whether the persisted snapshot still
//! reflects the source folder, then either reloads it or rebuilds from
//! scratch: extract → chunk → embed → index → persist. The published
//! snapshot is immutable; queries share it through an `Arc` and a rebuild
//! swaps in a complete replacement, so a reader never observes a
//! half-built index.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use docvault_core::{DocVaultConfig, Error, Result};
use docvault_embed::EmbedderBackend;
use docvault_index::{
    check_freshness, FlatIndex, Freshness, IndexSnapshot, SnapshotPaths, VersionStore,
};
use docvault_index::versions::NO_DOCUMENTS_MESSAGE;
use docvault_ingest::{extract_corpus, source_listing, Chunker};
use docvault_retrieve::{search_snapshot, SearchHit};

use crate::seed::seed_records;

/// Orchestrator lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    CheckingFreshness,
    Loading,
    Rebuilding,
    Ready,
    Failed,
}

/// Engine status snapshot for callers.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub initialized: bool,
    /// Indexed passages (chunks) currently served.
    pub documents_loaded: usize,
    pub vector_store_ready: bool,
    /// Distinct source documents behind those passages.
    pub document_count: usize,
}

struct EngineInner {
    phase: Phase,
    snapshot: Option<Arc<IndexSnapshot>>,
}

/// The document version management and retrieval engine.
///
/// Explicitly constructed and owned by the composition root; queries take
/// `&self` and only read the published snapshot.
pub struct DocumentEngine {
    config: DocVaultConfig,
    embedder: Arc<dyn EmbedderBackend>,
    inner: RwLock<EngineInner>,
}

impl DocumentEngine {
    pub fn new(config: DocVaultConfig, embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self {
            config,
            embedder,
            inner: RwLock::new(EngineInner {
                phase: Phase::Uninitialized,
                snapshot: None,
            }),
        }
    }

    /// Build or load the index. Idempotent: a call while `Ready` is a
    /// no-op, and a call after a failed attempt starts a fresh run.
    pub fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            debug!("Engine already initialized");
            return Ok(());
        }
        match self.run_startup() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.set_phase(Phase::Failed);
                error!("Engine initialization failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().phase == Phase::Ready
    }

    pub fn phase(&self) -> Phase {
        self.inner.read().phase
    }

    /// Query the index. Before initialization this returns an empty result
    /// set: "try again later", not "no relevant documents".
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        match self.snapshot() {
            Ok(snapshot) => search_snapshot(&snapshot, self.embedder.as_ref(), query, k),
            Err(_) => {
                debug!("Search before initialization; returning no results");
                Vec::new()
            }
        }
    }

    /// Human-readable summary of all known document versions.
    pub fn version_context(&self) -> String {
        match self.snapshot() {
            Ok(snapshot) => snapshot.versions.context_summary(),
            Err(_) => NO_DOCUMENTS_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> EngineStatus {
        let inner = self.inner.read();
        let (chunks, documents) = inner
            .snapshot
            .as_ref()
            .map(|s| (s.chunk_count(), s.document_count()))
            .unwrap_or((0, 0));
        EngineStatus {
            initialized: inner.phase == Phase::Ready,
            documents_loaded: chunks,
            vector_store_ready: inner.snapshot.is_some(),
            document_count: documents,
        }
    }

    fn run_startup(&self) -> Result<()> {
        self.set_phase(Phase::CheckingFreshness);
        let paths = SnapshotPaths::new(&self.config.data_paths.store);
        let listing = source_listing(&self.config.data_paths.documents)?;

        match check_freshness(&paths, &listing) {
            Freshness::Fresh => {
                self.set_phase(Phase::Loading);
                match IndexSnapshot::load(&paths) {
                    Ok(snapshot) => {
                        info!(
                            "Loaded persisted index: {} documents, {} chunks",
                            snapshot.document_count(),
                            snapshot.chunk_count()
                        );
                        self.publish(snapshot);
                        return Ok(());
                    }
                    Err(e) => {
                        warn!("Persisted snapshot unreadable ({}); rebuilding", e);
                    }
                }
            }
            Freshness::Stale(reason) => {
                info!("Index stale ({}); rebuilding", reason);
            }
        }

        self.rebuild(&paths)
    }

    /// Full rebuild: extract → chunk → embed → index → persist → publish.
    fn rebuild(&self, paths: &SnapshotPaths) -> Result<()> {
        self.set_phase(Phase::Rebuilding);

        // extract_corpus enumerates files in sorted order, which keeps the
        // chunk-to-vector alignment reproducible across identical corpora.
        let mut records = extract_corpus(&self.config.data_paths.documents)?;
        if records.is_empty() {
            if self.config.seed_corpus {
                info!("Source folder has no usable documents; indexing the built-in seed corpus");
                records = seed_records();
            } else {
                return Err(Error::EmptyCorpus(
                    "source folder has no usable documents and no fallback is configured".into(),
                ));
            }
        }

        let chunker = Chunker::new(self.config.chunk_size, self.config.chunk_overlap);
        let mut chunk_texts: Vec<String> = Vec::new();
        let mut chunk_sources = Vec::new();
        for record in &records {
            for chunk in chunker.split(&record.full_text) {
                chunk_texts.push(chunk);
                chunk_sources.push(record.id.clone());
            }
        }
        if chunk_texts.is_empty() {
            return Err(Error::EmptyCorpus("extraction produced no chunks".into()));
        }

        let texts: Vec<&str> = chunk_texts.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts);
        let mut vectors = Vec::with_capacity(embeddings.len());
        for (i, embedding) in embeddings.into_iter().enumerate() {
            match embedding {
                Some(v) => vectors.push(v),
                None => {
                    return Err(Error::Embedding(format!(
                        "backend produced no vector for chunk {}",
                        i
                    )));
                }
            }
        }

        let mut index = FlatIndex::new(self.embedder.dimension());
        index.add(&vectors)?;

        let snapshot = IndexSnapshot {
            index,
            chunk_texts,
            chunk_sources,
            versions: VersionStore::from_records(records),
        };
        snapshot.save(paths)?;

        info!(
            "Rebuild complete: {} documents, {} chunks",
            snapshot.document_count(),
            snapshot.chunk_count()
        );
        self.publish(snapshot);
        Ok(())
    }

    fn snapshot(&self) -> Result<Arc<IndexSnapshot>> {
        let inner = self.inner.read();
        match (&inner.phase, &inner.snapshot) {
            (Phase::Ready, Some(snapshot)) => Ok(snapshot.clone()),
            _ => Err(Error::NotReady),
        }
    }

    fn set_phase(&self, phase: Phase) {
        self.inner.write().phase = phase;
    }

    fn publish(&self, snapshot: IndexSnapshot) {
        let mut inner = self.inner.write();
        inner.snapshot = Some(Arc::new(snapshot));
        inner.phase = Phase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_embed::HashingEmbedder;
    use ndarray::Array1;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DIM: usize = 128;

    /// Wraps the hashing backend and counts embedding invocations, so the
    /// freshness-idempotence tests can assert the embedder was not re-run.
    struct CountingEmbedder {
        inner: HashingEmbedder,
        calls: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new() -> Self {
            Self {
                inner: HashingEmbedder::new(DIM),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EmbedderBackend for CountingEmbedder {
        fn embed(&self, text: &str) -> Option<Array1<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed(text)
        }
        fn dimension(&self) -> usize {
            DIM
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct FailingEmbedder;

    impl EmbedderBackend for FailingEmbedder {
        fn embed(&self, _text: &str) -> Option<Array1<f32>> {
            None
        }
        fn dimension(&self) -> usize {
            DIM
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    fn test_config(root: &std::path::Path, seed: bool) -> DocVaultConfig {
        let mut config = DocVaultConfig::with_root(root).unwrap();
        config.embedding_dim = DIM;
        config.seed_corpus = seed;
        config
    }

    fn write_doc(config: &DocVaultConfig, name: &str, contents: &str) {
        let path = config.data_paths.documents.join(name);
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_empty_folder_with_seed_reaches_ready() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        let engine = DocumentEngine::new(config, Arc::new(HashingEmbedder::new(DIM)));

        engine.initialize().unwrap();
        assert!(engine.is_initialized());
        assert_eq!(engine.phase(), Phase::Ready);

        let status = engine.status();
        assert!(status.initialized);
        assert!(status.vector_store_ready);
        assert_eq!(status.document_count, 1);
        assert!(status.documents_loaded > 0);

        let hits = engine.search("how many days of paid leave", 3);
        assert!(!hits.is_empty());
        assert!(engine.version_context().contains("starter-policies"));
    }

    #[test]
    fn test_empty_folder_without_seed_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), false);
        let engine = DocumentEngine::new(config, Arc::new(HashingEmbedder::new(DIM)));

        let err = engine.initialize().unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
        assert_eq!(engine.phase(), Phase::Failed);
        assert!(!engine.is_initialized());
        assert!(engine.search("anything", 3).is_empty());
        assert_eq!(engine.version_context(), NO_DOCUMENTS_MESSAGE);
    }

    #[test]
    fn test_search_before_initialize_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        let engine = DocumentEngine::new(config, Arc::new(HashingEmbedder::new(DIM)));

        assert!(!engine.is_initialized());
        assert!(engine.search("leave days", 3).is_empty());
        let status = engine.status();
        assert!(!status.initialized);
        assert_eq!(status.documents_loaded, 0);
        assert!(!status.vector_store_ready);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        let embedder = Arc::new(CountingEmbedder::new());
        let engine = DocumentEngine::new(config, embedder.clone());

        engine.initialize().unwrap();
        let after_first = embedder.calls();
        engine.initialize().unwrap();
        assert_eq!(embedder.calls(), after_first);
    }

    #[test]
    fn test_unchanged_corpus_reuses_persisted_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        write_doc(&config, "policy.txt", "Leave is 15 days per year.");

        let embedder = Arc::new(CountingEmbedder::new());
        let first = DocumentEngine::new(config.clone(), embedder.clone());
        first.initialize().unwrap();
        let after_build = embedder.calls();
        assert!(after_build > 0);
        drop(first);

        let second = DocumentEngine::new(config, embedder.clone());
        second.initialize().unwrap();
        assert!(second.is_initialized());
        // A fresh load must not re-invoke the embedder.
        assert_eq!(embedder.calls(), after_build);
    }

    #[test]
    fn test_added_file_triggers_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        write_doc(&config, "a.txt", "Expense reports are due monthly.");

        let embedder = Arc::new(CountingEmbedder::new());
        let first = DocumentEngine::new(config.clone(), embedder.clone());
        first.initialize().unwrap();
        let after_build = embedder.calls();
        drop(first);

        write_doc(&config, "b.txt", "Travel requires pre-approval.");
        let second = DocumentEngine::new(config, embedder.clone());
        second.initialize().unwrap();
        assert!(embedder.calls() > after_build);
        assert_eq!(second.status().document_count, 2);
    }

    #[test]
    fn test_corrupt_artifacts_self_heal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        write_doc(&config, "policy.txt", "Dress code is business casual.");

        let embedder: Arc<dyn EmbedderBackend> = Arc::new(HashingEmbedder::new(DIM));
        let first = DocumentEngine::new(config.clone(), embedder.clone());
        first.initialize().unwrap();
        drop(first);

        // Scribble over one artifact; the next start must rebuild, not die.
        let paths = SnapshotPaths::new(&config.data_paths.store);
        std::fs::write(&paths.chunks, b"{definitely not json").unwrap();

        let second = DocumentEngine::new(config, embedder);
        second.initialize().unwrap();
        assert!(second.is_initialized());
        assert!(!second.search("dress code", 3).is_empty());
    }

    #[test]
    fn test_embedding_failure_aborts_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        write_doc(&config, "policy.txt", "Leave is 15 days per year.");

        let engine = DocumentEngine::new(config.clone(), Arc::new(FailingEmbedder));
        let err = engine.initialize().unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
        assert!(!engine.is_initialized());
        // Nothing was persisted by the failed rebuild.
        let paths = SnapshotPaths::new(&config.data_paths.store);
        assert!(!paths.all_present());
    }

    #[test]
    fn test_rebuilds_are_deterministic() {
        let embedder: Arc<dyn EmbedderBackend> = Arc::new(HashingEmbedder::new(DIM));
        let mut runs = Vec::new();

        for _ in 0..2 {
            let dir = tempfile::tempdir().unwrap();
            let config = test_config(dir.path(), true);
            write_doc(&config, "a.txt", &"Annual leave is 15 days. ".repeat(80));
            write_doc(&config, "b.txt", &"Dress code is business casual. ".repeat(80));

            let engine = DocumentEngine::new(config.clone(), embedder.clone());
            engine.initialize().unwrap();
            drop(engine);

            let paths = SnapshotPaths::new(&config.data_paths.store);
            let snapshot = IndexSnapshot::load(&paths).unwrap();
            runs.push((snapshot.chunk_texts.clone(), snapshot.chunk_sources.clone()));
        }

        assert_eq!(runs[0].0, runs[1].0);
        assert_eq!(runs[0].1, runs[1].1);
    }

    #[test]
    fn test_replaced_content_is_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), true);
        // Only the replacement content is present at build time.
        write_doc(&config, "policy_v1.txt", "Leave is 15 days");

        let engine = DocumentEngine::new(config, Arc::new(HashingEmbedder::new(DIM)));
        engine.initialize().unwrap();

        let hits = engine.search("how many leave days", 3);
        assert!(!hits.is_empty());
        assert!(hits[0].is_most_recent);
        assert!(hits[0].text.contains("15 days"));
    }
}
