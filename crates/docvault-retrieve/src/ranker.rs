//! Recency-aware retrieval ranking.
//!
//! A pure nearest-neighbor ranking can surface obsolete policy text ahead
//! of its superseding revision. The ranker therefore over-fetches `2k`
//! neighbors, splits them into hits from the single most recently modified
//! document and hits from everything else, and composes the final list with
//! the newest document guaranteed up to a fixed quota while older versions
//! remain available for comparison.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use docvault_core::DocumentId;
use docvault_embed::EmbedderBackend;
use docvault_index::IndexSnapshot;

/// How many hits from the newest document are force-included in a result.
pub const RECENT_QUOTA: usize = 3;

/// A single retrieval result. Ephemeral; produced per query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub text: String,
    /// Derived from distance as `1 / (1 + d)`; higher is better, in (0, 1].
    pub similarity: f64,
    pub source: DocumentId,
    pub modified_at: DateTime<Utc>,
    pub is_most_recent: bool,
}

/// Execute a query against a snapshot and return at most `k` hits.
///
/// Hits from the most recently modified document are placed first, up to
/// `min(RECENT_QUOTA, available)`, then remaining slots are filled from the
/// other documents; both partitions keep their distance-ranked order.
pub fn search_snapshot(
    snapshot: &IndexSnapshot,
    embedder: &dyn EmbedderBackend,
    query: &str,
    k: usize,
) -> Vec<SearchHit> {
    if k == 0 || snapshot.chunk_count() == 0 {
        return Vec::new();
    }

    let query_vector = match embedder.embed(query) {
        Some(v) => v,
        None => {
            warn!("Embedding backend unavailable; returning no results");
            return Vec::new();
        }
    };

    let most_recent = match snapshot.versions.most_recent() {
        Some(r) => r.id.clone(),
        None => return Vec::new(),
    };

    // Over-fetch so recency re-ranking cannot starve the result set.
    let neighbors = snapshot.index.search(&query_vector, 2 * k);

    let mut recent = Vec::new();
    let mut other = Vec::new();

    for (distance, idx) in neighbors {
        let source = &snapshot.chunk_sources[idx];
        let record = match snapshot.versions.get(source) {
            Some(r) => r,
            None => continue,
        };
        let hit = SearchHit {
            text: snapshot.chunk_texts[idx].clone(),
            similarity: 1.0 / (1.0 + distance as f64),
            source: source.clone(),
            modified_at: record.modified_at,
            is_most_recent: record.id == most_recent,
        };
        if hit.is_most_recent {
            recent.push(hit);
        } else {
            other.push(hit);
        }
    }

    let recent_take = recent.len().min(RECENT_QUOTA);
    let mut results: Vec<SearchHit> = recent.into_iter().take(recent_take).collect();
    results.extend(other.into_iter().take(k.saturating_sub(recent_take)));
    results.truncate(k);

    debug!(
        "Query matched {} hit(s), {} from the most recent document",
        results.len(),
        recent_take
    );
    results
}
