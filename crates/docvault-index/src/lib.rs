//! DocVault Index — flat vector index, persisted snapshot, version store,
//! and index freshness checks.

pub mod flat;
pub mod freshness;
pub mod snapshot;
pub mod types;
pub mod versions;

pub use flat::FlatIndex;
pub use freshness::{check_freshness, Freshness, StaleReason, MTIME_TOLERANCE_SECS};
pub use snapshot::{IndexSnapshot, SnapshotPaths};
pub use types::DocumentRecord;
pub use versions::VersionStore;
