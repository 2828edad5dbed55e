//! DocVault Retrieve — query execution and recency-aware result ranking.

pub mod ranker;

pub use ranker::{search_snapshot, SearchHit, RECENT_QUOTA};
