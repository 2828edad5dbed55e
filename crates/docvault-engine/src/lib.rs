//! DocVault Engine — orchestrates extraction, chunking, embedding, index
//! persistence, and recency-aware search behind one explicitly owned value.

pub mod engine;
pub mod seed;

pub use engine::{DocumentEngine, EngineStatus, Phase};
