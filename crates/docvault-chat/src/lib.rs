//! DocVault Chat — grounded answer generation against an external
//! chat-completions API.
//!
//! The language model is an external collaborator: prompt in, answer text
//! out. Every failure mode of the call maps to a fixed user-facing
//! message; no error crosses this boundary.

pub mod classify;
pub mod client;
pub mod config;
pub mod prompt;
pub mod types;

pub use classify::classify_topic;
pub use client::AnswerClient;
pub use config::ChatConfig;
pub use types::{Passage, SourceRef};
