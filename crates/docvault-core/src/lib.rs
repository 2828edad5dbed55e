//! DocVault Core — document identity, configuration, error taxonomy.

pub mod config;
pub mod error;
pub mod ids;

pub use config::{DataPaths, DocVaultConfig};
pub use error::{Error, Result};
pub use ids::DocumentId;
