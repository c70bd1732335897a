pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::{storage::LocalStorage, TrackerConfig};

pub use crate::core::{
    engine::TrackerEngine, formula::FormulaPipeline, history::SnapshotTable,
    releases::ReleasePipeline,
};
pub use crate::utils::error::{Result, TrackerError};
