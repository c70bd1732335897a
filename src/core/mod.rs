pub mod engine;
pub mod formula;
pub mod history;
pub mod releases;

#[cfg(test)]
pub mod testing;

pub use crate::domain::model::{RunSummary, WriteAction, WritePlan};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
