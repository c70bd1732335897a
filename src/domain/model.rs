use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One release as returned by the release hosting API. Only the fields the
/// tracker consumes are typed; the full payload is carried separately as raw
/// JSON for the info dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_count: u64,
}

/// Homebrew formula API payload, reduced to the analytics the tracker reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Formula {
    pub name: String,
    pub generated_date: String,
    pub versions: FormulaVersions,
    pub analytics: FormulaAnalytics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormulaVersions {
    pub stable: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormulaAnalytics {
    pub install: AnalyticsCategory,
    pub install_on_request: AnalyticsCategory,
}

/// The analytics maps are keyed by formula name (including variants such as
/// `foo --HEAD`), so they stay as maps rather than single counters.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsCategory {
    #[serde(rename = "30d")]
    pub last_30_days: HashMap<String, u64>,
}

/// Flattened per-formula extract, one CSV row's worth of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaSnapshot {
    pub formula: String,
    pub generated_date: String,
    pub stable_version: String,
    pub installs_30d: u64,
    pub installs_on_request_30d: u64,
}

/// Ordered storage writes produced by a pipeline's transform stage and
/// applied during load.
#[derive(Debug, Clone, Default)]
pub struct WritePlan {
    pub actions: Vec<WriteAction>,
    pub rows_appended: usize,
}

#[derive(Debug, Clone)]
pub enum WriteAction {
    /// Create or replace the file with the given contents.
    Write { path: String, contents: Vec<u8> },
    /// Append the given contents to an existing file.
    Append { path: String, contents: Vec<u8> },
}

impl WritePlan {
    pub fn push(&mut self, action: WriteAction) {
        self.actions.push(action);
    }

    /// Apply every action in order, returning the number of files touched.
    pub async fn apply<S: crate::domain::ports::Storage>(&self, storage: &S) -> Result<usize> {
        for action in &self.actions {
            match action {
                WriteAction::Write { path, contents } => {
                    tracing::debug!("Writing {} ({} bytes)", path, contents.len());
                    storage.write_file(path, contents).await?;
                }
                WriteAction::Append { path, contents } => {
                    tracing::debug!("Appending {} bytes to {}", contents.len(), path);
                    storage.append_file(path, contents).await?;
                }
            }
        }
        Ok(self.actions.len())
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub pipeline: String,
    pub files_written: usize,
    pub rows_appended: usize,
}
