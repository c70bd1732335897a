use crate::core::history::SnapshotTable;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Release, RunSummary, WriteAction, WritePlan};
use crate::utils::error::{Result, TrackerError};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;

const APP_USER_AGENT: &str = concat!("dlstats/", env!("CARGO_PKG_VERSION"));

/// One release together with its untouched API payload, kept for the
/// info dump.
#[derive(Debug, Clone)]
pub struct ReleaseRecord {
    pub release: Release,
    pub raw: serde_json::Value,
}

/// Tracks per-asset download counts for every release of one repository.
/// Each release gets its own history file keyed by asset name, so asset
/// renames between runs become new columns rather than corrupted rows.
pub struct ReleasePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    stamp: String,
}

impl<S: Storage, C: ConfigProvider> ReleasePipeline<S, C> {
    pub fn new(storage: S, config: C, stamp: String) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
            stamp,
        }
    }

    fn releases_url(&self) -> Result<String> {
        let repo = self
            .config
            .github_repo()
            .ok_or_else(|| TrackerError::MissingConfigError {
                field: "github_repo".to_string(),
            })?;
        Ok(format!(
            "{}/repos/{}/releases",
            self.config.github_api_base().trim_end_matches('/'),
            repo
        ))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReleasePipeline<S, C> {
    type Snapshot = Vec<ReleaseRecord>;
    type Plan = WritePlan;

    fn name(&self) -> &str {
        "github-releases"
    }

    async fn extract(&self) -> Result<Vec<ReleaseRecord>> {
        let url = self.releases_url()?;
        tracing::debug!("Fetching release list from {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(USER_AGENT, APP_USER_AGENT)
            .header(ACCEPT, "application/vnd.github+json");

        // Releases are public; the token only raises the rate limit.
        if let Some(token) = self.config.github_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::ApiStatusError {
                url,
                status: status.as_u16(),
            });
        }

        let payload: Vec<serde_json::Value> = response.json().await?;
        tracing::debug!("Fetched {} releases", payload.len());

        let mut records = Vec::with_capacity(payload.len());
        for raw in payload {
            let release: Release = serde_json::from_value(raw.clone())?;
            records.push(ReleaseRecord { release, raw });
        }
        Ok(records)
    }

    async fn transform(&self, snapshot: Vec<ReleaseRecord>) -> Result<WritePlan> {
        let mut plan = WritePlan::default();

        for record in snapshot {
            let release = &record.release;
            if release.assets.is_empty() {
                tracing::debug!("Release {} has no assets, skipping", release.tag_name);
                continue;
            }

            let asset_names: Vec<String> =
                release.assets.iter().map(|a| a.name.clone()).collect();
            let counts: HashMap<String, String> = release
                .assets
                .iter()
                .map(|a| (a.name.clone(), a.download_count.to_string()))
                .collect();

            let csv_path = format!("github_release/downloads/{}.csv", release.tag_name);

            if !self.storage.file_exists(&csv_path).await? {
                let mut table = SnapshotTable::new(asset_names);
                table.push_row(&self.stamp, &counts);
                plan.push(WriteAction::Write {
                    path: csv_path,
                    contents: table.to_csv()?,
                });
            } else {
                let existing = self.storage.read_file(&csv_path).await?;
                let mut table = SnapshotTable::from_csv(&existing)?;
                let added = table.merge_columns(&asset_names);

                if added.is_empty() {
                    // Assets no longer attached to the release leave empty
                    // cells; their columns stay.
                    let row = SnapshotTable::row_csv(&self.stamp, table.columns(), &counts)?;
                    plan.push(WriteAction::Append {
                        path: csv_path,
                        contents: row,
                    });
                } else {
                    tracing::info!(
                        "Release {} added assets {:?}, rewriting history file",
                        release.tag_name,
                        added
                    );
                    table.push_row(&self.stamp, &counts);
                    plan.push(WriteAction::Write {
                        path: csv_path,
                        contents: table.to_csv()?,
                    });
                }
            }
            plan.rows_appended += 1;

            // Raw payload kept next to the history so later questions about
            // a release don't need another API round trip.
            let info_path = format!("github_release/info/{}.json", release.tag_name);
            plan.push(WriteAction::Write {
                path: info_path,
                contents: serde_json::to_vec_pretty(&record.raw)?,
            });
        }

        Ok(plan)
    }

    async fn load(&self, plan: WritePlan) -> Result<RunSummary> {
        let files_written = plan.apply(&self.storage).await?;
        Ok(RunSummary {
            pipeline: self.name().to_string(),
            files_written,
            rows_appended: plan.rows_appended,
        })
    }
}
