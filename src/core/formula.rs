use crate::core::history::SnapshotTable;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Formula, FormulaSnapshot, RunSummary, WriteAction, WritePlan};
use crate::utils::error::{Result, TrackerError};
use reqwest::Client;
use std::collections::HashMap;

/// Column names mirror the JSON paths they came from, so a spreadsheet
/// import is self-describing.
const FORMULA_COLUMNS: [&str; 4] = [
    "generated_date",
    "versions.stable",
    "install.30d",
    "install_on_request.30d",
];

/// Tracks 30-day install analytics for the configured Homebrew formulae,
/// one history file per formula.
pub struct FormulaPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    stamp: String,
}

impl<S: Storage, C: ConfigProvider> FormulaPipeline<S, C> {
    pub fn new(storage: S, config: C, stamp: String) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
            stamp,
        }
    }

    fn formula_url(&self, formula: &str) -> String {
        format!(
            "{}/api/formula/{}.json",
            self.config.brew_api_base().trim_end_matches('/'),
            formula
        )
    }

    async fn fetch_formula(&self, formula: &str) -> Result<FormulaSnapshot> {
        let url = self.formula_url(formula);
        tracing::debug!("Fetching formula analytics from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::ApiStatusError {
                url,
                status: status.as_u16(),
            });
        }

        let info: Formula = response.json().await?;

        // The analytics maps are keyed by formula name; a formula missing
        // from its own analytics means the API shape changed.
        let installs_30d = *info
            .analytics
            .install
            .last_30_days
            .get(formula)
            .ok_or_else(|| TrackerError::ProcessingError {
                message: format!("No install analytics for formula '{}'", formula),
            })?;
        let installs_on_request_30d = *info
            .analytics
            .install_on_request
            .last_30_days
            .get(formula)
            .ok_or_else(|| TrackerError::ProcessingError {
                message: format!("No install_on_request analytics for formula '{}'", formula),
            })?;

        Ok(FormulaSnapshot {
            formula: formula.to_string(),
            generated_date: info.generated_date,
            stable_version: info.versions.stable,
            installs_30d,
            installs_on_request_30d,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FormulaPipeline<S, C> {
    type Snapshot = Vec<FormulaSnapshot>;
    type Plan = WritePlan;

    fn name(&self) -> &str {
        "homebrew-installs"
    }

    async fn extract(&self) -> Result<Vec<FormulaSnapshot>> {
        let formulae = self.config.formulae();
        if formulae.is_empty() {
            return Err(TrackerError::MissingConfigError {
                field: "formulae".to_string(),
            });
        }

        let mut snapshots = Vec::with_capacity(formulae.len());
        for formula in formulae {
            let snapshot = self.fetch_formula(formula).await?;
            tracing::debug!(
                "Formula {}: {} installs, {} on request (stable {})",
                snapshot.formula,
                snapshot.installs_30d,
                snapshot.installs_on_request_30d,
                snapshot.stable_version
            );
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }

    async fn transform(&self, snapshot: Vec<FormulaSnapshot>) -> Result<WritePlan> {
        let columns: Vec<String> = FORMULA_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut plan = WritePlan::default();

        for snap in snapshot {
            let path = format!("homebrew/{}.csv", snap.formula);

            let mut values = HashMap::new();
            values.insert(FORMULA_COLUMNS[0].to_string(), snap.generated_date.clone());
            values.insert(FORMULA_COLUMNS[1].to_string(), snap.stable_version.clone());
            values.insert(FORMULA_COLUMNS[2].to_string(), snap.installs_30d.to_string());
            values.insert(
                FORMULA_COLUMNS[3].to_string(),
                snap.installs_on_request_30d.to_string(),
            );

            if !self.storage.file_exists(&path).await? {
                let mut table = SnapshotTable::new(columns.clone());
                table.push_row(&self.stamp, &values);
                plan.push(WriteAction::Write {
                    path,
                    contents: table.to_csv()?,
                });
            } else {
                let row = SnapshotTable::row_csv(&self.stamp, &columns, &values)?;
                plan.push(WriteAction::Append {
                    path,
                    contents: row,
                });
            }
            plan.rows_appended += 1;
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
