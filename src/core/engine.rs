use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

/// Drives one pipeline through its extract/transform/load stages.
pub struct TrackerEngine<P: Pipeline> {
    pipeline: P,
    #[cfg(feature = "cli")]
    monitor: SystemMonitor,
}

impl<P: Pipeline> TrackerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            #[cfg(feature = "cli")]
            monitor: SystemMonitor::new(false),
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let name = self.pipeline.name();

        tracing::info!("{}: extracting", name);
        let snapshot = self.pipeline.extract().await?;

        tracing::info!("{}: transforming", name);
        let plan = self.pipeline.transform(snapshot).await?;

        tracing::info!("{}: loading", name);
        let summary = self.pipeline.load(plan).await?;

        tracing::info!(
            "{}: wrote {} files, appended {} rows",
            summary.pipeline,
            summary.files_written,
            summary.rows_appended
        );

        #[cfg(feature = "cli")]
        self.monitor.log_summary();

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{WriteAction, WritePlan};
    use crate::utils::error::TrackerError;
    use async_trait::async_trait;

    struct StubPipeline {
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        type Snapshot = usize;
        type Plan = WritePlan;

        fn name(&self) -> &str {
            "stub"
        }

        async fn extract(&self) -> Result<usize> {
            if self.fail_extract {
                return Err(TrackerError::ProcessingError {
                    message: "extract failed".to_string(),
                });
            }
            Ok(3)
        }

        async fn transform(&self, snapshot: usize) -> Result<WritePlan> {
            let mut plan = WritePlan::default();
            for i in 0..snapshot {
                plan.push(WriteAction::Write {
                    path: format!("file_{}.csv", i),
                    contents: Vec::new(),
                });
            }
            plan.rows_appended = snapshot;
            Ok(plan)
        }

        async fn load(&self, plan: WritePlan) -> Result<RunSummary> {
            Ok(RunSummary {
                pipeline: self.name().to_string(),
                files_written: plan.actions.len(),
                rows_appended: plan.rows_appended,
            })
        }
    }

    #[tokio::test]
    async fn test_run_passes_stage_results_through() {
        let engine = TrackerEngine::new(StubPipeline {
            fail_extract: false,
        });
        let summary = engine.run().await.unwrap();

        assert_eq!(summary.pipeline, "stub");
        assert_eq!(summary.files_written, 3);
        assert_eq!(summary.rows_appended, 3);
    }

    #[tokio::test]
    async fn test_run_propagates_stage_error() {
        let engine = TrackerEngine::new(StubPipeline { fail_extract: true });
        assert!(engine.run().await.is_err());
    }
}
