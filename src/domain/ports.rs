use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn file_exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn github_repo(&self) -> Option<&str>;
    fn formulae(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn github_api_base(&self) -> &str;
    fn brew_api_base(&self) -> &str;
    fn github_token(&self) -> Option<&str>;
}

/// A tracking pipeline: fetch a snapshot from an API, diff it against the
/// history files on disk, and apply the resulting writes.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Snapshot: Send;
    type Plan: Send;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Snapshot>;
    async fn transform(&self, snapshot: Self::Snapshot) -> Result<Self::Plan>;
    async fn load(&self, plan: Self::Plan) -> Result<RunSummary>;
}
