//! Shared test doubles for pipeline unit tests.

use crate::core::{ConfigProvider, Storage};
use crate::utils::error::{Result, TrackerError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn seed(&self, path: &str, data: &[u8]) {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            TrackerError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.entry(path.to_string()).or_default().extend_from_slice(data);
        Ok(())
    }

    async fn file_exists(&self, path: &str) -> Result<bool> {
        let files = self.files.lock().await;
        Ok(files.contains_key(path))
    }
}

pub struct MockConfig {
    github_repo: Option<String>,
    formulae: Vec<String>,
    output_path: String,
    github_api_base: String,
    brew_api_base: String,
    github_token: Option<String>,
}

impl MockConfig {
    pub fn new() -> Self {
        Self {
            github_repo: None,
            formulae: Vec::new(),
            output_path: "test_output".to_string(),
            github_api_base: "https://api.github.com".to_string(),
            brew_api_base: "https://formulae.brew.sh".to_string(),
            github_token: None,
        }
    }

    pub fn with_github_repo(mut self, repo: &str) -> Self {
        self.github_repo = Some(repo.to_string());
        self
    }

    pub fn with_formulae(mut self, formulae: &[&str]) -> Self {
        self.formulae = formulae.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_github_api_base(mut self, base: String) -> Self {
        self.github_api_base = base;
        self
    }

    pub fn with_brew_api_base(mut self, base: String) -> Self {
        self.brew_api_base = base;
        self
    }

    pub fn with_github_token(mut self, token: &str) -> Self {
        self.github_token = Some(token.to_string());
        self
    }
}

impl ConfigProvider for MockConfig {
    fn github_repo(&self) -> Option<&str> {
        self.github_repo.as_deref()
    }

    fn formulae(&self) -> &[String] {
        &self.formulae
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn github_api_base(&self) -> &str {
        &self.github_api_base
    }

    fn brew_api_base(&self) -> &str {
        &self.brew_api_base
    }

    fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }
}
