use crate::core::Storage;
use crate::utils::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Filesystem storage rooted at a base directory. Parent directories are
/// created on demand so history paths like `github_release/downloads/` work
/// on a fresh checkout.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = std::fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(full_path, data)?;
        Ok(())
    }

    async fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(full_path)?;
        file.write_all(data)?;
        Ok(())
    }

    async fn file_exists(&self, path: &str) -> Result<bool> {
        let full_path = Path::new(&self.base_path).join(path);
        Ok(full_path.exists())
    }
}
