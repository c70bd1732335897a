use crate::utils::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML config file, the scheduler-friendly alternative to CLI flags:
///
/// ```toml
/// [github]
/// repo = "owner/name"
///
/// [homebrew]
/// formulae = ["foo", "bar"]
///
/// [output]
/// path = "data"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub github: Option<GithubSection>,
    pub homebrew: Option<HomebrewSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSection {
    pub repo: String,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomebrewSection {
    pub formulae: Vec<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TrackerError::ConfigError {
            message: format!("Failed to parse config file: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::from_toml_str(
            r#"
            [github]
            repo = "macvim-dev/macvim"

            [homebrew]
            formulae = ["macvim"]

            [output]
            path = "data"
            "#,
        )
        .unwrap();

        assert_eq!(config.github.unwrap().repo, "macvim-dev/macvim");
        assert_eq!(config.homebrew.unwrap().formulae, vec!["macvim"]);
        assert_eq!(config.output.unwrap().path, "data");
    }

    #[test]
    fn test_parse_partial_config() {
        let config = FileConfig::from_toml_str(
            r#"
            [homebrew]
            formulae = ["wget", "curl"]
            api_base = "http://localhost:8080"
            "#,
        )
        .unwrap();

        assert!(config.github.is_none());
        assert!(config.output.is_none());
        let homebrew = config.homebrew.unwrap();
        assert_eq!(homebrew.formulae.len(), 2);
        assert_eq!(homebrew.api_base.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_parse_invalid_toml_is_config_error() {
        assert!(matches!(
            FileConfig::from_toml_str("[github\nrepo = ").unwrap_err(),
            TrackerError::ConfigError { .. }
        ));
    }
}
