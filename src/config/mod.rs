#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_repo_slug, validate_url, Validate,
};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_BREW_API_BASE: &str = "https://formulae.brew.sh";
pub const DEFAULT_OUTPUT_PATH: &str = "./data";

/// Resolved runtime configuration, after merging CLI flags, the optional
/// config file, and defaults.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub github_repo: Option<String>,
    pub formulae: Vec<String>,
    pub output_path: String,
    pub github_api_base: String,
    pub brew_api_base: String,
    pub github_token: Option<String>,
    pub verbose: bool,
    pub monitor: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            github_repo: None,
            formulae: Vec::new(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            brew_api_base: DEFAULT_BREW_API_BASE.to_string(),
            github_token: None,
            verbose: false,
            monitor: false,
        }
    }
}

impl TrackerConfig {
    /// Pick up the optional API token from the environment. The token is
    /// deliberately not a CLI flag so it never shows up in process listings.
    pub fn with_token_from_env(mut self) -> Self {
        self.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        self
    }

    pub fn track_releases(&self) -> bool {
        self.github_repo.is_some()
    }

    pub fn track_formulae(&self) -> bool {
        !self.formulae.is_empty()
    }
}

impl ConfigProvider for TrackerConfig {
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

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<()> {
        if !self.track_releases() && !self.track_formulae() {
            return Err(TrackerError::ConfigError {
                message: "Nothing to track: configure a GitHub repository or at least one \
                          Homebrew formula"
                    .to_string(),
            });
        }

        if let Some(repo) = &self.github_repo {
            validate_repo_slug("github_repo", repo)?;
        }
        for formula in &self.formulae {
            validate_non_empty_string("formulae", formula)?;
        }

        validate_url("github_api_base", &self.github_api_base)?;
        validate_url("brew_api_base", &self.brew_api_base)?;
        validate_path("output_path", &self.output_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_nothing_to_track() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repo_only_config_is_valid() {
        let config = TrackerConfig {
            github_repo: Some("macvim-dev/macvim".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.track_releases());
        assert!(!config.track_formulae());
    }

    #[test]
    fn test_formulae_only_config_is_valid() {
        let config = TrackerConfig {
            formulae: vec!["macvim".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.track_releases());
        assert!(config.track_formulae());
    }

    #[test]
    fn test_bad_repo_slug_is_rejected() {
        let config = TrackerConfig {
            github_repo: Some("not-a-slug".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_api_base_is_rejected() {
        let config = TrackerConfig {
            formulae: vec!["wget".to_string()],
            brew_api_base: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
