use crate::config::toml_config::FileConfig;
use crate::config::TrackerConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dlstats")]
#[command(about = "Track release download and package install counts as CSV history")]
pub struct CliConfig {
    /// GitHub repository to track, as owner/name
    #[arg(long)]
    pub repo: Option<String>,

    /// Homebrew formulae to track
    #[arg(long, value_delimiter = ',')]
    pub formulae: Vec<String>,

    /// Base directory for the history files
    #[arg(long)]
    pub output: Option<String>,

    /// Override the GitHub API base URL
    #[arg(long)]
    pub github_api_base: Option<String>,

    /// Override the Homebrew API base URL
    #[arg(long)]
    pub brew_api_base: Option<String>,

    /// TOML config file; CLI flags take precedence over its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage after each pipeline")]
    pub monitor: bool,
}

impl CliConfig {
    /// Merge flags over the optional config file over defaults.
    pub fn into_config(self) -> Result<TrackerConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let mut config = TrackerConfig {
            verbose: self.verbose,
            monitor: self.monitor,
            ..Default::default()
        };

        if let Some(github) = file.github {
            config.github_repo = Some(github.repo);
            if let Some(base) = github.api_base {
                config.github_api_base = base;
            }
        }
        if let Some(homebrew) = file.homebrew {
            config.formulae = homebrew.formulae;
            if let Some(base) = homebrew.api_base {
                config.brew_api_base = base;
            }
        }
        if let Some(output) = file.output {
            config.output_path = output.path;
        }

        if self.repo.is_some() {
            config.github_repo = self.repo;
        }
        if !self.formulae.is_empty() {
            config.formulae = self.formulae;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(base) = self.github_api_base {
            config.github_api_base = base;
        }
        if let Some(base) = self.brew_api_base {
            config.brew_api_base = base;
        }

        Ok(config.with_token_from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BREW_API_BASE, DEFAULT_OUTPUT_PATH};
    use std::io::Write;

    fn args(extra: &[&str]) -> CliConfig {
        let mut argv = vec!["dlstats"];
        argv.extend_from_slice(extra);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn test_flags_only() {
        let config = args(&["--repo", "macvim-dev/macvim", "--formulae", "macvim,wget"])
            .into_config()
            .unwrap();

        assert_eq!(config.github_repo.as_deref(), Some("macvim-dev/macvim"));
        assert_eq!(config.formulae, vec!["macvim", "wget"]);
        assert_eq!(config.output_path, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.brew_api_base, DEFAULT_BREW_API_BASE);
    }

    #[test]
    fn test_config_file_fills_gaps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [github]
            repo = "owner/name"

            [output]
            path = "history"
            "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = args(&["--config", &path]).into_config().unwrap();

        assert_eq!(config.github_repo.as_deref(), Some("owner/name"));
        assert_eq!(config.output_path, "history");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [github]
            repo = "owner/name"
            api_base = "http://file-base"
            "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = args(&[
            "--config",
            &path,
            "--repo",
            "other/repo",
            "--github-api-base",
            "http://flag-base",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.github_repo.as_deref(), Some("other/repo"));
        assert_eq!(config.github_api_base, "http://flag-base");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        assert!(args(&["--config", "/nonexistent/dlstats.toml"])
            .into_config()
            .is_err());
    }
}
