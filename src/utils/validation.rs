use crate::utils::error::{Result, TrackerError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TrackerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A repository slug is `owner/name`, both parts non-empty and free of
/// further slashes.
pub fn validate_repo_slug(field_name: &str, slug: &str) -> Result<()> {
    let mut parts = slug.split('/');
    let owner = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");

    if owner.is_empty() || name.is_empty() || parts.next().is_some() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slug.to_string(),
            reason: "Expected 'owner/name'".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("github_api_base", "https://api.github.com").is_ok());
        assert!(validate_url("github_api_base", "http://localhost:8080").is_ok());
        assert!(validate_url("github_api_base", "").is_err());
        assert!(validate_url("github_api_base", "not-a-url").is_err());
        assert!(validate_url("github_api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_repo_slug() {
        assert!(validate_repo_slug("repo", "macvim-dev/macvim").is_ok());
        assert!(validate_repo_slug("repo", "owner/").is_err());
        assert!(validate_repo_slug("repo", "/name").is_err());
        assert!(validate_repo_slug("repo", "no-slash").is_err());
        assert!(validate_repo_slug("repo", "a/b/c").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("formula", "wget").is_ok());
        assert!(validate_non_empty_string("formula", "   ").is_err());
        assert!(validate_non_empty_string("formula", "").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./data").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }
}
