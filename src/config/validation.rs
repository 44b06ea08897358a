//! Configuration validation logic.

use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Maximum concurrent downloads accepted from configuration.
const MAX_CONCURRENT_DOWNLOADS: usize = 256;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_secret("api_key", &config.account.api_key)?;
    validate_secret("token", &config.account.token)?;
    validate_secret("token_secret", &config.account.token_secret)?;
    validate_api_base(&config.options.api_base)?;

    validate_positive("page", config.options.page as u64)?;
    validate_positive("albums_per_run", config.options.albums_per_run as u64)?;
    validate_positive("max_attempts", config.options.max_attempts as u64)?;
    validate_positive("transport_retries", config.options.transport_retries as u64)?;
    validate_positive("request_timeout_secs", config.options.request_timeout_secs)?;

    let concurrency = config.options.max_concurrent_downloads;
    if concurrency == 0 || concurrency > MAX_CONCURRENT_DOWNLOADS {
        return Err(Error::ConfigValidation {
            field: "max_concurrent_downloads".to_string(),
            message: format!(
                "Must be between 1 and {} (got {})",
                MAX_CONCURRENT_DOWNLOADS, concurrency
            ),
        });
    }

    Ok(())
}

/// Validate a credential value: present and not a placeholder.
pub fn validate_secret(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.starts_with("your-") || lower.starts_with("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder. Please provide your actual credentials."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the API endpoint URL.
pub fn validate_api_base(api_base: &str) -> Result<()> {
    let url = Url::parse(api_base).map_err(|e| Error::ConfigValidation {
        field: "api_base".to_string(),
        message: format!("Not a valid URL: {}", e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "api_base".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

fn validate_positive(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Must be greater than zero".to_string(),
        });
    }
    Ok(())
}
