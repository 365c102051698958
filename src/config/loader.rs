//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and breaker construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid() {
        let file = write_config(
            r#"
            [breaker]
            name = "inventory"
            max_concurrent_probes = 3
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.breaker.name, "inventory");
        assert_eq!(config.breaker.max_concurrent_probes, 3);
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let file = write_config("[breaker]\ntimeout_secs = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(
            err.to_string(),
            "Validation failed: breaker.timeout_secs: must be greater than 0"
        );
    }

    #[test]
    fn test_load_rejects_negative_duration() {
        let file = write_config("[breaker]\ninterval_secs = -5\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/breaker.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
