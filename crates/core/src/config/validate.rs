use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Executable name is not empty
/// - Batch parallelism is not 0
/// - Output template is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.exec.executable.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "exec.executable cannot be empty".to_string(),
        ));
    }

    if config.batch.max_parallel == 0 {
        return Err(ConfigError::ValidationError(
            "batch.max_parallel cannot be 0".to_string(),
        ));
    }

    if config.download.output_template.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "download.output_template cannot be empty".to_string(),
        ));
    }

    Ok(())
}
