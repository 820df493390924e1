//! Configuration loader with TOML parsing and environment variable substitution

use super::schema::PushConfig;
use crate::domain::errors::PushError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`PushConfig`]
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use aisler_push::config::load_config;
///
/// let config = load_config("aisler-push.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PushConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PushError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PushError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: PushConfig = toml::from_str(&contents)
        .map_err(|e| PushError::Configuration(format!("Failed to parse TOML: {e}")))?;

    config
        .validate()
        .map_err(|e| PushError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
fn substitute_env_vars(contents: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| PushError::Configuration(format!("Invalid substitution pattern: {e}")))?;

    let mut result = String::with_capacity(contents.len());
    let mut last_end = 0;

    for caps in re.captures_iter(contents) {
        let Some(whole) = caps.get(0) else { continue };
        let var_name = &caps[1];
        let value = std::env::var(var_name).map_err(|_| {
            PushError::Configuration(format!(
                "Environment variable '{var_name}' referenced in configuration is not set"
            ))
        })?;
        result.push_str(&contents[last_end..whole.start()]);
        result.push_str(&value);
        last_end = whole.end();
    }
    result.push_str(&contents[last_end..]);

    Ok(result)
}
