//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MockConfig;
use crate::domain::errors::MockError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment overrides, e.g. `RWS_MOCK_SERVER_PORT`
pub const ENV_PREFIX: &str = "RWS_MOCK";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`MockConfig`]
/// 4. Applies environment variable overrides (`RWS_MOCK_*` prefix)
/// 5. Validates the configuration
///
/// Catalog cross-references are not checked here; a form that names an unknown item
/// group still loads. Use [`crate::domain::OdmCatalog::unresolved_references`] to
/// list them.
///
/// # Errors
///
/// Returns [`MockError::Configuration`] if the file is missing or unreadable, a
/// referenced environment variable is unset, the TOML is malformed, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use rws_mock::config::loader::load_config;
///
/// let config = load_config("rws-mock.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MockConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MockError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MockError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MockConfig = toml::from_str(&contents)
        .map_err(|e| MockError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MockError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched. Every unset variable is reported in a single
/// error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MockError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|missing| missing == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MockError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(section: &str, key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        MockError::Configuration(format!(
            "Invalid value for {ENV_PREFIX}_{section}_{key}: {value}"
        ))
    })
}

/// Applies environment variable overrides using the `RWS_MOCK_*` prefix
///
/// Variables follow the pattern `RWS_MOCK_<SECTION>_<KEY>`, for example
/// `RWS_MOCK_SERVER_PORT` or `RWS_MOCK_ODM_DEFAULT_FILE_TYPE`.
fn apply_env_overrides(config: &mut MockConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Some(val) = env_override("SERVER", "HOST") {
        config.server.host = val;
    }
    if let Some(val) = env_override("SERVER", "PORT") {
        config.server.port = parse_override("SERVER", "PORT", &val)?;
    }
    if let Some(val) = env_override("SERVER", "BODY_LIMIT") {
        config.server.body_limit = parse_override("SERVER", "BODY_LIMIT", &val)?;
    }

    // Protocol overrides
    if let Some(val) = env_override("RWS", "VERSION") {
        config.rws.version = val;
    }
    if let Some(val) = env_override("ODM", "DEFAULT_FILE_TYPE") {
        config.odm.default_file_type = val;
    }

    // Auth overrides
    if let Some(val) = env_override("AUTH", "ALLOW_ANY_CREDENTIALS") {
        config.auth.basic.allow_any_credentials =
            parse_override("AUTH", "ALLOW_ANY_CREDENTIALS", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING", "LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING", "LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
