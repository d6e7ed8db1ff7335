use crate::config::EngineSettings;
use crate::utils::error::{Result, TourError};
use crate::utils::validation::Validate;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl EngineSettings {
    /// Loads and validates settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TourError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from TOML text, then validates them.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let settings: EngineSettings =
            toml::from_str(&processed_content).map_err(|e| TourError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        settings.validate()?;
        Ok(settings)
    }
}

/// Replaces `${VAR}` references with environment values; unset variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
